use std::collections::btree_map::{self, BTreeMap};

use serde_derive::{Deserialize, Serialize};
use serde_json::Value;
use tendermint::block::Header;

use crate::context::AppModule;

pub type ModuleList = Vec<Box<dyn AppModule>>;

/// Genesis documents of every module, keyed by module name. Each document is opaque to the
/// manager and only interpreted by the module it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenesisState(BTreeMap<String, Value>);

impl GenesisState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, module: &str) -> Option<&Value> {
        self.0.get(module)
    }

    pub fn contains(&self, module: &str) -> bool {
        self.0.contains_key(module)
    }

    /// Sets the genesis document of `module`, returning the previous one.
    pub fn insert(&mut self, module: impl Into<String>, genesis: Value) -> Option<Value> {
        self.0.insert(module.into(), genesis)
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for GenesisState {
    fn from(value: BTreeMap<String, Value>) -> Self {
        Self(value)
    }
}

impl FromIterator<(String, Value)> for GenesisState {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a GenesisState {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A change to the voting power of a validator, reported to the consensus engine. A power of
/// zero removes the validator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorUpdate {
    /// hex-encoded consensus public key
    pub pub_key: String,
    pub power: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestBeginBlock {
    pub header: Header,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestEndBlock {
    pub height: u64,
}

/// Id of the positional arguments of module tx and query commands. The CLI appends their values
/// to the command path when it dispatches a command.
pub const COMMAND_ARGS: &str = "args";
