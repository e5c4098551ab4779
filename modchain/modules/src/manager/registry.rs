use std::collections::BTreeMap;

use clap::Command;
use serde_json::Value;
use tracing::debug;

use super::error::Error;
use crate::codec::TypeRegistry;
use crate::context::AppModuleBasic;
use crate::error::Error as AppError;
use crate::types::GenesisState;

/// Modules by name, remembering the order they were registered in.
pub struct ModuleRegistry<M: ?Sized> {
    order: Vec<String>,
    modules: BTreeMap<String, Box<M>>,
}

impl<M: ?Sized> Default for ModuleRegistry<M> {
    fn default() -> Self {
        Self {
            order: vec![],
            modules: BTreeMap::new(),
        }
    }
}

impl<M: ?Sized + AppModuleBasic> ModuleRegistry<M> {
    /// Registers `module` under its name, which must be non-empty and not taken.
    pub fn register(&mut self, module: Box<M>) -> Result<(), Error> {
        let name = module.name().to_owned();
        if name.is_empty() {
            return Err(Error::EmptyModuleName);
        }
        if self.modules.contains_key(&name) {
            return Err(Error::DuplicateModule { name });
        }
        debug!("Registering module {}", name);
        self.order.push(name.clone());
        self.modules.insert(name, module);
        Ok(())
    }

    /// Module names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&M> {
        self.modules.get(name).map(|m| m.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut M> {
        self.modules.get_mut(name).map(|m| m.as_mut())
    }

    /// Modules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.order
            .iter()
            .filter_map(|name| self.modules.get(name))
            .map(|m| m.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), AppError> {
        for module in self.iter() {
            debug!("Registering types of module {}", module.name());
            module
                .register_types(registry)
                .map_err(|e| AppError::module(module.name(), e))?;
        }
        Ok(())
    }

    pub fn default_genesis(&self) -> GenesisState {
        self.iter()
            .map(|module| (module.name().to_owned(), module.default_genesis()))
            .collect()
    }

    /// Validates the genesis document of every module, stopping at the first invalid one. A
    /// module missing from `genesis` is validated against `null`.
    pub fn validate_genesis(&self, genesis: &GenesisState) -> Result<(), AppError> {
        let null = Value::Null;
        for module in self.iter() {
            debug!("Validating genesis of module {}", module.name());
            let doc = genesis.get(module.name()).unwrap_or(&null);
            module
                .validate_genesis(doc)
                .map_err(|e| AppError::module(module.name(), e))?;
        }
        Ok(())
    }

    pub fn add_tx_commands(&self, root: Command) -> Command {
        self.iter()
            .filter_map(|module| module.tx_command())
            .fold(root, |root, cmd| root.subcommand(cmd))
    }

    pub fn add_query_commands(&self, root: Command) -> Command {
        self.iter()
            .filter_map(|module| module.query_command())
            .fold(root, |root, cmd| root.subcommand(cmd))
    }
}
