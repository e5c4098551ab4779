use clap::Command;
use modchain_store::types::Identifier as StoreIdentifier;
use serde_json::Value;
use tendermint::abci::Event;
use tendermint::block::Header;

use crate::codec::TypeRegistry;
use crate::error::Error;
use crate::invariant::InvariantRegistry;
use crate::router::{Handler, Querier};
use crate::types::{RequestBeginBlock, RequestEndBlock, ValidatorUpdate};

/// The context a lifecycle hook runs in: the header of the block being executed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    header: Header,
}

impl Context {
    pub fn new(header: Header) -> Self {
        Self { header }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn block_height(&self) -> u64 {
        self.header.height.value()
    }

    pub fn chain_id(&self) -> &str {
        self.header.chain_id.as_str()
    }
}

/// Capabilities every module exposes, whether or not it has state.
///
/// Apart from [`name`](AppModuleBasic::name) every method has a no-op default, so a module only
/// implements the phases it takes part in.
pub trait AppModuleBasic: Send + Sync {
    /// Unique, non-empty name the module is registered under.
    fn name(&self) -> &str;

    /// Registers the message types handled by this module.
    fn register_types(&self, _registry: &mut TypeRegistry) -> Result<(), Error> {
        Ok(())
    }

    /// The genesis document used when none is supplied.
    fn default_genesis(&self) -> Value {
        Value::Null
    }

    /// Stateless validation of this module's genesis document.
    fn validate_genesis(&self, _genesis: &Value) -> Result<(), Error> {
        Ok(())
    }

    /// Root of this module's transaction subcommands, if any.
    fn tx_command(&self) -> Option<Command> {
        None
    }

    /// Root of this module's query subcommands, if any.
    fn query_command(&self) -> Option<Command> {
        None
    }
}

/// A module with state that takes part in genesis import and export.
pub trait AppModuleGenesis: AppModuleBasic {
    /// Imports this module's genesis document, returning the validator updates it implies.
    ///
    /// Similar to [ABCI InitChain method](https://docs.tendermint.com/master/spec/abci/abci.html#initchain)
    fn init_genesis(
        &mut self,
        _ctx: &Context,
        _genesis: &Value,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        Ok(vec![])
    }

    /// Exports this module's state as a genesis document.
    fn export_genesis(&self, _ctx: &Context) -> Result<Value, Error> {
        Ok(Value::Null)
    }
}

/// The full set of capabilities driven by the [`Manager`](crate::manager::Manager).
pub trait AppModule: AppModuleGenesis {
    fn register_invariants(&self, _registry: &mut dyn InvariantRegistry) {}

    /// Route of the message handler returned by [`new_handler`](AppModule::new_handler).
    fn route(&self) -> Option<&str> {
        None
    }

    fn new_handler(&self) -> Option<Handler> {
        None
    }

    /// Route of the querier returned by [`new_querier_handler`](AppModule::new_querier_handler).
    fn querier_route(&self) -> Option<&str> {
        None
    }

    fn new_querier_handler(&self) -> Option<Querier> {
        None
    }

    /// Similar to [ABCI BeginBlock method](https://docs.tendermint.com/master/spec/abci/abci.html#beginblock)
    /// *NOTE* - Implementations MUST be deterministic!
    ///
    /// ## Return
    /// * Resulting events if any
    fn begin_block(
        &mut self,
        _ctx: &Context,
        _request: &RequestBeginBlock,
    ) -> Result<Vec<Event>, Error> {
        Ok(vec![])
    }

    /// Similar to [ABCI EndBlock method](https://docs.tendermint.com/master/spec/abci/abci.html#endblock)
    /// *NOTE* - Implementations MUST be deterministic!
    ///
    /// ## Return
    /// * Validator updates if any
    fn end_block(
        &mut self,
        _ctx: &Context,
        _request: &RequestEndBlock,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        Ok(vec![])
    }
}

/// Turns a module that only takes part in genesis into an [`AppModule`] with no routes, no
/// invariants and no-op block hooks.
#[derive(Clone, Debug)]
pub struct GenesisOnlyAppModule<M> {
    module: M,
}

impl<M: AppModuleGenesis> GenesisOnlyAppModule<M> {
    pub fn new(module: M) -> Self {
        Self { module }
    }

    pub fn inner(&self) -> &M {
        &self.module
    }
}

impl<M: AppModuleGenesis> AppModuleBasic for GenesisOnlyAppModule<M> {
    fn name(&self) -> &str {
        self.module.name()
    }

    fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), Error> {
        self.module.register_types(registry)
    }

    fn default_genesis(&self) -> Value {
        self.module.default_genesis()
    }

    fn validate_genesis(&self, genesis: &Value) -> Result<(), Error> {
        self.module.validate_genesis(genesis)
    }

    fn tx_command(&self) -> Option<Command> {
        self.module.tx_command()
    }

    fn query_command(&self) -> Option<Command> {
        self.module.query_command()
    }
}

impl<M: AppModuleGenesis> AppModuleGenesis for GenesisOnlyAppModule<M> {
    fn init_genesis(
        &mut self,
        ctx: &Context,
        genesis: &Value,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        self.module.init_genesis(ctx, genesis)
    }

    fn export_genesis(&self, ctx: &Context) -> Result<Value, Error> {
        self.module.export_genesis(ctx)
    }
}

impl<M: AppModuleGenesis> AppModule for GenesisOnlyAppModule<M> {}

/// Trait for identifying modules
/// This is used to get `Module` prefixes that are used for creating prefixed key-space proxy-stores
pub trait Identifiable {
    type Identifier: Into<StoreIdentifier>;

    /// Return an identifier
    fn identifier(&self) -> Self::Identifier;
}

pub mod prefix {
    use modchain_store::types::Identifier as StoreIdentifier;

    use super::Identifiable;

    /// Staking module prefix
    #[derive(Clone)]
    pub struct Staking;

    impl Identifiable for Staking {
        type Identifier = StoreIdentifier;

        fn identifier(&self) -> Self::Identifier {
            "staking".to_owned().into()
        }
    }
}
