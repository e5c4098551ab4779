use clap::Command;

use super::error::Error;
use super::registry::ModuleRegistry;
use crate::codec::TypeRegistry;
use crate::context::AppModuleBasic;
use crate::error::Error as AppError;
use crate::types::GenesisState;

/// The stateless phases over modules that need no store, as used by tooling that runs before a
/// chain exists.
#[derive(Default)]
pub struct BasicManager {
    modules: ModuleRegistry<dyn AppModuleBasic>,
}

impl BasicManager {
    pub fn new(modules: Vec<Box<dyn AppModuleBasic>>) -> Result<Self, Error> {
        let mut manager = Self::default();
        for module in modules {
            manager.modules.register(module)?;
        }
        Ok(manager)
    }

    pub fn add_module(mut self, module: Box<dyn AppModuleBasic>) -> Result<Self, Error> {
        self.modules.register(module)?;
        Ok(self)
    }

    pub fn modules(&self) -> &[String] {
        self.modules.names()
    }

    pub fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), AppError> {
        self.modules.register_types(registry)
    }

    pub fn default_genesis(&self) -> GenesisState {
        self.modules.default_genesis()
    }

    pub fn validate_genesis(&self, genesis: &GenesisState) -> Result<(), AppError> {
        self.modules.validate_genesis(genesis)
    }

    pub fn add_tx_commands(&self, root: Command) -> Command {
        self.modules.add_tx_commands(root)
    }

    pub fn add_query_commands(&self, root: Command) -> Command {
        self.modules.add_query_commands(root)
    }
}
