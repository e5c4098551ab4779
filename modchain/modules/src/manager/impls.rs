use clap::Command;
use tendermint::abci::Event;
use tracing::debug;

use super::error::Error as ManagerError;
use super::order::{ModuleOrders, Phase};
use super::registry::ModuleRegistry;
use crate::codec::TypeRegistry;
use crate::context::{AppModule, Context};
use crate::error::Error;
use crate::invariant::InvariantRegistry;
use crate::router::{QueryRouter, Router};
use crate::types::{GenesisState, RequestBeginBlock, RequestEndBlock, ValidatorUpdate};

/// Drives registered modules through the lifecycle phases, each phase in its configured order.
///
/// Built by [`ManagerBuilder`](super::ManagerBuilder); the orders are fixed from then on.
pub struct Manager {
    modules: ModuleRegistry<dyn AppModule>,
    orders: ModuleOrders,
}

impl Manager {
    pub(super) fn new(modules: ModuleRegistry<dyn AppModule>, orders: ModuleOrders) -> Self {
        Self { modules, orders }
    }

    /// Module names in registration order.
    pub fn modules(&self) -> &[String] {
        self.modules.names()
    }

    pub fn module(&self, name: &str) -> Option<&dyn AppModule> {
        self.modules.get(name)
    }

    pub fn order(&self, phase: Phase) -> &[String] {
        self.orders.get(phase)
    }

    pub fn order_init_genesis(&self) -> &[String] {
        self.order(Phase::InitGenesis)
    }

    pub fn order_export_genesis(&self) -> &[String] {
        self.order(Phase::ExportGenesis)
    }

    pub fn order_begin_blockers(&self) -> &[String] {
        self.order(Phase::BeginBlock)
    }

    pub fn order_end_blockers(&self) -> &[String] {
        self.order(Phase::EndBlock)
    }

    pub fn register_types(&self, registry: &mut TypeRegistry) -> Result<(), Error> {
        self.modules.register_types(registry)
    }

    pub fn default_genesis(&self) -> GenesisState {
        self.modules.default_genesis()
    }

    pub fn validate_genesis(&self, genesis: &GenesisState) -> Result<(), Error> {
        self.modules.validate_genesis(genesis)
    }

    pub fn register_invariants(&self, registry: &mut dyn InvariantRegistry) {
        for module in self.modules.iter() {
            debug!("Registering invariants of module {}", module.name());
            module.register_invariants(registry);
        }
    }

    /// Adds the handler and querier of every module that has them.
    pub fn register_routes(
        &self,
        router: &mut Router,
        query_router: &mut QueryRouter,
    ) -> Result<(), ManagerError> {
        for module in self.modules.iter() {
            if let (Some(route), Some(handler)) = (module.route(), module.new_handler()) {
                debug!("Adding route {} for module {}", route, module.name());
                router.add_route(route, handler)?;
            }
            if let (Some(route), Some(querier)) =
                (module.querier_route(), module.new_querier_handler())
            {
                debug!("Adding querier route {} for module {}", route, module.name());
                query_router.add_route(route, querier)?;
            }
        }
        Ok(())
    }

    pub fn add_tx_commands(&self, root: Command) -> Command {
        self.modules.add_tx_commands(root)
    }

    pub fn add_query_commands(&self, root: Command) -> Command {
        self.modules.add_query_commands(root)
    }

    /// Modules of `phase` in order, mutably.
    fn for_each_in_order<T>(
        &mut self,
        phase: Phase,
        mut f: impl FnMut(&mut dyn AppModule) -> Result<Vec<T>, Error>,
    ) -> Result<Vec<T>, Error> {
        let mut results = vec![];
        for name in self.orders.get(phase) {
            let module = self
                .modules
                .get_mut(name)
                .ok_or_else(|| ManagerError::ModuleNotFound { name: name.clone() })?;
            debug!("Running {} for module {}", phase, name);
            let mut out = f(module).map_err(|e| Error::module(name.as_str(), e))?;
            results.append(&mut out);
        }
        Ok(results)
    }

    /// Imports the genesis documents in init genesis order, skipping modules that have none,
    /// and returns all validator updates in that order.
    pub fn init_genesis(
        &mut self,
        ctx: &Context,
        genesis: &GenesisState,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        self.for_each_in_order(Phase::InitGenesis, |module| {
            match genesis.get(module.name()) {
                Some(doc) => module.init_genesis(ctx, doc),
                None => {
                    debug!("No genesis for module {}, skipping", module.name());
                    Ok(vec![])
                }
            }
        })
    }

    pub fn export_genesis(&self, ctx: &Context) -> Result<GenesisState, Error> {
        let mut genesis = GenesisState::new();
        for name in self.orders.get(Phase::ExportGenesis) {
            let module = self
                .modules
                .get(name)
                .ok_or_else(|| ManagerError::ModuleNotFound { name: name.clone() })?;
            debug!("Exporting genesis of module {}", name);
            let doc = module
                .export_genesis(ctx)
                .map_err(|e| Error::module(name.as_str(), e))?;
            genesis.insert(name.clone(), doc);
        }
        Ok(genesis)
    }

    pub fn begin_block(
        &mut self,
        ctx: &Context,
        request: &RequestBeginBlock,
    ) -> Result<Vec<Event>, Error> {
        self.for_each_in_order(Phase::BeginBlock, |module| {
            module.begin_block(ctx, request)
        })
    }

    pub fn end_block(
        &mut self,
        ctx: &Context,
        request: &RequestEndBlock,
    ) -> Result<Vec<ValidatorUpdate>, Error> {
        self.for_each_in_order(Phase::EndBlock, |module| module.end_block(ctx, request))
    }
}
