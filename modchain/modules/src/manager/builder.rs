use tracing::debug;

use super::error::Error;
use super::impls::Manager;
use super::order::{check_permutation, ModuleOrders, Phase};
use super::registry::ModuleRegistry;
use crate::context::AppModule;
use crate::types::ModuleList;

/// Collects modules and the order every phase runs them in.
///
/// All orders start out as the registration order. Once [`build`](ManagerBuilder::build) is
/// called the orders can no longer change.
#[derive(Default)]
pub struct ManagerBuilder {
    modules: ModuleRegistry<dyn AppModule>,
    orders: ModuleOrders,
}

impl ManagerBuilder {
    pub fn new(modules: ModuleList) -> Result<Self, Error> {
        modules
            .into_iter()
            .try_fold(Self::default(), |builder, module| builder.add_module(module))
    }

    /// Registers `module`, appending it to the end of every order.
    pub fn add_module(mut self, module: Box<dyn AppModule>) -> Result<Self, Error> {
        let name = module.name().to_owned();
        self.modules.register(module)?;
        self.orders.push(&name);
        Ok(self)
    }

    /// Replaces the order of `phase`. `names` must name every registered module exactly once,
    /// otherwise the order is left as it was.
    pub fn set_order(&mut self, phase: Phase, names: Vec<String>) -> Result<(), Error> {
        check_permutation(phase, self.modules.names(), &names)?;
        debug!("Setting {} order to {:?}", phase, names);
        self.orders.set(phase, names);
        Ok(())
    }

    pub fn set_order_init_genesis(&mut self, names: Vec<String>) -> Result<(), Error> {
        self.set_order(Phase::InitGenesis, names)
    }

    pub fn set_order_export_genesis(&mut self, names: Vec<String>) -> Result<(), Error> {
        self.set_order(Phase::ExportGenesis, names)
    }

    pub fn set_order_begin_blockers(&mut self, names: Vec<String>) -> Result<(), Error> {
        self.set_order(Phase::BeginBlock, names)
    }

    pub fn set_order_end_blockers(&mut self, names: Vec<String>) -> Result<(), Error> {
        self.set_order(Phase::EndBlock, names)
    }

    pub fn modules(&self) -> &[String] {
        self.modules.names()
    }

    pub fn order(&self, phase: Phase) -> &[String] {
        self.orders.get(phase)
    }

    pub fn build(self) -> Manager {
        Manager::new(self.modules, self.orders)
    }
}
