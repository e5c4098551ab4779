use std::path::Path;

use modchain_app::{App, AppInfo, Builder, ModuleStore};
use modchain_modules::context::{prefix, Identifiable};
use modchain_modules::error::Error;
use modchain_modules::helper::new_header;
use modchain_modules::manager::BasicManager;
use modchain_modules::staking::{Staking, StakingBasic};
use modchain_modules::types::GenesisState;
use modchain_store::impls::InMemoryStore;
use serde_derive::Serialize;
use tracing::info;

use crate::config::Config;

/// The stateless view of every module of the chain.
pub fn basic_manager() -> Result<BasicManager, Error> {
    Ok(BasicManager::new(vec![Box::new(StakingBasic)])?)
}

/// Reads a genesis file, or returns the default genesis when `path` is `None`.
pub fn load_genesis(path: Option<&Path>, modules: &BasicManager) -> Result<GenesisState, Error> {
    match path {
        None => Ok(modules.default_genesis()),
        Some(path) => {
            let genesis = std::fs::read(path).map_err(|e| Error::Custom {
                reason: format!("cannot read genesis file {}: {e}", path.display()),
            })?;
            serde_json::from_slice(&genesis).map_err(|e| Error::Custom {
                reason: format!("genesis file {} isn't valid JSON: {e}", path.display()),
            })
        }
    }
}

/// An application over an in-memory store, run block by block.
pub struct Simulation {
    pub app: App<InMemoryStore>,
    pub staking: Staking<ModuleStore<InMemoryStore>>,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub info: AppInfo,
    pub historical_heights: Vec<u64>,
    pub genesis: GenesisState,
}

impl Simulation {
    /// Assembles the application, applying the module orders of `cfg`.
    pub fn new(cfg: &Config) -> Result<Self, Error> {
        let mut builder = Builder::new(InMemoryStore::default());
        let staking = Staking::new(builder.module_store(&prefix::Staking.identifier()));

        let mut builder = builder.add_module(staking.clone())?;
        for (phase, names) in cfg.ordering.overrides() {
            builder.set_order(phase, names)?;
        }

        Ok(Self {
            app: builder.build()?,
            staking,
        })
    }

    /// Starts the chain from `genesis` and runs `blocks` blocks, checking invariants after each.
    pub fn run(cfg: &Config, genesis: &GenesisState, blocks: u64) -> Result<Self, Error> {
        let simulation = Self::new(cfg)?;
        let chain_id = cfg.chain.chain_id.as_str();
        let app_state = serde_json::to_vec(genesis).map_err(|e| Error::Custom {
            reason: e.to_string(),
        })?;

        simulation
            .app
            .init_chain(new_header(chain_id, 1)?, &app_state)?;

        for height in 1..=blocks {
            simulation.app.begin_block(new_header(chain_id, height)?)?;
            simulation.app.end_block()?;
            simulation.app.commit()?;
            simulation.app.assert_invariants()?;
        }
        info!("Simulated {} blocks on chain {}", blocks, chain_id);

        Ok(simulation)
    }

    pub fn report(&self) -> Result<SimulationReport, Error> {
        Ok(SimulationReport {
            info: self.app.info(),
            historical_heights: self.staking.keeper().historical_heights(),
            genesis: self.app.export_genesis()?,
        })
    }
}
