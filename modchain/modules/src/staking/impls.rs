use clap::Command;
use modchain_store::context::Store;
use modchain_store::impls::SharedStore;
use serde_json::Value;
use tendermint::abci::Event;
use tracing::{debug, info};

use super::error::Error as StakingError;
use super::keeper::Keeper;
use super::query::{querier, query_command};
use super::types::StakingGenesis;
use crate::context::{AppModule, AppModuleBasic, AppModuleGenesis, Context};
use crate::error::Error as AppError;
use crate::invariant::InvariantRegistry;
use crate::router::Querier;
use crate::types::{RequestBeginBlock, ValidatorUpdate};

pub const STAKING_MODULE_NAME: &str = "staking";

/// Route of the invariant that checks stored historical info has no gaps.
pub const HISTORICAL_INFO_INVARIANT: &str = "historical-info-contiguous";

/// The staking module. Keeps the validator set and records historical info at every block.
#[derive(Clone)]
pub struct Staking<S> {
    keeper: Keeper<S>,
}

impl<S: Store> Staking<S> {
    pub fn new(store: SharedStore<S>) -> Self {
        Self {
            keeper: Keeper::new(store),
        }
    }

    pub fn keeper(&self) -> &Keeper<S> {
        &self.keeper
    }

    pub fn keeper_mut(&mut self) -> &mut Keeper<S> {
        &mut self.keeper
    }
}

fn parse_genesis(genesis: &Value) -> Result<StakingGenesis, StakingError> {
    serde_json::from_value(genesis.clone()).map_err(|e| StakingError::InvalidGenesis {
        reason: e.to_string(),
    })
}

/// The stateless part of the staking module, usable before any store exists.
#[derive(Clone, Copy, Debug, Default)]
pub struct StakingBasic;

impl AppModuleBasic for StakingBasic {
    fn name(&self) -> &str {
        STAKING_MODULE_NAME
    }

    fn default_genesis(&self) -> Value {
        serde_json::to_value(StakingGenesis::default()).unwrap_or(Value::Null)
    }

    fn validate_genesis(&self, genesis: &Value) -> Result<(), AppError> {
        parse_genesis(genesis)?.validate()?;
        Ok(())
    }

    fn query_command(&self) -> Option<Command> {
        Some(query_command())
    }
}

impl<S: Store + 'static> AppModuleBasic for Staking<S> {
    fn name(&self) -> &str {
        STAKING_MODULE_NAME
    }

    fn default_genesis(&self) -> Value {
        StakingBasic.default_genesis()
    }

    fn validate_genesis(&self, genesis: &Value) -> Result<(), AppError> {
        StakingBasic.validate_genesis(genesis)
    }

    fn query_command(&self) -> Option<Command> {
        StakingBasic.query_command()
    }
}

impl<S: Store + 'static> AppModuleGenesis for Staking<S> {
    fn init_genesis(
        &mut self,
        _ctx: &Context,
        genesis: &Value,
    ) -> Result<Vec<ValidatorUpdate>, AppError> {
        let genesis = parse_genesis(genesis)?;
        genesis.validate()?;

        info!(
            "Staking genesis with {} validators, keeping {} historical entries",
            genesis.validators.len(),
            genesis.params.historical_entries
        );
        let updates = genesis.validators.iter().map(|v| v.to_update()).collect();
        self.keeper.set_params(genesis.params)?;
        self.keeper.set_last_validators(genesis.validators)?;
        Ok(updates)
    }

    fn export_genesis(&self, _ctx: &Context) -> Result<Value, AppError> {
        let genesis = StakingGenesis {
            params: self.keeper.params()?,
            validators: self.keeper.last_validators()?,
        };
        serde_json::to_value(genesis).map_err(|e| AppError::Custom {
            reason: e.to_string(),
        })
    }
}

impl<S: Store + 'static> AppModule for Staking<S> {
    fn register_invariants(&self, registry: &mut dyn InvariantRegistry) {
        let keeper = self.keeper.clone();
        registry.register_route(
            STAKING_MODULE_NAME,
            HISTORICAL_INFO_INVARIANT,
            Box::new(move |_ctx: &Context| keeper.check_historical_contiguity()),
        );
    }

    fn querier_route(&self) -> Option<&str> {
        Some(STAKING_MODULE_NAME)
    }

    fn new_querier_handler(&self) -> Option<Querier> {
        Some(querier(self.keeper.clone()))
    }

    fn begin_block(
        &mut self,
        ctx: &Context,
        _request: &RequestBeginBlock,
    ) -> Result<Vec<Event>, AppError> {
        debug!("Tracking historical info at height {}", ctx.block_height());
        self.keeper.track_historical_info(ctx)?;
        Ok(vec![])
    }
}
