use modchain_store::context::Store;
use modchain_store::impls::SharedStore;
use modchain_store::types::{Height, JsonStore, Path, TypedStore};
use tracing::{debug, trace};

use super::error::Error as StakingError;
use super::path::{HistoricalInfoPath, LastValidatorsPath, ParamsPath, HISTORICAL_INFO_PREFIX};
use super::types::{HistoricalInfo, Params, Validator};
use crate::context::Context;
use crate::error::Error as AppError;

/// State of the staking module: its params, the last validator set and the historical info
/// of recent heights.
#[derive(Clone)]
pub struct Keeper<S> {
    params: JsonStore<SharedStore<S>, ParamsPath, Params>,
    last_validators: JsonStore<SharedStore<S>, LastValidatorsPath, Vec<Validator>>,
    historical_info: JsonStore<SharedStore<S>, HistoricalInfoPath, HistoricalInfo>,
}

impl<S: Store> Keeper<S> {
    pub fn new(store: SharedStore<S>) -> Self {
        Self {
            params: TypedStore::new(store.clone()),
            last_validators: TypedStore::new(store.clone()),
            historical_info: TypedStore::new(store),
        }
    }

    pub fn params(&self) -> Result<Params, AppError> {
        self.params
            .get(Height::Pending, &ParamsPath)?
            .ok_or_else(|| StakingError::MissingParams.into())
    }

    pub fn set_params(&mut self, params: Params) -> Result<(), AppError> {
        params.validate()?;
        self.params.set(ParamsPath, params)?;
        Ok(())
    }

    /// The retention window, as currently set in the params.
    pub fn historical_entries(&self) -> Result<u32, AppError> {
        Ok(self.params()?.historical_entries)
    }

    pub fn last_validators(&self) -> Result<Vec<Validator>, AppError> {
        Ok(self
            .last_validators
            .get(Height::Pending, &LastValidatorsPath)?
            .unwrap_or_default())
    }

    pub fn set_last_validators(&mut self, validators: Vec<Validator>) -> Result<(), AppError> {
        self.last_validators.set(LastValidatorsPath, validators)?;
        Ok(())
    }

    /// Returns `Ok(None)` when nothing is stored at `height`. A stored entry that cannot be
    /// decoded is an error.
    pub fn get_historical_info(&self, height: u64) -> Result<Option<HistoricalInfo>, AppError> {
        Ok(self
            .historical_info
            .get(Height::Pending, &HistoricalInfoPath(height))?)
    }

    pub fn set_historical_info(
        &mut self,
        height: u64,
        info: HistoricalInfo,
    ) -> Result<(), AppError> {
        trace!("Saving historical info at height {}", height);
        self.historical_info.set(HistoricalInfoPath(height), info)?;
        Ok(())
    }

    pub fn delete_historical_info(&mut self, height: u64) {
        self.historical_info.delete(HistoricalInfoPath(height))
    }

    /// Stores the historical info of the block in `ctx` and prunes the entries that fell out of
    /// the retention window.
    ///
    /// Pruning walks down from `height - entries - 1` and stops at the first height without an
    /// entry. Stored heights are contiguous, so this removes the whole backlog when the window
    /// shrinks. With a window of zero nothing is stored.
    pub fn track_historical_info(&mut self, ctx: &Context) -> Result<(), AppError> {
        let entries = u64::from(self.historical_entries()?);
        let current = ctx.block_height();

        if let Some(start) = current.checked_sub(entries + 1) {
            for height in (0..=start).rev() {
                if self.get_historical_info(height)?.is_none() {
                    break;
                }
                debug!("Pruning historical info at height {}", height);
                self.delete_historical_info(height);
            }
        }

        if entries == 0 {
            return Ok(());
        }

        let info = HistoricalInfo::new(ctx.header().clone(), self.last_validators()?);
        self.set_historical_info(current, info)
    }

    /// Every height with stored historical info, ascending.
    pub fn historical_heights(&self) -> Vec<u64> {
        let mut heights: Vec<u64> = self
            .historical_info
            .get_keys(&Path::from(HISTORICAL_INFO_PREFIX))
            .iter()
            .filter_map(|path| path.last()?.as_str().parse().ok())
            .collect();
        heights.sort_unstable();
        heights
    }

    /// Fails if the stored heights have a gap.
    pub fn check_historical_contiguity(&self) -> Result<(), AppError> {
        let heights = self.historical_heights();
        match heights.windows(2).find(|pair| pair[1] != pair[0] + 1) {
            Some(pair) => Err(StakingError::HistoryGap {
                height: pair[0] + 1,
            }
            .into()),
            None => Ok(()),
        }
    }
}
