use std::sync::Arc;

use clap::{Arg, Command};
use modchain_store::context::Store;
use serde::Serialize;
use tracing::debug;

use super::error::Error as StakingError;
use super::keeper::Keeper;
use crate::error::Error as AppError;
use crate::router::Querier;
use crate::types::COMMAND_ARGS;

/// Answers `params`, `validators` and `historical-info/{height}` with JSON.
pub fn querier<S: Store + 'static>(keeper: Keeper<S>) -> Querier {
    Arc::new(move |path: &[String], _data: &[u8]| {
        debug!("Staking query: {:?}", path);
        let segments: Vec<&str> = path.iter().map(String::as_str).collect();
        match segments.as_slice() {
            ["params"] => encode(&keeper.params()?),
            ["validators"] => encode(&keeper.last_validators()?),
            ["historical-info", height] => {
                let height = height.parse().map_err(|_| StakingError::InvalidQuery {
                    reason: format!("invalid height `{height}`"),
                })?;
                let info = keeper
                    .get_historical_info(height)?
                    .ok_or(StakingError::HistoricalInfoNotFound { height })?;
                encode(&info)
            }
            _ => Err(StakingError::InvalidQuery {
                reason: format!("unknown query path `{}`", path.join("/")),
            }
            .into()),
        }
    })
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, AppError> {
    serde_json::to_vec(value).map_err(|e| AppError::Custom {
        reason: e.to_string(),
    })
}

pub fn query_command() -> Command {
    Command::new("staking")
        .about("Querying commands for the staking module")
        .subcommand_required(true)
        .subcommand(Command::new("params").about("Query the current staking parameters"))
        .subcommand(Command::new("validators").about("Query the last validator set"))
        .subcommand(
            Command::new("historical-info")
                .about("Query the historical info stored at a height")
                .arg(
                    Arg::new(COMMAND_ARGS)
                        .value_name("HEIGHT")
                        .required(true)
                        .num_args(1),
                ),
        )
}

#[cfg(test)]
mod tests {
    use modchain_store::impls::{InMemoryStore, SharedStore};

    use super::*;
    use crate::context::Context;
    use crate::helper::new_header;
    use crate::staking::{HistoricalInfo, Params};

    fn keeper() -> Keeper<InMemoryStore> {
        let mut keeper = Keeper::new(SharedStore::new(InMemoryStore::default()));
        keeper
            .set_params(Params {
                historical_entries: 2,
                max_validators: 10,
            })
            .unwrap();
        keeper
    }

    fn query(querier: &Querier, path: &[&str]) -> Result<Vec<u8>, AppError> {
        let path: Vec<String> = path.iter().map(|s| s.to_string()).collect();
        querier(&path, &[])
    }

    #[test]
    fn queries_params_and_historical_info() {
        let mut keeper = keeper();
        let ctx = Context::new(new_header("modchain-test", 4).unwrap());
        keeper.track_historical_info(&ctx).unwrap();
        let querier = querier(keeper);

        let params: Params =
            serde_json::from_slice(&query(&querier, &["params"]).unwrap()).unwrap();
        assert_eq!(params.historical_entries, 2);

        let info: HistoricalInfo =
            serde_json::from_slice(&query(&querier, &["historical-info", "4"]).unwrap()).unwrap();
        assert_eq!(info.header.height.value(), 4);
    }

    #[test]
    fn bad_queries_are_rejected() {
        let querier = querier(keeper());

        assert_eq!(
            query(&querier, &["historical-info", "9"]),
            Err(AppError::Staking(StakingError::HistoricalInfoNotFound {
                height: 9
            }))
        );
        assert!(matches!(
            query(&querier, &["historical-info", "nine"]),
            Err(AppError::Staking(StakingError::InvalidQuery { .. }))
        ));
        assert!(matches!(
            query(&querier, &["delegations"]),
            Err(AppError::Staking(StakingError::InvalidQuery { .. }))
        ));
    }

    #[test]
    fn command_collects_height_as_args() {
        let matches = query_command()
            .try_get_matches_from(["staking", "historical-info", "12"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "historical-info");
        let args: Vec<&String> = sub.get_many::<String>(COMMAND_ARGS).unwrap().collect();
        assert_eq!(args, vec!["12"]);
    }
}
