use std::path::Path;

use modchain_modules::error::Error;
use modchain_modules::manager::Phase;
use serde_derive::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
    pub global: GlobalConfig,
    pub chain: ChainConfig,
    #[serde(default)]
    pub ordering: OrderingConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChainConfig {
    pub chain_id: String,
}

/// Module order overrides. A phase that is not set runs modules in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrderingConfig {
    pub init_genesis: Option<Vec<String>>,
    pub export_genesis: Option<Vec<String>>,
    pub begin_blockers: Option<Vec<String>>,
    pub end_blockers: Option<Vec<String>>,
}

impl OrderingConfig {
    /// The phases whose order is overridden, with their order.
    pub fn overrides(&self) -> Vec<(Phase, Vec<String>)> {
        [
            (Phase::InitGenesis, &self.init_genesis),
            (Phase::ExportGenesis, &self.export_genesis),
            (Phase::BeginBlock, &self.begin_blockers),
            (Phase::EndBlock, &self.end_blockers),
        ]
        .into_iter()
        .filter_map(|(phase, names)| names.clone().map(|names| (phase, names)))
        .collect()
    }
}

/// Attempt to load and parse the TOML config file as a `Config`.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, Error> {
    let config_toml = std::fs::read_to_string(&path).map_err(|e| Error::Custom {
        reason: e.to_string(),
    })?;

    let config = toml::from_str::<Config>(&config_toml[..]).map_err(|e| Error::Custom {
        reason: e.to_string(),
    })?;

    Ok(config)
}
