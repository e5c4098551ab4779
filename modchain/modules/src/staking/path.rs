use derive_more::Display;

/// Prefix under which historical info entries are stored.
pub const HISTORICAL_INFO_PREFIX: &str = "historicalInfo";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "historicalInfo/{}", _0)]
pub struct HistoricalInfoPath(pub u64);

impl HistoricalInfoPath {
    pub fn height(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display(fmt = "params")]
pub struct ParamsPath;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[display(fmt = "lastValidators")]
pub struct LastValidatorsPath;
