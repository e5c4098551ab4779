use displaydoc::Display;

use crate::error::Error as AppError;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// invalid genesis: `{reason}`
    InvalidGenesis { reason: String },
    /// invalid params: `{reason}`
    InvalidParams { reason: String },
    /// staking params are not set
    MissingParams,
    /// historical info is not contiguous: no entry at height `{height}`
    HistoryGap { height: u64 },
    /// no historical info at height `{height}`
    HistoricalInfoNotFound { height: u64 },
    /// invalid query: `{reason}`
    InvalidQuery { reason: String },
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        AppError::Staking(e)
    }
}
