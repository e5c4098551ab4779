use displaydoc::Display;
use modchain_store::Error as StoreError;

use crate::manager::Error as ManagerError;
use crate::staking::Error as StakingError;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// no module could handle specified message
    NotHandled,
    /// custom error: `{reason}`
    Custom { reason: String },
    /// module manager error: `{0}`
    Manager(ManagerError),
    /// module `{module}` failed: {error}
    Module { module: String, error: Box<Error> },
    /// store error: `{0}`
    Store(StoreError),
    /// staking module error: `{0}`
    Staking(StakingError),
    /// invariant `{route}` broken: {reason}
    InvariantBroken { route: String, reason: String },
}

impl Error {
    /// Wraps an error raised by the module called `module`.
    pub fn module(module: impl Into<String>, error: Error) -> Self {
        Self::Module {
            module: module.into(),
            error: Box::new(error),
        }
    }

    /// Returns the innermost error, looking through any module wrapping.
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Module { error, .. } => error.root_cause(),
            other => other,
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}
