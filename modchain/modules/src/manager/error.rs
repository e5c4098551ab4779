use displaydoc::Display;

use super::order::Phase;
use crate::error::Error as AppError;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// module name must not be empty
    EmptyModuleName,
    /// module `{name}` is already registered
    DuplicateModule { name: String },
    /// {phase} order names unknown module `{name}`
    UnknownModule { phase: Phase, name: String },
    /// {phase} order lists module `{name}` more than once
    DuplicateInOrder { phase: Phase, name: String },
    /// {phase} order is missing module `{name}`
    MissingFromOrder { phase: Phase, name: String },
    /// route `{route}` is already taken
    DuplicateRoute { route: String },
    /// querier route `{route}` is already taken
    DuplicateQuerierRoute { route: String },
    /// invalid route `{route}`: must be non-empty and alphanumeric
    InvalidRoute { route: String },
    /// type `{type_url}` is already handled by route `{route}`
    DuplicateType { type_url: String, route: String },
    /// no module named `{name}`
    ModuleNotFound { name: String },
}

impl From<Error> for AppError {
    fn from(e: Error) -> Self {
        AppError::Manager(e)
    }
}
