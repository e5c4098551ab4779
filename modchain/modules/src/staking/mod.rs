mod error;
mod impls;
mod keeper;
mod path;
mod query;
mod types;

pub use error::*;
pub use impls::*;
pub use keeper::*;
pub use path::*;
pub use query::*;
pub use types::*;
