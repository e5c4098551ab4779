mod height;
mod identifier;
mod path;
mod store;

pub use height::{Height, RawHeight};
pub use identifier::Identifier;
pub use path::Path;
pub use store::{JsonStore, MainStore, State, TypedStore};
