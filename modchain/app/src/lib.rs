//! The modchain application: modules assembled behind a module manager and driven through
//! the block lifecycle.
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

mod lifecycle;
pub use lifecycle::{AppInfo, InitChainResponse};

mod builder;
pub use builder::{App, Builder, ModuleStore};
