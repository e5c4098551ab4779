#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod cli;
pub mod config;
mod runner;

pub use runner::{basic_manager, load_genesis, Simulation, SimulationReport};

/// Re-exports modchain's store types and implementations.
pub mod store {
    pub use modchain_store::*;
}

/// Re-exports modchain's modules types and implementations.
pub mod modules {
    pub use modchain_modules::*;
}

/// Re-exports modchain's application types and implementations.
pub mod app {
    pub use modchain_app::*;
}
