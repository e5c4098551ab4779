#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(
    warnings,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

pub mod codec;
pub mod context;
pub mod error;
pub mod helper;
pub mod invariant;
pub mod manager;
pub mod router;
pub mod staking;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;
