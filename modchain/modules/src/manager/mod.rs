//! Ordered module management.
//!
//! A [`ManagerBuilder`] collects modules and the order each lifecycle phase runs them in, and
//! [`build`](ManagerBuilder::build) freezes it into a [`Manager`] that can only drive the phases.
//! [`BasicManager`] offers the stateless phases over modules that have no state at all.

mod basic;
mod builder;
mod error;
mod impls;
mod order;
mod registry;

pub use basic::BasicManager;
pub use builder::ManagerBuilder;
pub use error::Error;
pub use impls::Manager;
pub use order::{ModuleOrders, Phase};
pub use registry::ModuleRegistry;
