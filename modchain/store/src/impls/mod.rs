pub(crate) mod in_memory;
pub(crate) mod revertible;
pub(crate) mod shared;

pub use in_memory::InMemoryStore;
pub use revertible::RevertibleStore;
pub use shared::SharedStore;
