pub(crate) mod codec;
pub(crate) mod sync;

pub use codec::*;
pub use sync::{SharedRw, SharedRwExt};
