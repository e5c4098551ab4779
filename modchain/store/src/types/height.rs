/// Block height
pub type RawHeight = u64;

/// Store height to query
#[derive(Debug, Copy, Clone, Eq, Ord, PartialEq, PartialOrd)]
pub enum Height {
    /// Uncommitted writes of the block being executed
    Pending,
    /// Last committed block
    Latest,
    /// A specific committed block
    Stable(RawHeight),
}
