use displaydoc::Display;

#[derive(Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// failed to encode value for path `{path}`
    Encode { path: String },
    /// value stored at path `{path}` could not be decoded
    Corrupted { path: String },
    /// backing store error: `{reason}`
    Backend { reason: String },
}
