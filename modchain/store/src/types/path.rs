use core::fmt::{Display, Formatter};

use super::Identifier;

/// A `/`-separated store key.
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Hash)]
pub struct Path(Vec<Identifier>);

impl Path {
    /// Returns `true` if every segment of `prefix` matches the leading segments of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns the last segment of the path.
    pub fn last(&self) -> Option<&Identifier> {
        self.0.last()
    }
}

impl From<String> for Path {
    fn from(s: String) -> Self {
        let identifiers = s
            .split('/') // split will never return an empty iterator
            .map(|part| Identifier::from(part.to_owned()))
            .collect();
        Self(identifiers)
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        s.to_owned().into()
    }
}

impl From<Identifier> for Path {
    fn from(id: Identifier) -> Self {
        Self(vec![id])
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .map(|iden| iden.as_str().to_owned())
                .collect::<Vec<String>>()
                .join("/")
        )
    }
}
