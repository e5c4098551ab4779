use core::convert::Infallible;

use sha2::{Digest, Sha256};
use tracing::trace;

use crate::context::{ProvableStore, Store};
use crate::types::{Height, Path, RawHeight, State};

/// An in-memory store backed by ordered maps, one per committed height.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    /// collection of states corresponding to every committed block height
    store: Vec<State>,
    /// staged changes waiting to be committed
    /// these changes are from successful transactions
    staged: State,
    /// dirty changes that are not complete
    /// middle of a transaction which may fail
    pending: State,
}

impl InMemoryStore {
    #[inline]
    fn get_state(&self, height: Height) -> Option<&State> {
        match height {
            Height::Pending => Some(&self.pending),
            Height::Latest => self.store.last(),
            Height::Stable(height) => {
                if height == 0 {
                    None
                } else {
                    let h = height as usize;
                    self.store.get(h - 1)
                }
            }
        }
    }
}

/// SHA-256 over the length-prefixed keys and values of `state`, in key order. The empty state
/// hashes to 32 zero bytes.
fn state_hash(state: &State) -> Vec<u8> {
    if state.is_empty() {
        return vec![0u8; 32];
    }

    let mut hasher = Sha256::new();
    for (path, value) in state {
        let key = path.to_string();
        hasher.update((key.len() as u64).to_be_bytes());
        hasher.update(key.as_bytes());
        hasher.update((value.len() as u64).to_be_bytes());
        hasher.update(value);
    }
    hasher.finalize().to_vec()
}

impl Store for InMemoryStore {
    type Error = Infallible;

    fn set(&mut self, path: Path, value: Vec<u8>) -> Result<Option<Vec<u8>>, Self::Error> {
        trace!("set at path = {}", path);
        Ok(self.pending.insert(path, value))
    }

    fn get(&self, height: Height, path: &Path) -> Option<Vec<u8>> {
        trace!("get at path = {} at height = {:?}", path, height);
        self.get_state(height).and_then(|v| v.get(path).cloned())
    }

    fn delete(&mut self, path: &Path) {
        trace!("delete at path = {}", path);
        self.pending.remove(path);
    }

    fn commit(&mut self) -> Result<Vec<u8>, Self::Error> {
        self.apply()?;
        trace!("committing height: {}", self.current_height());
        self.store.push(self.staged.clone());
        Ok(self.root_hash())
    }

    fn apply(&mut self) -> Result<(), Self::Error> {
        trace!("applying height: {}", self.current_height());
        self.staged = self.pending.clone();
        Ok(())
    }

    fn reset(&mut self) {
        trace!("resetting height: {}", self.current_height());
        self.pending = self.staged.clone();
    }

    fn current_height(&self) -> RawHeight {
        self.store.len() as RawHeight
    }

    fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.pending
            .keys()
            .filter(|key| key.starts_with(key_prefix))
            .cloned()
            .collect()
    }
}

impl ProvableStore for InMemoryStore {
    fn root_hash(&self) -> Vec<u8> {
        self.get_state(Height::Latest)
            .map(state_hash)
            .unwrap_or_else(|| vec![0u8; 32])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store() {
        let mut store = InMemoryStore::default();
        assert!(!store.root_hash().is_empty());
        assert_eq!(store.current_height(), 0);

        let path = Path::from("a".to_owned());
        let value1 = vec![1, 2, 3];
        let value2 = vec![4, 5, 6];

        store.set(path.clone(), value1.clone()).unwrap();
        assert_eq!(store.get(Height::Pending, &path), Some(value1.clone()));
        assert_eq!(store.get(Height::Latest, &path), None);
        assert_eq!(store.get(Height::Stable(1), &path), None);

        store.commit().unwrap();

        assert_eq!(store.get(Height::Pending, &path), Some(value1.clone()));
        assert_eq!(store.get(Height::Latest, &path), Some(value1.clone()));
        assert_eq!(store.get(Height::Stable(1), &path), Some(value1.clone()));
        assert_eq!(store.get(Height::Stable(2), &path), None);
        assert_eq!(store.current_height(), 1);
        let first_hash = store.root_hash();

        store.set(path.clone(), value2.clone()).unwrap();
        store.commit().unwrap();

        assert_eq!(store.get(Height::Latest, &path), Some(value2.clone()));
        assert_eq!(store.get(Height::Stable(1), &path), Some(value1));
        assert_eq!(store.get(Height::Stable(2), &path), Some(value2));
        assert_eq!(store.current_height(), 2);
        assert_ne!(store.root_hash(), first_hash);
    }

    #[test]
    fn delete_removes_pending_value_only() {
        let mut store = InMemoryStore::default();
        let path = Path::from("a/b");
        store.set(path.clone(), vec![1]).unwrap();
        store.commit().unwrap();

        store.delete(&path);
        store.delete(&Path::from("absent"));
        assert_eq!(store.get(Height::Pending, &path), None);
        assert_eq!(store.get(Height::Latest, &path), Some(vec![1]));
    }

    #[test]
    fn reset_discards_unapplied_changes() {
        let mut store = InMemoryStore::default();
        store.set(Path::from("kept"), vec![1]).unwrap();
        store.apply().unwrap();
        store.set(Path::from("dropped"), vec![2]).unwrap();
        store.reset();

        assert_eq!(store.get(Height::Pending, &Path::from("kept")), Some(vec![1]));
        assert_eq!(store.get(Height::Pending, &Path::from("dropped")), None);
    }

    #[test]
    fn keys_are_listed_in_order_by_prefix() {
        let mut store = InMemoryStore::default();
        for key in ["p/3", "p/1", "q/1", "p/2"] {
            store.set(Path::from(key), vec![]).unwrap();
        }
        let keys: Vec<String> = store
            .get_keys(&Path::from("p"))
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, vec!["p/1", "p/2", "p/3"]);
    }
}
