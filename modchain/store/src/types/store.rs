use core::marker::PhantomData;
use std::collections::BTreeMap;

use crate::context::Store;
use crate::error::Error;
use crate::impls::{RevertibleStore, SharedStore};
use crate::types::{Height, Path, RawHeight};
use crate::utils::{Codec, JsonCodec};

// A state type that represents a snapshot of the store at every block.
// The value is a `Vec<u8>` to allow stored types to choose their own serde.
pub type State = BTreeMap<Path, Vec<u8>>;

pub type MainStore<S> = SharedStore<RevertibleStore<S>>;

/// A `TypedStore` that uses the `JsonCodec`
pub type JsonStore<S, K, V> = TypedStore<S, K, JsonCodec<V>>;

/// A typed view over a `Store`. Keys are turned into store paths via `ToString` and values are
/// encoded with the codec `C`.
#[derive(Clone, Debug)]
pub struct TypedStore<S, K, C> {
    store: S,
    _key: PhantomData<K>,
    _codec: PhantomData<C>,
}

impl<S, K, V, C> TypedStore<S, K, C>
where
    S: Store,
    C: Codec<Value = V>,
    K: ToString,
{
    #[inline]
    pub fn new(store: S) -> Self {
        Self {
            store,
            _codec: PhantomData,
            _key: PhantomData,
        }
    }

    #[inline]
    pub fn set(&mut self, path: K, value: V) -> Result<Option<V>, Error> {
        let path = path.to_string();
        let encoded = C::encode(&value).ok_or_else(|| Error::Encode { path: path.clone() })?;
        self.store
            .set(path.into(), encoded.as_ref().to_vec())
            .map(|prev_val| prev_val.and_then(|v| C::decode(&v)))
            .map_err(|e| Error::Backend {
                reason: format!("{e:?}"),
            })
    }

    #[inline]
    pub fn delete(&mut self, path: K) {
        self.store.delete(&path.to_string().into())
    }

    /// Returns `Ok(None)` if nothing is stored at `path` and an error if the stored bytes cannot
    /// be decoded.
    #[inline]
    pub fn get(&self, height: Height, path: &K) -> Result<Option<V>, Error> {
        let path = path.to_string();
        match self.store.get(height, &path.clone().into()) {
            None => Ok(None),
            Some(bytes) => C::decode(&bytes)
                .map(Some)
                .ok_or(Error::Corrupted { path }),
        }
    }

    #[inline]
    pub fn contains(&self, height: Height, path: &K) -> bool {
        self.store.get(height, &path.to_string().into()).is_some()
    }

    #[inline]
    pub fn get_keys(&self, key_prefix: &Path) -> Vec<Path> {
        self.store.get_keys(key_prefix)
    }

    #[inline]
    pub fn current_height(&self) -> RawHeight {
        self.store.current_height()
    }
}
