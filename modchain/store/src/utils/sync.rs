use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SharedRw<T> = Arc<RwLock<T>>;

/// Lock access for shared state. A poisoned lock means a writer panicked mid-update and the
/// state can no longer be trusted, so both accessors panic on it.
pub trait SharedRwExt<T> {
    fn read_access(&self) -> RwLockReadGuard<'_, T>;
    fn write_access(&self) -> RwLockWriteGuard<'_, T>;
}

impl<T> SharedRwExt<T> for SharedRw<T> {
    fn read_access(&self) -> RwLockReadGuard<'_, T> {
        self.read().expect("poisoned lock")
    }

    fn write_access(&self) -> RwLockWriteGuard<'_, T> {
        self.write().expect("poisoned lock")
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    #[should_panic(expected = "poisoned lock")]
    fn poisoned_lock_is_fatal() {
        let shared: SharedRw<u64> = Arc::new(RwLock::new(0));
        let writer = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = writer.write_access();
            panic!("writer failed mid-update");
        })
        .join();

        let _guard = shared.read_access();
    }
}
