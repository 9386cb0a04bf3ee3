//! Lock-guarded shared count store.
//!
//! A single count store may only be mutated by one writer at a time;
//! the read-modify-write inside [`CountStore::increment`] is not safe
//! to interleave. [`SharedCountStore`] is the explicit mutual-exclusion
//! discipline for the multi-writer case: a cloneable handle wrapping
//! the inner store in a `parking_lot::Mutex`, taking the lock for the
//! whole increment so the returned total is the one produced by that
//! exact increment.
//!
//! It also lets a host keep a handle to a store that has been moved
//! into a running pipeline, for inspection after shutdown.

use std::sync::Arc;

use parking_lot::Mutex;

use super::CountStore;

/// Cloneable, lock-guarded wrapper around a [`CountStore`].
pub struct SharedCountStore<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedCountStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CountStore> SharedCountStore<S> {
    /// Wraps `store` for shared access.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Increments `word` under the lock and returns the new total.
    pub fn increment(&self, word: &str) -> u64 {
        self.inner.lock().increment(word)
    }

    /// Returns the current count for `word`, `0` if absent.
    #[must_use]
    pub fn get(&self, word: &str) -> u64 {
        self.inner.lock().get(word)
    }

    /// Number of distinct words seen.
    #[must_use]
    pub fn distinct_words(&self) -> usize {
        self.inner.lock().distinct_words()
    }

    /// Unordered point-in-time copy of all entries.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        self.inner.lock().snapshot()
    }
}

impl<S: CountStore> CountStore for SharedCountStore<S> {
    fn increment(&mut self, word: &str) -> u64 {
        self.inner.lock().increment(word)
    }

    fn get(&self, word: &str) -> u64 {
        self.inner.lock().get(word)
    }

    fn distinct_words(&self) -> usize {
        self.inner.lock().distinct_words()
    }

    fn size_bytes(&self) -> usize {
        self.inner.lock().size_bytes()
    }

    fn snapshot(&self) -> Vec<(String, u64)> {
        self.inner.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::super::AHashCountStore;
    use super::*;

    #[test]
    fn test_clones_see_the_same_counts() {
        let store = SharedCountStore::new(AHashCountStore::new());
        let other = store.clone();

        store.increment("a");
        other.increment("a");

        assert_eq!(store.get("a"), 2);
        assert_eq!(other.get("a"), 2);
    }

    #[test]
    fn test_concurrent_increments_lose_nothing() {
        const THREADS: usize = 8;
        const PER_THREAD: u64 = 1_000;

        let store = SharedCountStore::new(AHashCountStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..PER_THREAD {
                        store.increment("contended");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get("contended"), THREADS as u64 * PER_THREAD);
    }

    #[test]
    fn test_increment_total_is_exact_under_contention() {
        // Each observed total must be unique: the lock covers the whole
        // read-modify-write, so no two increments report the same value.
        const THREADS: usize = 4;
        const PER_THREAD: usize = 500;

        let store = SharedCountStore::new(AHashCountStore::new());
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..PER_THREAD)
                        .map(|_| store.increment("w"))
                        .collect::<Vec<u64>>()
                })
            })
            .collect();

        let mut seen: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        seen.sort_unstable();
        let expected: Vec<u64> = (1..=(THREADS * PER_THREAD) as u64).collect();
        assert_eq!(seen, expected);
    }
}
