//! Word-hash partitioned count store.
//!
//! Shards counts across a fixed number of independent
//! [`AHashCountStore`]s, routed by a hash of the word. Because every
//! occurrence of a word lands in the same shard, per-shard totals equal
//! the totals a single flat store would hold.
//!
//! This is the scale-out discipline for multiple aggregators: give each
//! its own shard (one writer per shard) instead of sharing one map.

use std::hash::BuildHasher;

use super::{AHashCountStore, CountStore};

/// Count store sharded by word hash.
pub struct PartitionedCountStore {
    shards: Vec<AHashCountStore>,
    hasher: ahash::RandomState,
}

impl PartitionedCountStore {
    /// Creates a store with `shards` partitions.
    ///
    /// # Panics
    ///
    /// Panics if `shards` is zero.
    #[must_use]
    pub fn new(shards: usize) -> Self {
        assert!(shards > 0, "Shard count must be positive");
        Self {
            shards: (0..shards).map(|_| AHashCountStore::new()).collect(),
            hasher: ahash::RandomState::new(),
        }
    }

    /// Number of shards.
    #[must_use]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Shard index that `word` routes to. Stable for the lifetime of
    /// this store instance.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn shard_for(&self, word: &str) -> usize {
        (self.hasher.hash_one(word) % self.shards.len() as u64) as usize
    }

    /// Read access to an individual shard.
    ///
    /// Returns `None` if `idx` is out of range.
    #[must_use]
    pub fn shard(&self, idx: usize) -> Option<&AHashCountStore> {
        self.shards.get(idx)
    }
}

impl CountStore for PartitionedCountStore {
    fn increment(&mut self, word: &str) -> u64 {
        let idx = self.shard_for(word);
        self.shards[idx].increment(word)
    }

    fn get(&self, word: &str) -> u64 {
        self.shards[self.shard_for(word)].get(word)
    }

    fn distinct_words(&self) -> usize {
        self.shards.iter().map(CountStore::distinct_words).sum()
    }

    fn size_bytes(&self) -> usize {
        self.shards.iter().map(CountStore::size_bytes).sum()
    }

    fn snapshot(&self) -> Vec<(String, u64)> {
        self.shards.iter().flat_map(CountStore::snapshot).collect()
    }
}
