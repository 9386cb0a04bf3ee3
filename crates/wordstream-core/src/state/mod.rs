//! # Count Store Module
//!
//! In-memory word→count storage for the streaming aggregator.
//!
//! ## Design Goals
//!
//! - **O(1) increment** on the hot path, no allocation for known words
//! - **Unbounded keys**, limited only by memory
//! - **Single-writer** by default; explicit disciplines for sharing
//!
//! ## Backends
//!
//! - [`AHashCountStore`]: `AHashMap`-backed, the default
//! - [`PartitionedCountStore`]: word-hash sharding across independent
//!   stores, the scale-out discipline for one-writer-per-shard setups
//! - [`SharedCountStore`]: lock-guarded wrapper for the case where more
//!   than one aggregator must touch a single store
//!
//! Stores are volatile: no eviction, no expiry, no persistence. A
//! production deployment would checkpoint and restore them through its
//! hosting collaborator.

mod partitioned;
mod shared;

pub use partitioned::PartitionedCountStore;
pub use shared::SharedCountStore;

use ahash::AHashMap;

/// Trait for word→count store implementations.
///
/// Invariant: after a sequence of `increment` calls, `get(w)` equals
/// the number of `increment(w)` calls made since creation. Counts never
/// decrease and entries never expire.
pub trait CountStore: Send {
    /// Adds one to `word`'s count and returns the new total.
    fn increment(&mut self, word: &str) -> u64;

    /// Returns the current count for `word`, `0` if never seen.
    fn get(&self, word: &str) -> u64;

    /// Number of distinct words ever seen.
    fn distinct_words(&self) -> usize;

    /// `true` if no word has been counted yet.
    fn is_empty(&self) -> bool {
        self.distinct_words() == 0
    }

    /// Approximate memory footprint in bytes (keys + counts).
    fn size_bytes(&self) -> usize;

    /// Unordered point-in-time copy of all entries.
    ///
    /// Intended for diagnostics and tests, not the hot path.
    fn snapshot(&self) -> Vec<(String, u64)>;
}

/// Default count store backed by [`AHashMap`].
///
/// Increments for already-seen words mutate in place; only the first
/// occurrence of a word allocates its key.
#[derive(Debug, Default)]
pub struct AHashCountStore {
    counts: AHashMap<Box<str>, u64>,
    /// Running size accounting (keys + count cells).
    size_bytes: usize,
}

impl AHashCountStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-allocated capacity for distinct words.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            counts: AHashMap::with_capacity(capacity),
            size_bytes: 0,
        }
    }
}

impl CountStore for AHashCountStore {
    fn increment(&mut self, word: &str) -> u64 {
        if let Some(count) = self.counts.get_mut(word) {
            *count += 1;
            *count
        } else {
            self.size_bytes += word.len() + std::mem::size_of::<u64>();
            self.counts.insert(Box::from(word), 1);
            1
        }
    }

    #[inline]
    fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    fn distinct_words(&self) -> usize {
        self.counts.len()
    }

    fn size_bytes(&self) -> usize {
        self.size_bytes
    }

    fn snapshot(&self) -> Vec<(String, u64)> {
        self.counts
            .iter()
            .map(|(word, count)| (word.to_string(), *count))
            .collect()
    }
}
