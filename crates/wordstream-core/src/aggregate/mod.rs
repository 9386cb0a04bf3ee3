//! Streaming count aggregation.
//!
//! The [`Aggregator`] consumes tokens one at a time, updates its count
//! store, and produces one [`Emission`] per token carrying the total
//! produced by that exact increment. Given the same token sequence in
//! the same order it produces the same emission sequence and the same
//! final store state.
//!
//! The aggregator owns its store exclusively. Concurrent writers must
//! go through [`SharedCountStore`](crate::state::SharedCountStore) or
//! partition words across aggregators, each with its own store.

use crate::state::{AHashCountStore, CountStore};
use crate::tokenize::Token;

/// An outgoing `(word, count)` update: the word's running total
/// immediately after one increment.
///
/// Created once per processed token and handed straight downstream;
/// never retained by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// The counted word.
    pub word: String,
    /// The word's total after this increment.
    pub count: u64,
}

impl Emission {
    /// Creates an emission.
    #[must_use]
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Incremental word-count aggregator over an owned count store.
pub struct Aggregator {
    store: Box<dyn CountStore>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    /// Creates an aggregator over a fresh [`AHashCountStore`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(Box::new(AHashCountStore::new()))
    }

    /// Creates an aggregator over a caller-supplied store.
    #[must_use]
    pub fn with_store(store: Box<dyn CountStore>) -> Self {
        Self { store }
    }

    /// Counts one token and returns the update to forward downstream.
    ///
    /// The emitted count is the value returned by the store's
    /// increment, not a later re-read.
    pub fn process(&mut self, token: Token) -> Emission {
        let count = self.store.increment(&token);
        Emission { word: token, count }
    }

    /// Read access to the owned store.
    #[must_use]
    pub fn store(&self) -> &dyn CountStore {
        self.store.as_ref()
    }

    /// Consumes the aggregator, handing back its store.
    #[must_use]
    pub fn into_store(self) -> Box<dyn CountStore> {
        self.store
    }
}
