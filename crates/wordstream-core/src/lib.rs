//! # `WordStream` Core
//!
//! Core primitives for streaming word counting: the tokenizer, the
//! count stores, and the aggregator that ties them together.
//!
//! This crate is transport-agnostic and synchronous. Pulling records
//! from an input source and forwarding emissions to an output sink is
//! the pipeline crate's job; everything here is pure computation plus
//! one mutable map.

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod aggregate;
pub mod state;
pub mod tokenize;

pub use aggregate::{Aggregator, Emission};
pub use state::{AHashCountStore, CountStore, PartitionedCountStore, SharedCountStore};
pub use tokenize::{tokenize, Token};
