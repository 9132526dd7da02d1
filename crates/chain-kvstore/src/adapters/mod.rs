//! # Adapters
//!
//! Engine backends implementing the outbound port. The column iteration
//! logic itself is backend-agnostic; swapping the engine means swapping
//! one of these.

pub mod memory;

#[cfg(feature = "rocksdb")]
pub mod rocksdb;
