//! # Outbound Ports (Driven Ports)
//!
//! The ordered engine abstraction the column store is built on.
//!
//! The engine is treated as a black box providing atomic point reads/writes
//! and sorted traversal over raw byte keys compared as unsigned byte arrays.
//! Compaction, WAL, and file formats are the backend's business.

use std::ops::Bound;

use crate::domain::errors::EngineError;

/// Abstract interface over an ordered byte-keyspace engine.
///
/// Production: `RocksDbEngine` (adapters/rocksdb.rs, feature `rocksdb`)
/// Testing: `MemoryEngine` (adapters/memory.rs)
///
/// Keys are ordered by unsigned lexicographic byte comparison; `next_entry`
/// must honor exactly that ordering or column-bound termination breaks.
pub trait OrderedEngine: Send + Sync {
    /// Get a value by raw key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError>;

    /// Put a single raw key-value pair.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError>;

    /// Delete a raw key.
    fn delete(&mut self, key: &[u8]) -> Result<(), EngineError>;

    /// Apply a batch of operations atomically: either all take effect or none.
    fn apply_batch(&mut self, operations: Vec<BatchOperation>) -> Result<(), EngineError>;

    /// Return the first entry whose key satisfies the lower bound `from`,
    /// or `None` when the keyspace is exhausted past that point.
    ///
    /// This is the single seek primitive cursors are built from; it is
    /// expected to be an effectively non-blocking point seek.
    fn next_entry(&self, from: Bound<&[u8]>) -> Result<Option<(Vec<u8>, Vec<u8>)>, EngineError>;
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone)]
pub enum BatchOperation {
    /// Put a raw key-value pair.
    Put { key: Vec<u8>, value: Vec<u8> },
    /// Delete a raw key.
    Delete { key: Vec<u8> },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a Delete operation.
    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Delete { key: key.into() }
    }
}
