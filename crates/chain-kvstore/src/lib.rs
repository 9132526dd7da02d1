//! # Chain KV-Store
//!
//! The persistence layer for a consensus-layer node. Many independent logical
//! tables ("columns") share one physical ordered byte keyspace provided by an
//! LSM-style engine, while each column is presented to callers as its own
//! sorted map with bounded, type-aware iteration.
//!
//! ## How columns are emulated
//!
//! Every raw key stored in the engine is `prefix(column_id) || encoded_key`.
//! The prefix has a fixed width across the whole store, and raw keys are
//! ordered by unsigned lexicographic byte comparison, so all keys of one
//! column form a contiguous block in the shared keyspace. A column scan
//! therefore terminates at the first key that leaves the column's prefix or
//! passes the requested inclusive upper bound; nothing beyond it can qualify.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `domain/` - Column schema, key/value codecs, error taxonomy
//! - `ports/` - Outbound port: the ordered engine abstraction
//! - `adapters/` - Engine backends (in-memory B-tree, RocksDB)
//! - `service/` - The store handle, raw cursor, and column iterators
//!
//! ## Concurrency model
//!
//! Purely synchronous. Every operation derived from a store handle (point
//! ops, iterator creation, each iterator step, close) serializes through one
//! lock for the duration of its liveness check and engine access. Closing the
//! store does not cancel outstanding iterators; their next access fails with
//! [`StorageError::StoreClosed`].
//!
//! ## Usage
//!
//! ```ignore
//! use chain_kvstore::{ChainColumns, KvStore};
//!
//! let store = KvStore::in_memory();
//! let columns = ChainColumns::new();
//!
//! store.put(&columns.finalized_blocks_by_slot, &42, &block_bytes)?;
//!
//! for slot in store.iter_keys(&columns.finalized_blocks_by_slot, None, Some(&100))? {
//!     println!("finalized slot {}", slot?);
//! }
//!
//! store.close();
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export key types for convenience
pub use adapters::memory::MemoryEngine;
#[cfg(feature = "rocksdb")]
pub use adapters::rocksdb::{RocksDbConfig, RocksDbEngine};
pub use domain::columns::ChainColumns;
pub use domain::errors::{CodecError, EngineError, StorageError};
pub use domain::schema::{
    BincodeValueCodec, BytesKeyCodec, BytesValueCodec, ColumnId, HashKeyCodec, HashValueCodec,
    KeyCodec, KvColumn, SchemaBuilder, U64KeyCodec, ValueCodec, COLUMN_PREFIX_WIDTH,
};
pub use domain::Hash;
pub use ports::outbound::{BatchOperation, OrderedEngine};
pub use service::{ColumnEntries, ColumnKeys, KvStore, RawCursor};
