//! # RocksDB Engine
//!
//! Production backend over RocksDB. Columns are emulated by key prefixing in
//! the default column family; RocksDB's native comparator is the unsigned
//! byte comparison the schema layer relies on.
//!
//! Tuned for blockchain workloads: bloom filters for point reads, an LRU
//! block cache, Snappy compression, and optional fsync per write.

use std::ops::Bound;
use std::path::Path;

use rocksdb::{Direction, ErrorKind, IteratorMode, Options, WriteBatch, WriteOptions, DB};

use crate::domain::errors::EngineError;
use crate::ports::outbound::{BatchOperation, OrderedEngine};

/// Map a RocksDB error into the engine error taxonomy.
///
/// Corruption is kept distinct from plain I/O failures: a corrupt SST file
/// needs operator intervention, a transient I/O error may not.
fn engine_error(context: &str, error: rocksdb::Error) -> EngineError {
    classify(context, error.kind(), &error.to_string())
}

fn classify(context: &str, kind: ErrorKind, detail: &str) -> EngineError {
    match kind {
        ErrorKind::Corruption => EngineError::Corruption {
            message: format!("{context}: {detail}"),
        },
        _ => EngineError::Io {
            message: format!("{context}: {detail}"),
        },
    }
}

/// RocksDB configuration for production use.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory.
    pub path: String,
    /// Block cache size in bytes (default: 256MB).
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 64MB).
    pub write_buffer_size: usize,
    /// Maximum number of write buffers (default: 3).
    pub max_write_buffer_number: i32,
    /// Target file size for level-1 (default: 64MB).
    pub target_file_size_base: u64,
    /// Enable fsync after each write (default: true for durability).
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".to_string(),
            block_cache_size: 256 * 1024 * 1024,
            write_buffer_size: 64 * 1024 * 1024,
            max_write_buffer_number: 3,
            target_file_size_base: 64 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync).
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            max_write_buffer_number: 2,
            target_file_size_base: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed ordered engine.
pub struct RocksDbEngine {
    db: DB,
    config: RocksDbConfig,
}

impl RocksDbEngine {
    /// Open or create a RocksDB database at the configured path.
    pub fn open(config: RocksDbConfig) -> Result<Self, EngineError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);

        // Performance tuning
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_max_write_buffer_number(config.max_write_buffer_number);
        opts.set_target_file_size_base(config.target_file_size_base);

        // Compression
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        // Bloom filter for faster point lookups
        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let db = DB::open(&opts, &config.path)
            .map_err(|e| engine_error("failed to open RocksDB", e))?;

        Ok(Self { db, config })
    }

    /// Open with defaults at the given path.
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let config = RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::open(config)
    }

    fn write_options(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

impl OrderedEngine for RocksDbEngine {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        self.db
            .get(key)
            .map_err(|e| engine_error("RocksDB get failed", e))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        self.db
            .put_opt(key, value, &self.write_options())
            .map_err(|e| engine_error("RocksDB put failed", e))
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), EngineError> {
        self.db
            .delete_opt(key, &self.write_options())
            .map_err(|e| engine_error("RocksDB delete failed", e))
    }

    fn apply_batch(&mut self, operations: Vec<BatchOperation>) -> Result<(), EngineError> {
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    batch.put(&key, &value);
                }
                BatchOperation::Delete { key } => {
                    batch.delete(&key);
                }
            }
        }

        self.db
            .write_opt(batch, &self.write_options())
            .map_err(|e| engine_error("RocksDB batch write failed", e))
    }

    fn next_entry(&self, from: Bound<&[u8]>) -> Result<Option<(Vec<u8>, Vec<u8>)>, EngineError> {
        let mode = match from {
            Bound::Unbounded => IteratorMode::Start,
            Bound::Included(key) | Bound::Excluded(key) => {
                IteratorMode::From(key, Direction::Forward)
            }
        };

        for item in self.db.iterator(mode) {
            let (key, value) = item.map_err(|e| engine_error("RocksDB seek failed", e))?;
            if let Bound::Excluded(start) = from {
                if key.as_ref() == start {
                    continue;
                }
            }
            return Ok(Some((key.to_vec(), value.to_vec())));
        }
        Ok(None)
    }
}
