//! # Domain Errors
//!
//! Error types for the column store.
//!
//! None of these are retried internally: they are caller-contract or lifecycle
//! violations, not transient engine conditions. Keys belonging to *other*
//! columns encountered mid-scan are not errors; they are the expected
//! termination signal for the current column's iteration.

use thiserror::Error;

use crate::domain::schema::ColumnId;

/// Errors surfaced by store handles, cursors, and column iterators.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store has been closed; stop using this handle and any iterators
    /// derived from it.
    #[error("store is closed")]
    StoreClosed,

    /// A raw key was stripped against a column it does not belong to.
    ///
    /// Indicates a logic bug in the caller: membership must be checked before
    /// stripping the prefix.
    #[error("malformed key for column {column:?}: {key:02x?}")]
    MalformedKey {
        /// Column the strip was attempted against.
        column: ColumnId,
        /// The offending raw key.
        key: Vec<u8>,
    },

    /// A cursor was consumed past its last entry.
    #[error("cursor is exhausted")]
    IteratorExhausted,

    /// A column was defined with an id another column already uses.
    ///
    /// Ids namespace the shared keyspace; reusing one would interleave two
    /// columns' data.
    #[error("duplicate column id {id:?}")]
    DuplicateColumnId {
        /// The id claimed twice.
        id: ColumnId,
    },

    /// The underlying ordered engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A logical key or value could not be (de)serialized.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Ordered-engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O error during read/write/seek.
    #[error("engine I/O error: {message}")]
    Io {
        /// Backend-reported failure detail.
        message: String,
    },

    /// Data corruption detected by the backend.
    #[error("engine corruption: {message}")]
    Corruption {
        /// Backend-reported corruption detail.
        message: String,
    },
}

/// Key/value codec errors.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Encoded key bytes have the wrong length for a fixed-width key type.
    #[error("key is {actual} bytes, expected {expected}")]
    KeyLength {
        /// Width the codec requires.
        expected: usize,
        /// Width actually observed.
        actual: usize,
    },

    /// Value serialization failed.
    #[error("value encoding failed: {message}")]
    Encode {
        /// Serializer-reported detail.
        message: String,
    },

    /// Value deserialization failed.
    #[error("value decoding failed: {message}")]
    Decode {
        /// Deserializer-reported detail.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_key_display_names_column_and_bytes() {
        let err = StorageError::MalformedKey {
            column: ColumnId(7),
            key: vec![0xAB, 0x01],
        };
        let msg = err.to_string();
        assert!(msg.contains("7"));
        assert!(msg.contains("ab"));
    }

    #[test]
    fn engine_error_converts_to_storage_error() {
        let err = EngineError::Io {
            message: "disk failure".to_string(),
        };
        let storage: StorageError = err.into();
        assert!(storage.to_string().contains("disk failure"));
    }
}
