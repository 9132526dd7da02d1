//! # Column Schema
//!
//! Column identity, the shared raw-key layout, and the typed column handle.
//!
//! ## Raw key layout
//!
//! ```text
//! raw_key = fixed_width_prefix(column_id) || encoded_logical_key
//! ```
//!
//! The prefix width is constant across the whole store, so membership is a
//! length-unambiguous prefix comparison. Raw keys are compared as unsigned
//! byte arrays (`[u8]` ordering), the same comparator the ordered engine uses,
//! which keeps every column's keys contiguous in the shared keyspace.

mod codec;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::domain::errors::{CodecError, StorageError};

pub use codec::{
    BincodeValueCodec, BytesKeyCodec, BytesValueCodec, HashKeyCodec, HashValueCodec, KeyCodec,
    U64KeyCodec, ValueCodec,
};

/// Width in bytes of the column prefix, constant across the whole store.
pub const COLUMN_PREFIX_WIDTH: usize = 1;

/// Identifier of a logical column.
///
/// Ids are assigned once at schema definition time and must be distinct
/// across the store; cross-version stability of ids is the schema layer's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnId(pub u8);

impl ColumnId {
    /// Fixed-width byte prefix for this column.
    ///
    /// Deterministic and order preserving: prefixes compare the way ids do.
    pub const fn prefix(self) -> [u8; COLUMN_PREFIX_WIDTH] {
        [self.0]
    }
}

/// Builder for a store's column set, rejecting duplicate ids.
///
/// Columns defined through one builder are guaranteed to own disjoint
/// slices of the shared keyspace. Define every column of a store through
/// the same builder.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    used_ids: BTreeSet<ColumnId>,
}

impl SchemaBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a column, failing with [`StorageError::DuplicateColumnId`]
    /// when `id` was already claimed by an earlier column.
    pub fn column<K, V>(
        &mut self,
        id: ColumnId,
        key_codec: Arc<dyn KeyCodec<K>>,
        value_codec: Arc<dyn ValueCodec<V>>,
    ) -> Result<KvColumn<K, V>, StorageError> {
        if !self.used_ids.insert(id) {
            return Err(StorageError::DuplicateColumnId { id });
        }
        Ok(KvColumn::new(id, key_codec, value_codec))
    }
}

/// A logical column: identity plus the codecs that map logical keys and
/// values to raw bytes.
///
/// Columns are defined once at store construction and immutable thereafter.
/// The key codec must preserve unsigned-byte ordering over its encoded form
/// for logical-key iteration order to match raw-key order; that is a codec
/// contract, not something this type can enforce.
pub struct KvColumn<K, V> {
    id: ColumnId,
    key_codec: Arc<dyn KeyCodec<K>>,
    value_codec: Arc<dyn ValueCodec<V>>,
}

impl<K, V> fmt::Debug for KvColumn<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvColumn")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<K, V> Clone for KvColumn<K, V> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            key_codec: Arc::clone(&self.key_codec),
            value_codec: Arc::clone(&self.value_codec),
        }
    }
}

impl<K, V> KvColumn<K, V> {
    /// Create a column with the given id and codecs.
    pub fn new(
        id: ColumnId,
        key_codec: Arc<dyn KeyCodec<K>>,
        value_codec: Arc<dyn ValueCodec<V>>,
    ) -> Self {
        Self {
            id,
            key_codec,
            value_codec,
        }
    }

    /// The column's identifier.
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Build the raw engine key for a logical key.
    pub fn raw_key(&self, key: &K) -> Vec<u8> {
        let mut raw = self.id.prefix().to_vec();
        raw.extend_from_slice(&self.key_codec.encode_key(key));
        raw
    }

    /// The smallest raw key that can belong to this column (its bare prefix).
    pub fn first_raw_key(&self) -> Vec<u8> {
        self.id.prefix().to_vec()
    }

    /// True iff `raw_key` starts with this column's prefix.
    pub fn contains(&self, raw_key: &[u8]) -> bool {
        raw_key.starts_with(&self.id.prefix())
    }

    /// Strip the column prefix, returning the column-local key bytes.
    ///
    /// Callers must check [`contains`](Self::contains) first; a raw key that
    /// does not carry this column's prefix is a logic bug and surfaces as
    /// [`StorageError::MalformedKey`].
    pub fn local_key_bytes<'a>(&self, raw_key: &'a [u8]) -> Result<&'a [u8], StorageError> {
        if !self.contains(raw_key) {
            return Err(StorageError::MalformedKey {
                column: self.id,
                key: raw_key.to_vec(),
            });
        }
        Ok(&raw_key[COLUMN_PREFIX_WIDTH..])
    }

    /// Decode column-local key bytes into the logical key type.
    pub fn decode_key(&self, local: &[u8]) -> Result<K, CodecError> {
        self.key_codec.decode_key(local)
    }

    /// Encode a logical value to raw bytes.
    pub fn encode_value(&self, value: &V) -> Result<Vec<u8>, CodecError> {
        self.value_codec.encode_value(value)
    }

    /// Decode raw bytes into the logical value type.
    pub fn decode_value(&self, bytes: &[u8]) -> Result<V, CodecError> {
        self.value_codec.decode_value(bytes)
    }
}
