//! # Chain Column Registry
//!
//! The fixed column set the node wires at store construction. Finalization,
//! REST queries, and block processing all go through these handles; the
//! payload formats of the domain objects stay opaque to this layer.

use std::sync::Arc;

use crate::domain::errors::StorageError;
use crate::domain::schema::{
    BytesKeyCodec, BytesValueCodec, ColumnId, HashKeyCodec, HashValueCodec, KvColumn,
    SchemaBuilder, U64KeyCodec,
};
use crate::domain::Hash;

/// Columns used by the chain data layer.
///
/// Ids are part of the persisted layout and must never be reused for a
/// different column.
pub struct ChainColumns {
    /// Unfinalized blocks addressed by block root.
    pub hot_blocks_by_root: KvColumn<Hash, Vec<u8>>,
    /// Finalized blocks addressed by slot.
    pub finalized_blocks_by_slot: KvColumn<u64, Vec<u8>>,
    /// Finalized state roots addressed by slot.
    pub finalized_state_roots_by_slot: KvColumn<u64, Hash>,
    /// Named chain variables (genesis time, justified checkpoint, ...).
    pub variables: KvColumn<Vec<u8>, Vec<u8>>,
}

impl ChainColumns {
    /// Build the registry.
    ///
    /// The ids below are static and disjoint; the builder re-checks that at
    /// construction so an id clash introduced by a schema edit cannot reach
    /// a live store.
    pub fn new() -> Self {
        Self::build().expect("chain column ids are distinct")
    }

    fn build() -> Result<Self, StorageError> {
        let mut schema = SchemaBuilder::new();
        Ok(Self {
            hot_blocks_by_root: schema.column(
                ColumnId(1),
                Arc::new(HashKeyCodec),
                Arc::new(BytesValueCodec),
            )?,
            finalized_blocks_by_slot: schema.column(
                ColumnId(2),
                Arc::new(U64KeyCodec),
                Arc::new(BytesValueCodec),
            )?,
            finalized_state_roots_by_slot: schema.column(
                ColumnId(3),
                Arc::new(U64KeyCodec),
                Arc::new(HashValueCodec),
            )?,
            variables: schema.column(
                ColumnId(4),
                Arc::new(BytesKeyCodec),
                Arc::new(BytesValueCodec),
            )?,
        })
    }

    /// All column ids in the registry.
    pub fn ids(&self) -> [ColumnId; 4] {
        [
            self.hot_blocks_by_root.id(),
            self.finalized_blocks_by_slot.id(),
            self.finalized_state_roots_by_slot.id(),
            self.variables.id(),
        ]
    }
}

impl Default for ChainColumns {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_ids_are_distinct() {
        let columns = ChainColumns::new();
        let mut ids = columns.ids().to_vec();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn slot_columns_share_no_keyspace_with_root_columns() {
        let columns = ChainColumns::new();
        let by_root = columns.hot_blocks_by_root.raw_key(&[0xEE; 32]);
        let by_slot = columns.finalized_blocks_by_slot.raw_key(&9);
        assert!(!columns.finalized_blocks_by_slot.contains(&by_root));
        assert!(!columns.hot_blocks_by_root.contains(&by_slot));
    }
}
