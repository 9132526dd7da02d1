//! Schema unit tests: prefix layout, membership, stripping, codec ordering.

use std::sync::Arc;

use super::*;
use crate::domain::errors::{CodecError, StorageError};

fn bytes_column(id: u8) -> KvColumn<Vec<u8>, Vec<u8>> {
    KvColumn::new(
        ColumnId(id),
        Arc::new(BytesKeyCodec),
        Arc::new(BytesValueCodec),
    )
}

#[test]
fn raw_key_is_prefix_then_encoded_key() {
    let column = bytes_column(2);
    assert_eq!(column.raw_key(&vec![0x01]), vec![0x02, 0x01]);
    assert_eq!(column.first_raw_key(), vec![0x02]);
}

#[test]
fn membership_is_prefix_comparison() {
    let column = bytes_column(2);
    assert!(column.contains(&[0x02, 0x01]));
    assert!(column.contains(&[0x02]));
    assert!(!column.contains(&[0x03, 0x01]));
    assert!(!column.contains(&[]));
}

#[test]
fn strip_returns_local_key_bytes() {
    let column = bytes_column(2);
    assert_eq!(column.local_key_bytes(&[0x02, 0xAA, 0xBB]).unwrap(), &[0xAA, 0xBB]);
    assert_eq!(column.local_key_bytes(&[0x02]).unwrap(), &[] as &[u8]);
}

#[test]
fn strip_of_foreign_key_is_malformed() {
    let column = bytes_column(2);
    let err = column.local_key_bytes(&[0x03, 0x01]).unwrap_err();
    assert!(matches!(err, StorageError::MalformedKey { column: ColumnId(2), .. }));

    // Shorter than the prefix is malformed too.
    let err = column.local_key_bytes(&[]).unwrap_err();
    assert!(matches!(err, StorageError::MalformedKey { .. }));
}

#[test]
fn schema_builder_rejects_duplicate_ids() {
    let mut schema = SchemaBuilder::new();
    schema
        .column::<Vec<u8>, Vec<u8>>(
            ColumnId(1),
            Arc::new(BytesKeyCodec),
            Arc::new(BytesValueCodec),
        )
        .unwrap();

    // Same id, different types: still a clash over the shared keyspace.
    let err = schema
        .column::<u64, Vec<u8>>(ColumnId(1), Arc::new(U64KeyCodec), Arc::new(BytesValueCodec))
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::DuplicateColumnId { id: ColumnId(1) }
    ));

    // A fresh id remains fine after the rejection.
    schema
        .column::<u64, Vec<u8>>(ColumnId(2), Arc::new(U64KeyCodec), Arc::new(BytesValueCodec))
        .unwrap();
}

#[test]
fn prefixes_preserve_id_ordering() {
    let low = ColumnId(1).prefix();
    let high = ColumnId(2).prefix();
    assert!(low < high);
}

#[test]
fn u64_codec_is_order_preserving() {
    let codec = U64KeyCodec;
    let values = [0u64, 1, 255, 256, 1 << 32, u64::MAX];
    for pair in values.windows(2) {
        assert!(codec.encode_key(&pair[0]) < codec.encode_key(&pair[1]));
    }
    for value in values {
        assert_eq!(codec.decode_key(&codec.encode_key(&value)).unwrap(), value);
    }
}

#[test]
fn u64_codec_rejects_wrong_width() {
    let err = U64KeyCodec.decode_key(&[0x01, 0x02]).unwrap_err();
    assert!(matches!(err, CodecError::KeyLength { expected: 8, actual: 2 }));
}

#[test]
fn hash_codec_round_trips() {
    let hash = [0x5A; 32];
    let encoded = HashKeyCodec.encode_key(&hash);
    assert_eq!(encoded.len(), 32);
    assert_eq!(HashKeyCodec.decode_key(&encoded).unwrap(), hash);
    assert!(HashKeyCodec.decode_key(&[0u8; 16]).is_err());
}

#[test]
fn bincode_codec_round_trips_serde_values() {
    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Checkpoint {
        epoch: u64,
        root: crate::domain::Hash,
    }

    let codec = BincodeValueCodec::<Checkpoint>::new();
    let value = Checkpoint {
        epoch: 12,
        root: [7; 32],
    };
    let bytes = codec.encode_value(&value).unwrap();
    assert_eq!(codec.decode_value(&bytes).unwrap(), value);
    assert!(codec.decode_value(&[0xFF]).is_err());
}
