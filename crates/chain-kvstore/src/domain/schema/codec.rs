//! # Key and Value Codecs
//!
//! Injected (de)serializers for logical keys and values. Key codecs whose
//! encoded form sorts like the logical type (raw bytes, big-endian integers,
//! fixed-width hashes) keep column iteration order meaningful; value codecs
//! carry no ordering obligation.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::errors::CodecError;
use crate::domain::Hash;

/// Encodes logical keys to raw bytes and back.
pub trait KeyCodec<K>: Send + Sync {
    /// Encode a logical key to its raw byte form.
    fn encode_key(&self, key: &K) -> Vec<u8>;

    /// Decode column-local raw bytes back into the logical key.
    fn decode_key(&self, bytes: &[u8]) -> Result<K, CodecError>;
}

/// Encodes logical values to raw bytes and back.
pub trait ValueCodec<V>: Send + Sync {
    /// Serialize a logical value.
    fn encode_value(&self, value: &V) -> Result<Vec<u8>, CodecError>;

    /// Deserialize a logical value.
    fn decode_value(&self, bytes: &[u8]) -> Result<V, CodecError>;
}

/// Identity codec for raw byte keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesKeyCodec;

impl KeyCodec<Vec<u8>> for BytesKeyCodec {
    fn encode_key(&self, key: &Vec<u8>) -> Vec<u8> {
        key.clone()
    }

    fn decode_key(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }
}

/// Big-endian `u64` key codec.
///
/// Big-endian keeps numeric order identical to unsigned byte order, so
/// slot- and height-keyed columns iterate in numeric order.
#[derive(Debug, Default, Clone, Copy)]
pub struct U64KeyCodec;

impl KeyCodec<u64> for U64KeyCodec {
    fn encode_key(&self, key: &u64) -> Vec<u8> {
        key.to_be_bytes().to_vec()
    }

    fn decode_key(&self, bytes: &[u8]) -> Result<u64, CodecError> {
        let fixed: [u8; 8] = bytes.try_into().map_err(|_| CodecError::KeyLength {
            expected: 8,
            actual: bytes.len(),
        })?;
        Ok(u64::from_be_bytes(fixed))
    }
}

/// 32-byte hash key codec for root-addressed columns.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashKeyCodec;

impl KeyCodec<Hash> for HashKeyCodec {
    fn encode_key(&self, key: &Hash) -> Vec<u8> {
        key.to_vec()
    }

    fn decode_key(&self, bytes: &[u8]) -> Result<Hash, CodecError> {
        bytes.try_into().map_err(|_| CodecError::KeyLength {
            expected: 32,
            actual: bytes.len(),
        })
    }
}

/// Identity codec for opaque byte values.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesValueCodec;

impl ValueCodec<Vec<u8>> for BytesValueCodec {
    fn encode_value(&self, value: &Vec<u8>) -> Result<Vec<u8>, CodecError> {
        Ok(value.clone())
    }

    fn decode_value(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }
}

/// 32-byte hash value codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct HashValueCodec;

impl ValueCodec<Hash> for HashValueCodec {
    fn encode_value(&self, value: &Hash) -> Result<Vec<u8>, CodecError> {
        Ok(value.to_vec())
    }

    fn decode_value(&self, bytes: &[u8]) -> Result<Hash, CodecError> {
        bytes.try_into().map_err(|_| CodecError::KeyLength {
            expected: 32,
            actual: bytes.len(),
        })
    }
}

/// Bincode value codec for any serde type.
pub struct BincodeValueCodec<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> BincodeValueCodec<T> {
    /// Create the codec.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BincodeValueCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ValueCodec<T> for BincodeValueCodec<T>
where
    T: Serialize + DeserializeOwned,
{
    fn encode_value(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Encode {
            message: e.to_string(),
        })
    }

    fn decode_value(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Decode {
            message: e.to_string(),
        })
    }
}
