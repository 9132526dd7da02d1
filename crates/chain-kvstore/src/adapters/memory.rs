//! # In-Memory Engine
//!
//! B-tree backed engine for unit tests and light use. The ordered map gives
//! the same unsigned-byte key ordering the production backend does.

use std::collections::BTreeMap;
use std::ops::Bound;

use crate::domain::errors::EngineError;
use crate::ports::outbound::{BatchOperation, OrderedEngine};

/// Ordered in-memory key-value engine.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of raw keys currently stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl OrderedEngine for MemoryEngine {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, EngineError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), EngineError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), EngineError> {
        self.data.remove(key);
        Ok(())
    }

    fn apply_batch(&mut self, operations: Vec<BatchOperation>) -> Result<(), EngineError> {
        // Single-threaded map, so applying in order is already atomic.
        for op in operations {
            match op {
                BatchOperation::Put { key, value } => {
                    self.data.insert(key, value);
                }
                BatchOperation::Delete { key } => {
                    self.data.remove(&key);
                }
            }
        }
        Ok(())
    }

    fn next_entry(&self, from: Bound<&[u8]>) -> Result<Option<(Vec<u8>, Vec<u8>)>, EngineError> {
        Ok(self
            .data
            .range::<[u8], _>((from, Bound::Unbounded))
            .next()
            .map(|(key, value)| (key.clone(), value.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_operations_round_trip() {
        let mut engine = MemoryEngine::new();

        engine.put(b"key1", b"value1").unwrap();
        engine.put(b"key2", b"value2").unwrap();

        assert_eq!(engine.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert_eq!(engine.get(b"key3").unwrap(), None);

        engine.delete(b"key1").unwrap();
        assert_eq!(engine.get(b"key1").unwrap(), None);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn batch_applies_all_operations() {
        let mut engine = MemoryEngine::new();
        engine.put(b"stale", b"x").unwrap();

        engine
            .apply_batch(vec![
                BatchOperation::put(b"a".as_slice(), b"1".as_slice()),
                BatchOperation::put(b"b".as_slice(), b"2".as_slice()),
                BatchOperation::delete(b"stale".as_slice()),
            ])
            .unwrap();

        assert_eq!(engine.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(engine.get(b"b").unwrap(), Some(b"2".to_vec()));
        assert_eq!(engine.get(b"stale").unwrap(), None);
    }

    #[test]
    fn next_entry_honors_lower_bound_kinds() {
        let mut engine = MemoryEngine::new();
        engine.put(&[0x01], b"a").unwrap();
        engine.put(&[0x02], b"b").unwrap();
        engine.put(&[0x04], b"c").unwrap();

        let first = |bound| engine.next_entry(bound).unwrap().map(|(k, _)| k);

        assert_eq!(first(Bound::Unbounded), Some(vec![0x01]));
        assert_eq!(first(Bound::Included(&[0x02][..])), Some(vec![0x02]));
        assert_eq!(first(Bound::Excluded(&[0x02][..])), Some(vec![0x04]));
        // Seeking between stored keys lands on the next one.
        assert_eq!(first(Bound::Included(&[0x03][..])), Some(vec![0x04]));
        assert_eq!(first(Bound::Excluded(&[0x04][..])), None);
    }
}
