//! # Raw Cursor
//!
//! Sequential traversal of the flat engine keyspace with one-key lookahead.
//!
//! The cursor holds only position state (the lower bound of the next probe
//! plus the buffered peeked entry); the engine is passed in per call by the
//! caller, who holds the store lock. That makes a cursor a non-owning view
//! into the engine, valid only while the store is open, and abandoning one
//! releases everything it has.

use std::ops::Bound;

use crate::domain::errors::{EngineError, StorageError};
use crate::ports::outbound::OrderedEngine;

/// Peekable forward cursor over the engine's raw keyspace.
#[derive(Debug)]
pub struct RawCursor {
    position: Bound<Vec<u8>>,
    buffered: Option<(Vec<u8>, Vec<u8>)>,
}

impl RawCursor {
    /// Cursor positioned at `first_key` (inclusive).
    pub fn starting_at(first_key: Vec<u8>) -> Self {
        Self {
            position: Bound::Included(first_key),
            buffered: None,
        }
    }

    /// Cursor positioned at the very start of the keyspace.
    pub fn from_start() -> Self {
        Self {
            position: Bound::Unbounded,
            buffered: None,
        }
    }

    fn fill(&mut self, engine: &dyn OrderedEngine) -> Result<(), EngineError> {
        if self.buffered.is_none() {
            let from = match &self.position {
                Bound::Included(key) => Bound::Included(key.as_slice()),
                Bound::Excluded(key) => Bound::Excluded(key.as_slice()),
                Bound::Unbounded => Bound::Unbounded,
            };
            self.buffered = engine.next_entry(from)?;
        }
        Ok(())
    }

    /// Peek the key the next `next_key`/`next_entry` call would return.
    ///
    /// Idempotent: repeated peeks without an intervening consume return the
    /// same key and cost at most one engine probe.
    pub fn peek_next_key(
        &mut self,
        engine: &dyn OrderedEngine,
    ) -> Result<Option<&[u8]>, EngineError> {
        self.fill(engine)?;
        Ok(self.buffered.as_ref().map(|(key, _)| key.as_slice()))
    }

    /// True iff the engine still has a key at or after the current position.
    pub fn has_more(&mut self, engine: &dyn OrderedEngine) -> Result<bool, EngineError> {
        self.fill(engine)?;
        Ok(self.buffered.is_some())
    }

    /// Consume and return the next key.
    ///
    /// Fails with [`StorageError::IteratorExhausted`] past the last entry;
    /// check [`has_more`](Self::has_more) or peek first.
    pub fn next_key(&mut self, engine: &dyn OrderedEngine) -> Result<Vec<u8>, StorageError> {
        self.next_entry(engine).map(|(key, _)| key)
    }

    /// Consume and return the next key-value entry.
    ///
    /// Fails with [`StorageError::IteratorExhausted`] past the last entry.
    pub fn next_entry(
        &mut self,
        engine: &dyn OrderedEngine,
    ) -> Result<(Vec<u8>, Vec<u8>), StorageError> {
        self.fill(engine)?;
        let (key, value) = self.buffered.take().ok_or(StorageError::IteratorExhausted)?;
        self.position = Bound::Excluded(key.clone());
        Ok((key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryEngine;
    use crate::ports::outbound::OrderedEngine;

    fn engine_with(keys: &[&[u8]]) -> MemoryEngine {
        let mut engine = MemoryEngine::new();
        for key in keys {
            engine.put(key, b"v").unwrap();
        }
        engine
    }

    #[test]
    fn peek_is_idempotent() {
        let engine = engine_with(&[&[0x01], &[0x02]]);
        let mut cursor = RawCursor::from_start();

        assert_eq!(cursor.peek_next_key(&engine).unwrap(), Some(&[0x01][..]));
        assert_eq!(cursor.peek_next_key(&engine).unwrap(), Some(&[0x01][..]));
        assert_eq!(cursor.next_key(&engine).unwrap(), vec![0x01]);
        assert_eq!(cursor.peek_next_key(&engine).unwrap(), Some(&[0x02][..]));
    }

    #[test]
    fn consume_advances_past_each_key_once() {
        let engine = engine_with(&[&[0x01], &[0x02], &[0x03]]);
        let mut cursor = RawCursor::starting_at(vec![0x02]);

        assert_eq!(cursor.next_key(&engine).unwrap(), vec![0x02]);
        assert_eq!(cursor.next_key(&engine).unwrap(), vec![0x03]);
        assert!(!cursor.has_more(&engine).unwrap());
    }

    #[test]
    fn next_past_the_end_fails_loudly() {
        let engine = engine_with(&[&[0x01]]);
        let mut cursor = RawCursor::from_start();

        cursor.next_key(&engine).unwrap();
        let err = cursor.next_key(&engine).unwrap_err();
        assert!(matches!(err, StorageError::IteratorExhausted));
    }

    #[test]
    fn next_entry_returns_key_and_value() {
        let mut engine = MemoryEngine::new();
        engine.put(&[0x01], b"payload").unwrap();
        let mut cursor = RawCursor::from_start();

        let (key, value) = cursor.next_entry(&engine).unwrap();
        assert_eq!(key, vec![0x01]);
        assert_eq!(value, b"payload".to_vec());
    }

    #[test]
    fn keys_written_behind_the_cursor_are_not_observed() {
        let mut engine = engine_with(&[&[0x02]]);
        let mut cursor = RawCursor::from_start();

        assert_eq!(cursor.next_key(&engine).unwrap(), vec![0x02]);
        // A key sorting before the cursor's position appears later.
        engine.put(&[0x01], b"v").unwrap();
        assert!(!cursor.has_more(&engine).unwrap());
    }
}
