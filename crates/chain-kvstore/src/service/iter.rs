//! # Column Iterators
//!
//! Turn the flat raw cursor into a column-scoped, bounded, prefix-stripped,
//! ordered sequence.
//!
//! Because all of a column's raw keys are contiguous in the shared sorted
//! keyspace, the first peeked key that is either outside the column or past
//! the inclusive upper bound proves that no further qualifying key exists
//! ahead, so the scan terminates eagerly without touching the rest of the
//! store. One check does double duty as end-of-column and end-of-range
//! detection.
//!
//! Each step locks the store and re-checks liveness; a store closed mid-scan
//! surfaces as `Err(StoreClosed)` on every subsequent step (the iterator is
//! deliberately not fused on that error, matching the store's fail-fast
//! policy).

use std::sync::Arc;

use crate::domain::errors::StorageError;
use crate::domain::schema::KvColumn;
use crate::service::cursor::RawCursor;
use crate::service::StoreInner;

/// Shared scan state behind both iterator variants.
pub(crate) struct ColumnScan<K, V> {
    store: Arc<StoreInner>,
    column: KvColumn<K, V>,
    cursor: RawCursor,
    upper_bound: Option<Vec<u8>>,
    exhausted: bool,
}

impl<K, V> ColumnScan<K, V> {
    pub(crate) fn new(
        store: Arc<StoreInner>,
        column: KvColumn<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Self {
        let first_key = match lower {
            Some(key) => column.raw_key(key),
            None => column.first_raw_key(),
        };
        let upper_bound = upper.map(|key| column.raw_key(key));
        Self {
            store,
            column,
            cursor: RawCursor::starting_at(first_key),
            upper_bound,
            exhausted: false,
        }
    }

    /// Advance by one raw entry, or report why there is none.
    fn next_raw(&mut self) -> Option<Result<(Vec<u8>, Vec<u8>), StorageError>> {
        // Liveness first: touching a closed store fails even after exhaustion.
        let engine = match self.store.lock_open() {
            Ok(engine) => engine,
            Err(err) => return Some(Err(err)),
        };
        if self.exhausted {
            return None;
        }

        let in_range = match self.cursor.peek_next_key(&**engine) {
            Err(err) => return Some(Err(err.into())),
            Ok(None) => false,
            Ok(Some(key)) => {
                // Raw keys compare as unsigned byte arrays, so the inclusive
                // bound check is plain slice ordering.
                self.column.contains(key)
                    && self.upper_bound.as_deref().map_or(true, |bound| key <= bound)
            }
        };
        if !in_range {
            self.exhausted = true;
            return None;
        }

        match self.cursor.next_entry(&**engine) {
            Ok(entry) => Some(Ok(entry)),
            Err(err) => Some(Err(err)),
        }
    }

    fn decode_key(&self, raw_key: &[u8]) -> Result<K, StorageError> {
        let local = self.column.local_key_bytes(raw_key)?;
        Ok(self.column.decode_key(local)?)
    }
}

/// Ascending iterator over a column's logical keys.
///
/// Sequence contract: ordered (ascending unsigned byte order of the raw
/// keys), distinct (each engine key yielded at most once), finite (bounded
/// by column end or the inclusive upper bound), immutable view, single-pass
/// and not restartable. Not for concurrent use by multiple threads without
/// external synchronization; distinct iterators may run concurrently.
pub struct ColumnKeys<K, V> {
    scan: ColumnScan<K, V>,
}

impl<K, V> ColumnKeys<K, V> {
    pub(crate) fn new(scan: ColumnScan<K, V>) -> Self {
        Self { scan }
    }
}

impl<K, V> Iterator for ColumnKeys<K, V> {
    type Item = Result<K, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (raw_key, _) = match self.scan.next_raw()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        // Decode outside the critical section.
        Some(self.scan.decode_key(&raw_key))
    }
}

/// Ascending iterator over a column's logical key-value entries.
///
/// Same sequence contract as [`ColumnKeys`].
pub struct ColumnEntries<K, V> {
    scan: ColumnScan<K, V>,
}

impl<K, V> ColumnEntries<K, V> {
    pub(crate) fn new(scan: ColumnScan<K, V>) -> Self {
        Self { scan }
    }
}

impl<K, V> Iterator for ColumnEntries<K, V> {
    type Item = Result<(K, V), StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (raw_key, raw_value) = match self.scan.next_raw()? {
            Ok(entry) => entry,
            Err(err) => return Some(Err(err)),
        };
        let entry = self.scan.decode_key(&raw_key).and_then(|key| {
            let value = self.scan.column.decode_value(&raw_value)?;
            Ok((key, value))
        });
        Some(entry)
    }
}
