//! # Store Handle
//!
//! `KvStore` owns the engine connection and is the single point of truth for
//! "is this store still usable". Every externally observable operation (point
//! ops, iterator creation, each iterator step, close) takes the store's one
//! lock for the duration of its liveness check and engine access.
//!
//! Two consecutive iterator steps are *separate* critical sections: a close
//! that interleaves between them makes the second step fail with
//! [`StorageError::StoreClosed`] even though the first just succeeded. That
//! fail-fast-on-next-touch behavior is deliberate; use-after-close is always
//! detected, never silently tolerated, and no atomicity across call pairs is
//! promised.

mod cursor;
mod iter;


use std::sync::Arc;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::domain::errors::StorageError;
use crate::domain::schema::KvColumn;
use crate::ports::outbound::{BatchOperation, OrderedEngine};

pub use cursor::RawCursor;
pub use iter::{ColumnEntries, ColumnKeys};

use iter::ColumnScan;

/// Handle to a column store running on an ordered engine.
///
/// Cheap to clone; clones share the same underlying store and lifecycle.
/// Iterators hold a non-owning reference back to the store and check its
/// liveness on every step.
#[derive(Clone)]
pub struct KvStore {
    inner: Arc<StoreInner>,
}

pub(crate) struct StoreInner {
    state: Mutex<StoreState>,
}

enum StoreState {
    Open(Box<dyn OrderedEngine>),
    Closed,
}

impl StoreInner {
    /// Lock the store and hand out the engine, failing when closed.
    ///
    /// This is the liveness check every operation runs through; the guard
    /// keeps the lock held for the duration of the engine access.
    pub(crate) fn lock_open(
        &self,
    ) -> Result<MappedMutexGuard<'_, Box<dyn OrderedEngine>>, StorageError> {
        MutexGuard::try_map(self.state.lock(), |state| match state {
            StoreState::Open(engine) => Some(engine),
            StoreState::Closed => None,
        })
        .map_err(|_| StorageError::StoreClosed)
    }
}

impl KvStore {
    /// Open a store on the given engine.
    pub fn open(engine: Box<dyn OrderedEngine>) -> Self {
        tracing::info!("column store opened");
        Self {
            inner: Arc::new(StoreInner {
                state: Mutex::new(StoreState::Open(engine)),
            }),
        }
    }

    /// Open a store on a fresh in-memory engine.
    pub fn in_memory() -> Self {
        Self::open(Box::new(crate::adapters::memory::MemoryEngine::new()))
    }

    /// Close the store and release the engine connection.
    ///
    /// Idempotent: closing an already-closed store is a no-op. Outstanding
    /// iterators are not cancelled; their next access fails with
    /// [`StorageError::StoreClosed`].
    pub fn close(&self) {
        let mut state = self.inner.state.lock();
        if matches!(*state, StoreState::Open(_)) {
            tracing::info!("column store closed");
        }
        *state = StoreState::Closed;
    }

    /// Get a value from a column.
    pub fn get<K, V>(&self, column: &KvColumn<K, V>, key: &K) -> Result<Option<V>, StorageError> {
        let raw_key = column.raw_key(key);
        let bytes = {
            let engine = self.inner.lock_open()?;
            engine.get(&raw_key)?
        };
        // Decode outside the critical section.
        match bytes {
            Some(bytes) => Ok(Some(column.decode_value(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Put a value into a column.
    pub fn put<K, V>(&self, column: &KvColumn<K, V>, key: &K, value: &V) -> Result<(), StorageError> {
        let raw_key = column.raw_key(key);
        let bytes = column.encode_value(value)?;
        let mut engine = self.inner.lock_open()?;
        engine.put(&raw_key, &bytes)?;
        Ok(())
    }

    /// Delete a key from a column.
    pub fn delete<K, V>(&self, column: &KvColumn<K, V>, key: &K) -> Result<(), StorageError> {
        let raw_key = column.raw_key(key);
        let mut engine = self.inner.lock_open()?;
        engine.delete(&raw_key)?;
        Ok(())
    }

    /// Apply a batch of raw operations atomically.
    ///
    /// Raw keys are usually built via [`KvColumn::raw_key`] so the batch can
    /// span columns.
    pub fn apply_batch(&self, operations: Vec<BatchOperation>) -> Result<(), StorageError> {
        let mut engine = self.inner.lock_open()?;
        engine.apply_batch(operations)?;
        Ok(())
    }

    /// Iterate the logical keys of a column, ascending.
    ///
    /// `lower` positions the scan (column start when absent); `upper` is an
    /// inclusive upper bound (membership in the column alone terminates the
    /// scan when absent). The returned iterator is single-pass, ordered,
    /// distinct, and finite; see [`ColumnKeys`].
    pub fn iter_keys<K, V>(
        &self,
        column: &KvColumn<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<ColumnKeys<K, V>, StorageError> {
        Ok(ColumnKeys::new(self.scan(column, lower, upper)?))
    }

    /// Iterate the logical key-value entries of a column, ascending by key.
    ///
    /// Same bounds and sequence properties as [`iter_keys`](Self::iter_keys).
    pub fn iter_entries<K, V>(
        &self,
        column: &KvColumn<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<ColumnEntries<K, V>, StorageError> {
        Ok(ColumnEntries::new(self.scan(column, lower, upper)?))
    }

    fn scan<K, V>(
        &self,
        column: &KvColumn<K, V>,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<ColumnScan<K, V>, StorageError> {
        // Liveness check before handing out a cursor.
        drop(self.inner.lock_open()?);
        tracing::debug!("starting scan of column {:?}", column.id());
        Ok(ColumnScan::new(
            Arc::clone(&self.inner),
            column.clone(),
            lower,
            upper,
        ))
    }
}
