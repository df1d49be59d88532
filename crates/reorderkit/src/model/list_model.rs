//! Reorderable list model.
//!
//! `ListModel<T>` is the ordered sequence of items a list view displays. The
//! host owns it (typically as `Arc<ListModel<T>>`) and may read it at any
//! time. During a drag the reorder controller is the only mutator: the drag
//! session holds a [`StructureLock`], every host-side mutation (swaps
//! included) is rejected until the drag ends, and the session swaps rows
//! through [`StructureLock::swap`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use reorderkit_core::Signal;
use reorderkit_core::logging::targets;

use crate::error::{ReorderError, ReorderResult};

/// Change notifications emitted by a [`ListModel`].
///
/// Signals are emitted after the model's internal lock has been released, so
/// slots may read the model.
#[derive(Debug, Default)]
pub struct ListSignals {
    /// Two positions exchanged items: `(a, b)`.
    pub rows_swapped: Signal<(usize, usize)>,
    /// An item was inserted at the given index.
    pub row_inserted: Signal<usize>,
    /// The item at the given index was removed.
    pub row_removed: Signal<usize>,
    /// The whole content was replaced or cleared.
    pub reset: Signal<()>,
}

/// RAII guard that gives its holder exclusive write access to a model.
///
/// Obtained from [`ListModel::lock_structure`]. While any guard is alive,
/// `swap`, `push`, `insert`, `remove`, `clear` and `set_items` on the model
/// fail with [`ReorderError::ModelLocked`]. The holder can still reorder rows
/// through [`StructureLock::swap`].
#[derive(Debug)]
#[must_use = "the structure is unlocked as soon as the guard is dropped"]
pub struct StructureLock {
    locks: Arc<AtomicUsize>,
}

impl StructureLock {
    /// Exchanges the items at positions `a` and `b` of the model this guard
    /// locks.
    ///
    /// Fails with [`ReorderError::ModelLocked`] if the guard belongs to a
    /// different model, and with [`ReorderError::IndexOutOfRange`] as
    /// [`ListModel::swap`] does.
    pub fn swap<T>(&self, model: &ListModel<T>, a: usize, b: usize) -> ReorderResult<()> {
        if !Arc::ptr_eq(&self.locks, &model.structure_locks) {
            tracing::warn!(target: targets::MODEL, "swap through a lock of another model");
            return Err(ReorderError::ModelLocked);
        }
        model.swap_items(model.items.write(), a, b)
    }
}

impl Drop for StructureLock {
    fn drop(&mut self) {
        self.locks.fetch_sub(1, Ordering::SeqCst);
    }
}

/// An ordered sequence of items that can be reordered by swapping positions.
///
/// # Example
///
/// ```
/// use reorderkit::ListModel;
///
/// let model = ListModel::new(vec!["One", "Two", "Three"]);
/// model.swap(0, 2).unwrap();
/// assert_eq!(model.to_vec(), vec!["Three", "Two", "One"]);
/// ```
#[derive(Debug)]
pub struct ListModel<T> {
    items: RwLock<Vec<T>>,
    structure_locks: Arc<AtomicUsize>,
    signals: ListSignals,
}

impl<T> Default for ListModel<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> ListModel<T> {
    /// Creates a model holding `items` in order.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
            structure_locks: Arc::new(AtomicUsize::new(0)),
            signals: ListSignals::default(),
        }
    }

    /// Creates an empty list model.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the change notifications of this model.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Returns the number of items in the model.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Read access to the item at `index`.
    pub fn at(&self, index: usize) -> Option<MappedRwLockReadGuard<'_, T>> {
        RwLockReadGuard::try_map(self.items.read(), |items| items.get(index)).ok()
    }

    /// Read access to all items.
    pub fn items(&self) -> RwLockReadGuard<'_, Vec<T>> {
        self.items.read()
    }

    /// Exchanges the items at positions `a` and `b`.
    ///
    /// Fails with [`ReorderError::IndexOutOfRange`] if either index is not in
    /// `[0, len)`, and with [`ReorderError::ModelLocked`] while a
    /// [`StructureLock`] is alive. Swapping a position with itself does
    /// nothing and emits no signal.
    pub fn swap(&self, a: usize, b: usize) -> ReorderResult<()> {
        let items = self.write_unlocked()?;
        self.swap_items(items, a, b)
    }

    fn swap_items(
        &self,
        mut items: RwLockWriteGuard<'_, Vec<T>>,
        a: usize,
        b: usize,
    ) -> ReorderResult<()> {
        let len = items.len();
        for index in [a, b] {
            if index >= len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
        }
        if a == b {
            return Ok(());
        }
        items.swap(a, b);
        drop(items);

        tracing::trace!(target: targets::MODEL, a, b, "rows swapped");
        self.signals.rows_swapped.emit((a, b));
        Ok(())
    }

    /// Locks the model against host-side mutation until the returned guard
    /// is dropped.
    pub fn lock_structure(&self) -> StructureLock {
        // Serialized with mutations, which check the count under the write lock
        let _items = self.items.read();
        self.structure_locks.fetch_add(1, Ordering::SeqCst);
        StructureLock {
            locks: Arc::clone(&self.structure_locks),
        }
    }

    /// Returns `true` while any [`StructureLock`] is alive.
    pub fn is_structure_locked(&self) -> bool {
        self.structure_locks.load(Ordering::SeqCst) > 0
    }

    fn write_unlocked(&self) -> ReorderResult<RwLockWriteGuard<'_, Vec<T>>> {
        let items = self.items.write();
        if self.is_structure_locked() {
            tracing::debug!(target: targets::MODEL, "mutation rejected during drag");
            return Err(ReorderError::ModelLocked);
        }
        Ok(items)
    }

    /// Appends an item to the end of the list.
    pub fn push(&self, item: T) -> ReorderResult<()> {
        let row = {
            let mut items = self.write_unlocked()?;
            items.push(item);
            items.len() - 1
        };
        self.signals.row_inserted.emit(row);
        Ok(())
    }

    /// Inserts an item at `index`, shifting later items down.
    pub fn insert(&self, index: usize, item: T) -> ReorderResult<()> {
        {
            let mut items = self.write_unlocked()?;
            let len = items.len();
            if index > len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
            items.insert(index, item);
        }
        self.signals.row_inserted.emit(index);
        Ok(())
    }

    /// Removes and returns the item at `index`.
    pub fn remove(&self, index: usize) -> ReorderResult<T> {
        let removed = {
            let mut items = self.write_unlocked()?;
            let len = items.len();
            if index >= len {
                return Err(ReorderError::IndexOutOfRange { index, len });
            }
            items.remove(index)
        };
        self.signals.row_removed.emit(index);
        Ok(removed)
    }

    /// Removes all items from the model.
    pub fn clear(&self) -> ReorderResult<()> {
        self.write_unlocked()?.clear();
        self.signals.reset.emit(());
        Ok(())
    }

    /// Replaces all items in the model.
    pub fn set_items(&self, items: Vec<T>) -> ReorderResult<()> {
        *self.write_unlocked()? = items;
        self.signals.reset.emit(());
        Ok(())
    }
}

impl<T: Clone> ListModel<T> {
    /// Returns a copy of the items in their current order.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T> From<Vec<T>> for ListModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}
