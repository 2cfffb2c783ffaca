//! The [`BatchSet`] container.

use std::borrow::Borrow;
use std::fmt;

use tracing::{debug, trace};

use super::growth::grown_capacity;
use super::merge::{DedupStrategy, merge_into, retain_unseen};
use super::stolen::StolenData;
use super::trade_off::{OverflowGuard, binary_search_trade_off};
use crate::config::{BatchSetConfig, MIN_CAPACITY};
use crate::error::{Allocation, BatchSetError, Result};

/// An ordered set that buffers inserts and merges them lazily.
///
/// Inserted keys are appended to a fixed-capacity staging buffer. The buffer
/// is sorted, deduplicated and merged into the sorted primary store when it
/// fills up, or when an operation needs a consistent view of the set
/// (lookups, removals, indexing, iteration). Those operations therefore take
/// `&mut self`.
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Ord`.
///
/// # Examples
///
/// ```rust
/// use batchset::BatchSet;
///
/// let mut set = BatchSet::new();
/// for key in [5, 3, 5, 1] {
///     set.insert(key);
/// }
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.as_slice(), &[1, 3, 5]);
/// assert!(set.contains(&3));
/// ```
pub struct BatchSet<T> {
    store: Vec<T>,
    store_capacity: usize,
    buffer: Vec<T>,
    buffer_capacity: usize,
    trade_off: usize,
}

static_assertions::assert_impl_all!(BatchSet<u64>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(BatchSet<String>: Send, Sync, Clone, Default);
static_assertions::assert_not_impl_any!(BatchSet<std::rc::Rc<u64>>: Send, Sync);
static_assertions::assert_impl_all!(BatchSet<std::cmp::Reverse<std::time::Instant>>: Send, Sync, Default);

impl<T: Ord> BatchSet<T> {
    /// Creates an empty set with the default capacities.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::BatchSet;
    ///
    /// let set: BatchSet<u64> = BatchSet::new();
    /// assert_eq!(set.capacity(), 8);
    /// assert_eq!(set.buffer_capacity(), 1024);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BatchSetConfig::default())
    }

    /// Creates an empty set with the given store and buffer capacities.
    ///
    /// Both capacities are raised to at least 8.
    #[must_use]
    pub fn with_capacity(initial_capacity: usize, buffer_capacity: usize) -> Self {
        Self::with_config(BatchSetConfig::new(initial_capacity, buffer_capacity))
    }

    /// Creates an empty set sized by `config`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::{BatchSet, BatchSetConfig};
    ///
    /// let config = BatchSetConfig::default().with_buffer_capacity(16);
    /// let set: BatchSet<u32> = BatchSet::with_config(config);
    /// assert_eq!(set.buffer_capacity(), 16);
    /// ```
    #[must_use]
    pub fn with_config(config: BatchSetConfig) -> Self {
        let store_capacity = config.effective_initial_capacity();
        let buffer_capacity = config.effective_buffer_capacity();
        Self {
            store: Vec::with_capacity(store_capacity),
            store_capacity,
            buffer: Vec::with_capacity(buffer_capacity),
            buffer_capacity,
            trade_off: binary_search_trade_off(buffer_capacity, OverflowGuard::LoopCondition),
        }
    }

    /// Creates an empty set sized by `config`, reporting allocation failure
    /// instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`BatchSetError::Allocation`] if either the store or the
    /// staging buffer cannot be reserved.
    pub fn try_with_config(config: BatchSetConfig) -> Result<Self> {
        let store_capacity = config.effective_initial_capacity();
        let buffer_capacity = config.effective_buffer_capacity();
        Ok(Self {
            store: try_reserved(Allocation::Store, store_capacity)?,
            store_capacity,
            buffer: try_reserved(Allocation::Buffer, buffer_capacity)?,
            buffer_capacity,
            trade_off: binary_search_trade_off(buffer_capacity, OverflowGuard::LoopCondition),
        })
    }

    /// Creates a set holding the distinct values of `elements`, with the
    /// default capacities.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::BatchSet;
    ///
    /// let mut set = BatchSet::from_slice(&[9, 1, 9, 2, 1]);
    /// assert_eq!(set.as_slice(), &[1, 2, 9]);
    /// ```
    #[must_use]
    pub fn from_slice(elements: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from_slice_with_config(elements, BatchSetConfig::default())
    }

    /// Creates a set holding the distinct values of `elements`, sized by
    /// `config`.
    ///
    /// The store capacity is at least `elements.len()`.
    ///
    /// # Complexity
    ///
    /// O(n log n) for the sort, O(n) for the deduplication.
    #[must_use]
    pub fn from_slice_with_config(elements: &[T], config: BatchSetConfig) -> Self
    where
        T: Clone,
    {
        let store_capacity = config.effective_initial_capacity().max(elements.len());
        let mut store = Vec::with_capacity(store_capacity);
        store.extend_from_slice(elements);
        Self::from_unsorted_store(store, store_capacity, config)
    }

    /// Creates a set from the distinct values of `elements`, reusing the
    /// vector's allocation.
    #[must_use]
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self::from_vec_with_config(elements, BatchSetConfig::default())
    }

    /// Creates a set from the distinct values of `elements`, reusing the
    /// vector's allocation and reserving at least the configured capacity.
    #[must_use]
    pub fn from_vec_with_config(mut elements: Vec<T>, config: BatchSetConfig) -> Self {
        let store_capacity = config.effective_initial_capacity().max(elements.len());
        elements.reserve_exact(store_capacity - elements.len());
        Self::from_unsorted_store(elements, store_capacity, config)
    }

    fn from_unsorted_store(mut store: Vec<T>, store_capacity: usize, config: BatchSetConfig) -> Self {
        store.sort_unstable();
        // Keeps the first element of every run of equal values.
        store.dedup();

        let buffer_capacity = config.effective_buffer_capacity();
        Self {
            store,
            store_capacity,
            buffer: Vec::with_capacity(buffer_capacity),
            buffer_capacity,
            trade_off: binary_search_trade_off(buffer_capacity, OverflowGuard::AfterIncrement),
        }
    }

    /// Stages `key` for insertion.
    ///
    /// The key becomes visible at the next flush. When this insert fills the
    /// staging buffer, the flush happens immediately.
    ///
    /// # Complexity
    ///
    /// O(1) amortized. A triggered merge costs O(M log M) for sorting the
    /// buffer plus O(M + N) or O(M log N) for deduplication plus O(M + N) for
    /// the merge, with M the buffer capacity and N the store length.
    #[inline]
    pub fn insert(&mut self, key: T) {
        self.buffer.push(key);
        if self.buffer.len() >= self.buffer_capacity {
            self.merge();
        }
    }

    /// Removes `key` from the set, returning whether it was present.
    ///
    /// # Complexity
    ///
    /// O(log N) to find the key plus O(N) to close the gap, after flushing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::BatchSet;
    ///
    /// let mut set = BatchSet::from_slice(&[1, 2, 3]);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// assert_eq!(set.as_slice(), &[1, 3]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.flush();
        match self.store.binary_search_by(|item| item.borrow().cmp(key)) {
            Ok(position) => {
                self.store.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if the set contains `key`.
    ///
    /// Supports borrowed lookups, e.g. `&str` keys for a `BatchSet<String>`.
    ///
    /// # Complexity
    ///
    /// O(log N) after flushing.
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.flush();
        self.store
            .binary_search_by(|item| item.borrow().cmp(key))
            .is_ok()
    }

    /// Number of distinct elements in the set.
    #[must_use]
    pub fn len(&mut self) -> usize {
        self.flush();
        self.store.len()
    }

    /// Returns `true` if the set holds no elements.
    #[must_use]
    pub fn is_empty(&mut self) -> bool {
        self.len() == 0
    }

    /// Returns the element at `position` in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `position >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::BatchSet;
    ///
    /// let mut set: BatchSet<i32> = [30, 10, 20].into_iter().collect();
    /// assert_eq!(*set.at(0), 10);
    /// assert_eq!(*set.at(2), 30);
    /// ```
    #[must_use]
    pub fn at(&mut self, position: usize) -> &T {
        self.flush();
        let count = self.store.len();
        assert!(
            position < count,
            "position {position} out of bounds for a set of {count} elements"
        );
        &self.store[position]
    }

    /// Returns the element at `position` in ascending order, or `None` if
    /// out of range.
    #[must_use]
    pub fn get(&mut self, position: usize) -> Option<&T> {
        self.flush();
        self.store.get(position)
    }

    /// All elements in ascending order.
    #[must_use]
    pub fn as_slice(&mut self) -> &[T] {
        self.flush();
        &self.store
    }

    /// Iterates over the elements in ascending order.
    pub fn iter(&mut self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Consumes the set, returning its elements in ascending order.
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.flush();
        self.store
    }

    /// Takes the sorted store out of the set.
    ///
    /// The set is left empty with a fresh store of the minimum capacity; the
    /// staging buffer and its capacity are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use batchset::BatchSet;
    ///
    /// let mut set = BatchSet::from_slice(&[4, 2, 4]);
    /// let (elements, count, capacity) = set.steal_data().into_parts();
    /// assert_eq!(elements, vec![2, 4]);
    /// assert_eq!(count, 2);
    /// assert_eq!(capacity, 8);
    /// assert_eq!(set.capacity(), 8);
    /// ```
    pub fn steal_data(&mut self) -> StolenData<T> {
        self.flush();
        let elements = std::mem::replace(&mut self.store, Vec::with_capacity(MIN_CAPACITY));
        let capacity = std::mem::replace(&mut self.store_capacity, MIN_CAPACITY);
        debug!(count = elements.len(), capacity, "stole primary store");
        StolenData::new(elements, capacity)
    }

    /// Removes every element, pending or merged, keeping both allocations.
    pub fn clear(&mut self) {
        self.store.clear();
        self.buffer.clear();
    }

    /// Merges pending inserts into the store.
    ///
    /// Reads flush on their own; calling this is only needed to control when
    /// the merge cost is paid.
    pub fn flush(&mut self) {
        if !self.buffer.is_empty() {
            self.merge();
        }
    }

    fn merge(&mut self) {
        debug_assert!(!self.buffer.is_empty());

        let staged = self.buffer.len();
        let existing = self.store.len();
        let strategy = DedupStrategy::select(existing, self.trade_off);

        self.buffer.sort_unstable();
        let surviving = retain_unseen(&mut self.buffer, &self.store, strategy);
        self.buffer.truncate(surviving);
        trace!(staged, surviving, existing, %strategy, "merging staged keys");

        if surviving == 0 {
            return;
        }

        let required = existing + surviving;
        if required > self.store_capacity {
            self.grow(required);
        }
        merge_into(&mut self.store, &mut self.buffer);
    }

    fn grow(&mut self, required: usize) {
        let grown = grown_capacity(required);
        debug!(from = self.store_capacity, to = grown, required, "growing primary store");
        // Relocates the existing elements by move.
        self.store.reserve_exact(grown - self.store.len());
        self.store_capacity = grown;
    }
}

impl<T> BatchSet<T> {
    /// Number of inserts waiting in the staging buffer.
    ///
    /// Does not flush.
    #[inline]
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Logical capacity of the primary store.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.store_capacity
    }

    /// Fixed capacity of the staging buffer.
    #[inline]
    #[must_use]
    pub const fn buffer_capacity(&self) -> usize {
        self.buffer_capacity
    }

    /// Store length from which merges deduplicate by binary search instead
    /// of a linear scan. `usize::MAX` means never.
    #[inline]
    #[must_use]
    pub const fn binary_search_trade_off(&self) -> usize {
        self.trade_off
    }
}

fn try_reserved<T>(what: Allocation, requested: usize) -> Result<Vec<T>> {
    let mut vector = Vec::new();
    vector
        .try_reserve_exact(requested)
        .map_err(|source| BatchSetError::Allocation {
            what,
            requested,
            source,
        })?;
    Ok(vector)
}

impl<T: Clone> Clone for BatchSet<T> {
    fn clone(&self) -> Self {
        let mut store = Vec::with_capacity(self.store_capacity);
        store.extend_from_slice(&self.store);
        let mut buffer = Vec::with_capacity(self.buffer_capacity);
        buffer.extend_from_slice(&self.buffer);
        Self {
            store,
            store_capacity: self.store_capacity,
            buffer,
            buffer_capacity: self.buffer_capacity,
            trade_off: self.trade_off,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.store.clear();
        self.store.reserve_exact(source.store_capacity);
        self.store.extend_from_slice(&source.store);
        self.buffer.clear();
        self.buffer.reserve_exact(source.buffer_capacity);
        self.buffer.extend_from_slice(&source.buffer);
        self.store_capacity = source.store_capacity;
        self.buffer_capacity = source.buffer_capacity;
        self.trade_off = source.trade_off;
    }
}

impl<T: Ord> Default for BatchSet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for BatchSet<T> {
    /// Shows the merged store and the number of pending inserts without
    /// flushing.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BatchSet")
            .field("store", &self.store)
            .field("pending", &self.buffer.len())
            .field("capacity", &self.store_capacity)
            .field("buffer_capacity", &self.buffer_capacity)
            .finish()
    }
}

impl<T: Ord> Extend<T> for BatchSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T: Ord> FromIterator<T> for BatchSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: Ord> IntoIterator for BatchSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a mut BatchSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
