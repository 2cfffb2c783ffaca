//! Merge engine: folds sorted staged keys into the sorted primary store.
//!
//! A merge runs in two phases over an already sorted staging buffer:
//!
//! 1. [`retain_unseen`] compacts the staged keys in place, dropping repeats
//!    and keys the store already holds. A [`StoreCursor`] answers the
//!    membership questions, stepping either linearly or by binary search
//!    (see [`DedupStrategy`]); staged keys arrive in ascending order, so the
//!    cursor never moves backwards.
//! 2. [`merge_into`] interleaves the survivors with the store. The store
//!    prefix below the smallest survivor is left in place; the remaining
//!    store elements and the survivors are moved back behind it with a
//!    two-pointer walk.
//!
//! ```text
//!  0              settled                     existing + survivors
//! +--------------+---------------------------+
//! | left as is   | displaced tail + survivors|
//! +--------------+---------------------------+
//! ```

use std::fmt;

/// How staged keys are checked against the primary store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DedupStrategy {
    /// Lock-step scan of the store, `O(store + staged)`.
    Linear,
    /// Binary search over the unvisited part of the store per distinct
    /// staged key, `O(staged * log(store))`.
    BinarySearch,
}

impl DedupStrategy {
    /// Picks the strategy for a store of `store_len` elements.
    #[inline]
    pub(crate) const fn select(store_len: usize, trade_off: usize) -> Self {
        if store_len < trade_off {
            Self::Linear
        } else {
            Self::BinarySearch
        }
    }
}

impl fmt::Display for DedupStrategy {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => formatter.write_str("linear"),
            Self::BinarySearch => formatter.write_str("binary_search"),
        }
    }
}

/// Monotonic lower-bound cursor over a sorted store.
///
/// Probes must be made in ascending key order.
pub(crate) struct StoreCursor<'a, T> {
    store: &'a [T],
    position: usize,
    strategy: DedupStrategy,
}

impl<'a, T: Ord> StoreCursor<'a, T> {
    pub(crate) const fn new(store: &'a [T], strategy: DedupStrategy) -> Self {
        Self {
            store,
            position: 0,
            strategy,
        }
    }

    /// Moves the cursor to the first element not less than `key` and
    /// reports whether that element equals `key`.
    pub(crate) fn contains(&mut self, key: &T) -> bool {
        match self.strategy {
            DedupStrategy::Linear => {
                while self.position < self.store.len() && self.store[self.position] < *key {
                    self.position += 1;
                }
            }
            DedupStrategy::BinarySearch => {
                self.position += self.store[self.position..].partition_point(|item| item < key);
            }
        }
        self.store.get(self.position).is_some_and(|item| item == key)
    }
}

/// Compacts sorted `staged` keys in place, keeping each key only if it
/// differs from the key before it and is absent from `store`.
///
/// Survivors end up in `staged[..returned]` in ascending order; the rest of
/// the slice holds the rejected keys in unspecified order.
pub(crate) fn retain_unseen<T: Ord>(staged: &mut [T], store: &[T], strategy: DedupStrategy) -> usize {
    let mut cursor = StoreCursor::new(store, strategy);
    let mut kept = 0;
    // Where the previously visited staged key currently lives.
    let mut previous: Option<usize> = None;

    for index in 0..staged.len() {
        if previous.is_some_and(|slot| staged[slot] == staged[index]) {
            previous = Some(index);
            continue;
        }
        if cursor.contains(&staged[index]) {
            previous = Some(index);
        } else {
            staged.swap(kept, index);
            previous = Some(kept);
            kept += 1;
        }
    }
    kept
}

/// Merges the sorted, disjoint `staged` keys into `store`, draining `staged`.
///
/// Store elements below the smallest staged key stay where they are. The
/// rest are split off and interleaved with the staged keys, so the merge
/// writes into the store's own allocation; callers reserve room first to
/// keep it from reallocating. `staged` keeps its allocation.
pub(crate) fn merge_into<T: Ord>(store: &mut Vec<T>, staged: &mut Vec<T>) {
    let Some(smallest) = staged.first() else {
        return;
    };
    let settled = store.partition_point(|item| item < smallest);

    // Disjoint fast path: every staged key sorts after the store.
    if settled == store.len() {
        store.append(staged);
        return;
    }

    let mut displaced = store.split_off(settled).into_iter().peekable();
    let mut incoming = staged.drain(..).peekable();

    loop {
        let take_displaced = match (displaced.peek(), incoming.peek()) {
            (Some(left), Some(right)) => left < right,
            _ => break,
        };
        let next = if take_displaced {
            displaced.next()
        } else {
            incoming.next()
        };
        store.extend(next);
    }
    store.extend(displaced);
    store.extend(incoming);
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted_store() -> impl Strategy<Value = Vec<u16>> {
        prop::collection::btree_set(any::<u16>(), 0..300).prop_map(|keys| keys.into_iter().collect::<Vec<u16>>())
    }

    fn survivors(staged: &[u16], store: &[u16], strategy: DedupStrategy) -> Vec<u16> {
        let mut staged = staged.to_vec();
        let kept = retain_unseen(&mut staged, store, strategy);
        staged.truncate(kept);
        staged
    }

    proptest! {
        #[test]
        fn prop_strategies_keep_the_same_keys(
            store in sorted_store(),
            mut staged in prop::collection::vec(any::<u16>(), 0..300)
        ) {
            staged.sort_unstable();
            let linear = survivors(&staged, &store, DedupStrategy::Linear);
            let binary = survivors(&staged, &store, DedupStrategy::BinarySearch);
            prop_assert_eq!(&linear, &binary);

            let mut expected = staged.clone();
            expected.dedup();
            expected.retain(|key| store.binary_search(key).is_err());
            prop_assert_eq!(linear, expected);
        }

        #[test]
        fn prop_strategies_agree_on_overlapping_keys(
            store in prop::collection::btree_set(0_u16..64, 0..64),
            mut staged in prop::collection::vec(0_u16..64, 0..128)
        ) {
            let store: Vec<u16> = store.into_iter().collect();
            staged.sort_unstable();
            prop_assert_eq!(
                survivors(&staged, &store, DedupStrategy::Linear),
                survivors(&staged, &store, DedupStrategy::BinarySearch)
            );
        }

        #[test]
        fn prop_merge_into_matches_sorted_union(
            mut store in sorted_store(),
            mut staged in prop::collection::vec(any::<u16>(), 0..300)
        ) {
            staged.sort_unstable();
            staged.dedup();
            staged.retain(|key| store.binary_search(key).is_err());

            let mut expected: Vec<u16> = store.iter().chain(staged.iter()).copied().collect();
            expected.sort_unstable();

            merge_into(&mut store, &mut staged);
            prop_assert!(staged.is_empty());
            prop_assert_eq!(store, expected);
        }
    }
}
