//! Threshold between the linear and binary-search deduplication strategies.
//!
//! Folding `M` staged keys into a store of `N` keys costs about `M + N`
//! comparisons with a linear merge and about `M * log2(N)` with one binary
//! search per staged key. For a fixed buffer capacity `M` the threshold is
//! the smallest power-of-two store size at which the binary search cost no
//! longer loses, found by walking `N` through powers of two starting at 4.

/// How the threshold loop detects wrap-around of the accumulated cost.
///
/// Empty and bulk construction historically used different guards. They
/// agree for every buffer capacity that can actually be allocated, but they
/// are kept apart so each constructor keeps its exact behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OverflowGuard {
    /// Checked in the loop condition (`cost > M`); `cost <= M` afterwards
    /// means the cost wrapped. Used by empty construction.
    LoopCondition,
    /// Checked right after each increment (`cost < M` breaks out); the same
    /// strict test afterwards means the cost wrapped. Used by bulk
    /// construction.
    AfterIncrement,
}

/// Computes the store size at which binary-search deduplication takes over.
///
/// Returns `usize::MAX` when the cost model overflows, which pins every merge
/// to the linear strategy.
pub(crate) const fn binary_search_trade_off(buffer_capacity: usize, guard: OverflowGuard) -> usize {
    let mut store_size: usize = 4;
    // buffer_capacity * log2(store_size)
    let mut search_cost = buffer_capacity.wrapping_mul(2);

    match guard {
        OverflowGuard::LoopCondition => {
            while buffer_capacity.wrapping_add(store_size) < search_cost
                && search_cost > buffer_capacity
            {
                store_size = store_size.wrapping_mul(2);
                search_cost = search_cost.wrapping_add(buffer_capacity);
            }
            if search_cost <= buffer_capacity {
                return usize::MAX;
            }
        }
        OverflowGuard::AfterIncrement => {
            while buffer_capacity.wrapping_add(store_size) < search_cost {
                store_size = store_size.wrapping_mul(2);
                search_cost = search_cost.wrapping_add(buffer_capacity);
                if search_cost < buffer_capacity {
                    break;
                }
            }
            if search_cost < buffer_capacity {
                return usize::MAX;
            }
        }
    }
    store_size
}
