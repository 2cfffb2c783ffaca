//! Write-optimized ordered set.
//!
//! [`BatchSet`] splits its state into two owned vectors:
//!
//! - a **primary store**, sorted ascending and free of duplicates after every
//!   flush, and
//! - a **staging buffer** of fixed capacity that collects raw inserts in
//!   arrival order, duplicates included.
//!
//! Inserts only touch the staging buffer. A *flush* sorts the buffer, drops
//! keys that repeat or that the store already holds, grows the store if
//! needed and merges the survivors into the store. Flushes happen when the
//! buffer fills up and before every operation that reads the store.
//!
//! # Time Complexity
//!
//! With `M` the buffer capacity and `N` the store length:
//!
//! | Operation        | Cost (excluding a pending flush) |
//! |------------------|----------------------------------|
//! | `insert`         | O(1) amortized                   |
//! | `remove`         | O(N)                             |
//! | `contains`       | O(log N)                         |
//! | `len`, `at`      | O(1)                             |
//! | `clear`          | O(1)                             |
//! | `steal_data`     | O(1)                             |
//! | flush            | O(M log M) + O(M + N)            |
//!
//! Deduplication during a flush scans the store linearly while it is small
//! and switches to a binary search per staged key once the store reaches a
//! threshold derived from `M`, keeping that phase within O(M log N).
//!
//! # Examples
//!
//! ```rust
//! use batchset::BatchSet;
//!
//! let mut set = BatchSet::with_capacity(0, 1024);
//! for key in (0..10_000_u64).map(|value| value * 7 % 1000) {
//!     set.insert(key);
//! }
//! assert_eq!(set.len(), 1000);
//! assert!(set.as_slice().windows(2).all(|pair| pair[0] < pair[1]));
//! ```

mod batch_set;
mod growth;
mod merge;
mod stolen;
mod trade_off;

pub use batch_set::BatchSet;
pub use stolen::StolenData;
