//! # batchset
//!
//! A write-optimized ordered set for bulk, insert-heavy workloads.
//!
//! ## Overview
//!
//! [`BatchSet`] accepts inserts in O(1) amortized time by appending them to a
//! staging buffer. The buffer is folded into a sorted, deduplicated primary
//! store only when a read, a removal or a full buffer needs a consistent
//! view. Reads therefore take `&mut self`.
//!
//! - **Set**: [`BatchSet`], [`StolenData`]
//! - **Configuration**: [`BatchSetConfig`]
//! - **Errors**: [`BatchSetError`]
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`BatchSetConfig`]
//!
//! ## Logging
//!
//! Merges, store growth and ownership transfers emit [`tracing`] events at
//! `trace` and `debug` level. No subscriber is installed by the library.
//!
//! ## Example
//!
//! ```rust
//! use batchset::prelude::*;
//!
//! let mut set = BatchSet::with_config(BatchSetConfig::default().with_buffer_capacity(64));
//! set.extend([5, 3, 5, 1]);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(*set.at(0), 1);
//! assert_eq!(set.as_slice(), &[1, 3, 5]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use batchset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::BatchSetConfig;
    pub use crate::error::BatchSetError;
    pub use crate::set::{BatchSet, StolenData};
}

pub mod config;
pub mod error;
pub mod set;

pub use config::BatchSetConfig;
pub use error::{BatchSetError, Result};
pub use set::{BatchSet, StolenData};
