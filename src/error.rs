//! Error types for fallible set construction.
//!
//! Almost every operation on a [`BatchSet`](crate::BatchSet) is infallible:
//! misuse such as out-of-range indexing is a programming error and panics.
//! The one recoverable failure is asking for capacities the allocator cannot
//! satisfy through [`BatchSet::try_with_config`](crate::BatchSet::try_with_config).

use std::collections::TryReserveError;

/// Which of the two owned vectors an allocation was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Allocation {
    /// The sorted primary store.
    Store,
    /// The staging buffer holding pending inserts.
    Buffer,
}

impl std::fmt::Display for Allocation {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store => formatter.write_str("primary store"),
            Self::Buffer => formatter.write_str("staging buffer"),
        }
    }
}

/// Errors reported by fallible [`BatchSet`](crate::BatchSet) constructors.
///
/// # Examples
///
/// ```rust
/// use batchset::{BatchSet, BatchSetConfig, BatchSetError};
///
/// let config = BatchSetConfig::new(usize::MAX, 1024);
/// let result = BatchSet::<u64>::try_with_config(config);
/// assert!(matches!(result, Err(BatchSetError::Allocation { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BatchSetError {
    /// Reserving one of the owned vectors failed.
    #[error("failed to allocate {what} for {requested} elements")]
    Allocation {
        /// The vector being reserved.
        what: Allocation,
        /// Number of elements requested.
        requested: usize,
        /// Underlying reservation failure.
        #[source]
        source: TryReserveError,
    },
}

/// Result alias for fallible set operations.
pub type Result<T> = std::result::Result<T, BatchSetError>;
