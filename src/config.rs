//! Sizing configuration for [`BatchSet`](crate::BatchSet).
//!
//! A [`BatchSetConfig`] carries the two capacities a set is created with:
//! the initial capacity of the sorted primary store and the fixed capacity of
//! the staging buffer that collects raw inserts. Both are floored to
//! [`MIN_CAPACITY`] when a set is built from them.
//!
//! Larger buffers spread the cost of a merge over more inserts, at the price
//! of longer individual merges and more pending memory.
//!
//! # Examples
//!
//! ```rust
//! use batchset::BatchSetConfig;
//!
//! let config = BatchSetConfig::default().with_buffer_capacity(4096);
//! assert_eq!(config.effective_buffer_capacity(), 4096);
//! assert_eq!(config.effective_initial_capacity(), 8);
//! ```

/// Smallest capacity either vector of a set is ever created with.
pub const MIN_CAPACITY: usize = 8;

/// Staging buffer capacity used when none is given.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Capacities used to construct a [`BatchSet`](crate::BatchSet).
///
/// Values below [`MIN_CAPACITY`] are accepted and raised to the floor when
/// the set is built, so a zero `initial_capacity` simply means "smallest".
///
/// With the `serde` feature enabled the config can be deserialized from any
/// serde format; missing fields fall back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BatchSetConfig {
    /// Requested capacity of the sorted primary store.
    pub initial_capacity: usize,
    /// Requested capacity of the staging buffer.
    pub buffer_capacity: usize,
}

impl BatchSetConfig {
    /// Creates a config with the given store and buffer capacities.
    #[inline]
    #[must_use]
    pub const fn new(initial_capacity: usize, buffer_capacity: usize) -> Self {
        Self {
            initial_capacity,
            buffer_capacity,
        }
    }

    /// Returns a copy with the initial store capacity replaced.
    #[inline]
    #[must_use]
    pub const fn with_initial_capacity(self, initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            ..self
        }
    }

    /// Returns a copy with the staging buffer capacity replaced.
    #[inline]
    #[must_use]
    pub const fn with_buffer_capacity(self, buffer_capacity: usize) -> Self {
        Self {
            buffer_capacity,
            ..self
        }
    }

    /// Store capacity a set built from this config starts with.
    #[inline]
    #[must_use]
    pub const fn effective_initial_capacity(&self) -> usize {
        floor_capacity(self.initial_capacity)
    }

    /// Staging buffer capacity a set built from this config uses.
    #[inline]
    #[must_use]
    pub const fn effective_buffer_capacity(&self) -> usize {
        floor_capacity(self.buffer_capacity)
    }
}

impl Default for BatchSetConfig {
    #[inline]
    fn default() -> Self {
        Self::new(0, DEFAULT_BUFFER_CAPACITY)
    }
}

const fn floor_capacity(requested: usize) -> usize {
    if requested < MIN_CAPACITY {
        MIN_CAPACITY
    } else {
        requested
    }
}
