//! The primary store handed out by [`BatchSet::steal_data`](crate::BatchSet::steal_data).

/// Sorted, duplicate-free contents taken out of a [`BatchSet`](crate::BatchSet),
/// together with the logical capacity the set had reserved for them.
///
/// The caller owns the vector outright; the set keeps no reference to it.
///
/// # Examples
///
/// ```rust
/// use batchset::BatchSet;
///
/// let mut set = BatchSet::new();
/// set.extend([3, 1, 2, 3]);
///
/// let stolen = set.steal_data();
/// assert_eq!(stolen.as_slice(), &[1, 2, 3]);
/// assert_eq!(stolen.len(), 3);
/// assert!(stolen.capacity() >= 3);
/// assert!(set.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StolenData<T> {
    elements: Vec<T>,
    capacity: usize,
}

impl<T> StolenData<T> {
    pub(crate) const fn new(elements: Vec<T>, capacity: usize) -> Self {
        Self { elements, capacity }
    }

    /// The stolen elements in ascending order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Number of stolen elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set was empty when it was stolen from.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Logical capacity the set had reserved for its store.
    ///
    /// The vector's own [`Vec::capacity`] is at least this large.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the stolen data, returning the sorted vector.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Consumes the stolen data, returning the vector, its length and the
    /// logical capacity.
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, usize, usize) {
        let count = self.elements.len();
        (self.elements, count, self.capacity)
    }
}

impl<T> IntoIterator for StolenData<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn into_parts_reports_count_and_capacity() {
        let mut elements = Vec::with_capacity(16);
        elements.extend([1, 2, 3]);
        let stolen = StolenData::new(elements, 16);

        let (elements, count, capacity) = stolen.into_parts();
        assert_eq!(elements, vec![1, 2, 3]);
        assert_eq!(count, 3);
        assert_eq!(capacity, 16);
    }

    #[rstest]
    fn empty_stolen_data() {
        let stolen: StolenData<u64> = StolenData::new(Vec::new(), 8);
        assert!(stolen.is_empty());
        assert_eq!(stolen.len(), 0);
        assert_eq!(stolen.into_iter().count(), 0);
    }
}
