//! Capacity growth policy of the primary store.
//!
//! Small stores double and round to a multiple of 8, medium stores double
//! and round to a multiple of 1024, and stores beyond one mebi-element grow
//! linearly by about one mebi-element at a time, rounded to that granularity.

const SMALL_GRANULE: usize = 8;
const MEDIUM_GRANULE: usize = 1024;
const LARGE_GRANULE: usize = 1024 * 1024;

/// Returns the capacity to grow to so that `required` elements fit.
///
/// The result is always at least `required`; if the rounding arithmetic
/// would overflow, `required` itself is returned.
pub(crate) fn grown_capacity(required: usize) -> usize {
    let grown = if required > LARGE_GRANULE {
        required
            .checked_add(LARGE_GRANULE)
            .and_then(|padded| round_up(padded, LARGE_GRANULE))
    } else if required > MEDIUM_GRANULE {
        required
            .checked_mul(2)
            .and_then(|doubled| round_up(doubled, MEDIUM_GRANULE))
    } else {
        required
            .checked_mul(2)
            .and_then(|doubled| round_up(doubled, SMALL_GRANULE))
    };
    grown.unwrap_or(required)
}

/// Rounds `value` up to a multiple of `granule`, a power of two.
fn round_up(value: usize, granule: usize) -> Option<usize> {
    debug_assert!(granule.is_power_of_two());
    value
        .checked_add(granule - 1)
        .map(|padded| padded & !(granule - 1))
}
