//! Median computation via order statistics.
//!
//! ## Purpose
//!
//! This module provides the median primitive used to initialize the robust
//! estimator and to compute the MAD.
//!
//! ## Design notes
//!
//! * **Algorithm**: Uses Quickselect (`select_nth_unstable_by`) for O(n)
//!   expected time instead of a full sort.
//! * **In-place**: Operates on a caller-provided scratch slice; callers that
//!   must preserve their data pass a copy.
//! * **Even lengths**: The median is the arithmetic mean of the two central
//!   order statistics.
//!
//! ## Invariants
//!
//! * The slice contents are permuted but never modified in value.
//! * Deterministic for a given input ordering.
//!
//! ## Non-goals
//!
//! * This module does not handle non-finite values (NaN/Inf); inputs are
//!   validated upstream.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Median Computation
// ============================================================================

/// Compute the median of a slice in-place using Quickselect.
///
/// Returns zero for an empty slice; callers guard emptiness where it is an
/// error.
#[inline]
pub fn median<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;

    if n % 2 == 0 {
        // Even length: average of the two middle values
        vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
        let upper = vals[mid];

        // Largest value in the lower half
        let lower = vals[..mid].iter().copied().fold(T::neg_infinity(), T::max);

        (lower + upper) / T::from(2.0).unwrap()
    } else {
        // Odd length: middle value
        vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
        vals[mid]
    }
}
