//! Median Absolute Deviation (MAD) for robust scale estimation.
//!
//! ## Purpose
//!
//! This module provides robust scale estimation using the Median Absolute
//! Deviation about a given center, which is resistant to outliers.
//!
//! ## Design notes
//!
//! * **Formula**: MAD = median(|x_i - center|).
//! * **Consistency**: Multiplying the MAD by [`MAD_TO_SIGMA`] makes it a
//!   consistent estimator of the standard deviation under normality.
//!
//! ## Key concepts
//!
//! * **Robustness**: 50% breakdown point (safe against just under half the
//!   observations being arbitrary).
//!
//! ## Invariants
//!
//! * MAD >= 0 for any input.
//! * Handles even and odd population sizes correctly.
//!
//! ## Non-goals
//!
//! * This module does not provide weighted MAD variants.
//! * This module does not handle non-finite values (NaN/Inf).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::median::median;

// ============================================================================
// Constants
// ============================================================================

/// Scale factor converting a MAD into a normal-consistent standard deviation
/// estimate: 1/Phi^-1(3/4).
pub const MAD_TO_SIGMA: f64 = 1.4826;

// ============================================================================
// MAD Computation
// ============================================================================

/// Compute the Median Absolute Deviation of `vals` about `center`.
///
/// Works on a private copy; the input slice is left untouched.
#[inline]
pub fn mad<T: Float>(vals: &[T], center: T) -> T {
    if vals.is_empty() {
        return T::zero();
    }

    let mut deviations: Vec<T> = vals.iter().map(|&x| (x - center).abs()).collect();
    median(&mut deviations)
}
