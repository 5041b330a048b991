//! Tests for the numerical primitives: median, MAD, and bounded influence
//! functions.
//!
//! These verify the building blocks the robust estimator is assembled from:
//! - Order-statistic median with the even-length mean rule
//! - Median Absolute Deviation about a given center
//! - Winsorization and the Huber psi clamp
//!
//! ## Test Organization
//!
//! 1. **Median** - odd/even lengths, ties, single element
//! 2. **MAD** - centers, degenerate inputs
//! 3. **Influence functions** - pass-through and saturation

use approx::assert_relative_eq;

use ptcalc_rs::math::huber::{huber_psi, winsorize};
use ptcalc_rs::math::mad::{mad, MAD_TO_SIGMA};
use ptcalc_rs::math::median::median;

// ============================================================================
// Median Tests
// ============================================================================

/// Odd-length median is the middle order statistic.
#[test]
fn test_median_odd_length() {
    let mut data = [3.0, 1.0, 2.0];
    assert_relative_eq!(median(&mut data), 2.0);
}

/// Even-length median averages the two central order statistics.
#[test]
fn test_median_even_length() {
    let mut data = [4.0, 1.0, 3.0, 2.0];
    assert_relative_eq!(median(&mut data), 2.5);
}

/// A single element is its own median.
#[test]
fn test_median_single_element() {
    let mut data = [7.5];
    assert_relative_eq!(median(&mut data), 7.5);
}

/// Ties around the middle do not disturb the result.
#[test]
fn test_median_with_ties() {
    let mut data = [2.0, 2.0, 2.0, 5.0, 1.0];
    assert_relative_eq!(median(&mut data), 2.0);
}

/// Median of two elements is their mean.
#[test]
fn test_median_two_elements() {
    let mut data = [10.0, 10.2];
    assert_relative_eq!(median(&mut data), 10.1);
}

/// Negative values are handled like any others.
#[test]
fn test_median_mixed_signs() {
    let mut data = [-10.0, 0.0, 10.0];
    assert_relative_eq!(median(&mut data), 0.0);
}

// ============================================================================
// MAD Tests
// ============================================================================

/// MAD about the median of a simple symmetric sample.
///
/// Deviations from 3 are [2, 1, 0, 1, 2]; their median is 1.
#[test]
fn test_mad_simple() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_relative_eq!(mad(&data, 3.0), 1.0);
}

/// MAD of identical values is zero.
#[test]
fn test_mad_identical_values() {
    let data = [5.0, 5.0, 5.0, 5.0];
    assert_relative_eq!(mad(&data, 5.0), 0.0);
}

/// MAD is zero when more than half the values equal the center.
#[test]
fn test_mad_majority_at_center() {
    let data = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 1000.0];
    assert_relative_eq!(mad(&data, 10.0), 0.0);
}

/// The input slice is left untouched.
#[test]
fn test_mad_preserves_input() {
    let data = [3.0, 1.0, 2.0];
    let _ = mad(&data, 2.0);
    assert_eq!(data, [3.0, 1.0, 2.0]);
}

/// The normal-consistency factor matches the conventional constant.
#[test]
fn test_mad_to_sigma_constant() {
    assert_relative_eq!(MAD_TO_SIGMA, 1.4826);
}

// ============================================================================
// Influence Function Tests
// ============================================================================

/// Values inside the clamp interval pass through unchanged.
#[test]
fn test_winsorize_pass_through() {
    assert_eq!(winsorize(10.0, 9.5, 10.5), 10.0);
    assert_eq!(winsorize(9.5, 9.5, 10.5), 9.5);
    assert_eq!(winsorize(10.5, 9.5, 10.5), 10.5);
}

/// Values outside the interval saturate at the nearer bound.
#[test]
fn test_winsorize_saturation() {
    assert_eq!(winsorize(1000.0, 9.5, 10.5), 10.5);
    assert_eq!(winsorize(-1000.0, 9.5, 10.5), 9.5);
}

/// Huber psi is the identity inside [-c, c] and saturated outside.
#[test]
fn test_huber_psi() {
    let c = 1.5;
    assert_eq!(huber_psi(1.0, c), 1.0);
    assert_eq!(huber_psi(-1.0, c), -1.0);
    assert_eq!(huber_psi(2.0, c), 1.5);
    assert_eq!(huber_psi(-2.0, c), -1.5);
}
