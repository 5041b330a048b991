//! Tests for the iterative robust estimator (Algorithm A).
//!
//! These verify the estimator's contract:
//! - Convergence on clean data within a few iterations
//! - Bounded influence of gross outliers
//! - Degenerate-spread and tiny-sample short circuits
//! - Equivariance and determinism properties
//!
//! ## Test Organization
//!
//! 1. **Clean samples** - symmetric data, exact fixed points
//! 2. **Contaminated samples** - outlier resistance
//! 3. **Edge cases** - n = 1, n = 2, zero MAD, iteration cap
//! 4. **Properties** - determinism, equivariance, idempotence
//! 5. **Input validation** - parameter and shape errors

use approx::assert_relative_eq;

use ptcalc_rs::algorithms::algorithm_a::AlgorithmA;
use ptcalc_rs::primitives::errors::PtError;

/// Symmetric clean sample used by several tests.
const CLEAN: [f64; 5] = [9.8, 9.9, 10.0, 10.1, 10.2];

// ============================================================================
// Clean Samples
// ============================================================================

/// A symmetric sample converges to its center in very few iterations.
///
/// No observation is clipped at the 1.5-sigma cap here, so the scale is the
/// 1.134-corrected sample deviation: 1.134 * sqrt(0.025).
#[test]
fn test_clean_symmetric_sample() {
    let estimate = AlgorithmA::new().estimate(&CLEAN).unwrap();

    assert_relative_eq!(estimate.location, 10.0, epsilon = 1e-9);
    assert_relative_eq!(estimate.scale, 1.134 * 0.025_f64.sqrt(), epsilon = 1e-9);
    assert_eq!(estimate.p_used, 5);
    assert!(estimate.converged);
    assert!(estimate.iterations <= 3);
}

/// Two observations are a valid sample; the MAD is half the range.
#[test]
fn test_two_observations() {
    let estimate = AlgorithmA::new().estimate(&[10.0, 10.2]).unwrap();

    assert_relative_eq!(estimate.location, 10.1, epsilon = 1e-9);
    assert_relative_eq!(estimate.scale, 1.134 * (0.02_f64).sqrt(), epsilon = 1e-9);
    assert_eq!(estimate.p_used, 2);
    assert!(estimate.converged);
}

/// The estimator is generic over the float type.
#[test]
fn test_f32_precision() {
    let data: [f32; 5] = [9.8, 9.9, 10.0, 10.1, 10.2];
    let estimate = AlgorithmA::<f32>::new()
        .tolerance(1e-4)
        .estimate(&data)
        .unwrap();

    assert_relative_eq!(estimate.location, 10.0, epsilon = 1e-3);
    assert!(estimate.converged);
}

// ============================================================================
// Contaminated Samples
// ============================================================================

/// A gross outlier among many identical values hits the zero-MAD short
/// circuit: the median carries the estimate and the outlier has no pull.
#[test]
fn test_gross_outlier_majority_identical() {
    let data = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 1000.0];
    let estimate = AlgorithmA::new().estimate(&data).unwrap();

    assert_eq!(estimate.location, 10.0);
    assert_eq!(estimate.scale, 0.0);
    assert_eq!(estimate.iterations, 0);
    assert!(estimate.converged);
    assert_eq!(estimate.p_used, 10);
}

/// Replacing a minority of observations with arbitrary values moves the
/// location by at most 1.5 times the original scale (bounded influence).
#[test]
fn test_bounded_influence_of_outliers() {
    let clean = [
        9.8, 9.85, 9.9, 9.95, 10.0, 10.05, 10.1, 10.15, 10.2, 10.25,
    ];
    let mut contaminated = clean;
    contaminated[8] = 1000.0;
    contaminated[9] = 1000.0;

    let estimator = AlgorithmA::<f64>::new().max_iterations(200);
    let original = estimator.estimate(&clean).unwrap();
    let shifted = estimator.estimate(&contaminated).unwrap();

    assert!(shifted.converged);
    assert!(
        (shifted.location - original.location).abs() <= 1.5 * original.scale,
        "location moved {} with original scale {}",
        (shifted.location - original.location).abs(),
        original.scale
    );
    // Winsorization retains the outliers; nothing is discarded.
    assert_eq!(shifted.p_used, 10);
}

/// Breakdown at floor((n-1)/2) gross contamination: with 4 of 10
/// observations replaced by a distant value, the scale inflates until the
/// 1.5-sigma cap no longer clips anything, and the iteration settles on
/// the plain mean and 1.134-corrected deviation of the contaminated
/// sample. The 1.5-scale influence bound holds only below this level (see
/// `test_bounded_influence_of_outliers`); this pins the actual fixed
/// point so any change in breakdown behavior is caught.
#[test]
fn test_breakdown_at_half_minus_one_contamination() {
    let clean = [
        9.8, 9.85, 9.9, 9.95, 10.0, 10.05, 10.1, 10.15, 10.2, 10.25,
    ];
    let mut contaminated = clean;
    for slot in contaminated.iter_mut().skip(6) {
        *slot = 1000.0;
    }

    let estimator = AlgorithmA::new();
    let original = estimator.estimate(&clean).unwrap();
    let shifted = estimator.estimate(&contaminated).unwrap();

    // The run converges within the default cap; breakdown is not
    // non-convergence, it is convergence to the wrong place.
    assert!(shifted.converged);
    assert_eq!(shifted.p_used, 10);

    // Fixed point once winsorization is inactive: the arithmetic mean and
    // corrected sample deviation of the contaminated data.
    let n = contaminated.len() as f64;
    let mean = contaminated.iter().sum::<f64>() / n;
    let sum_sq: f64 = contaminated.iter().map(|&x| (x - mean) * (x - mean)).sum();
    let deviation = 1.134 * (sum_sq / (n - 1.0)).sqrt();
    assert_relative_eq!(shifted.location, mean, max_relative = 1e-9);
    assert_relative_eq!(shifted.scale, deviation, max_relative = 1e-9);

    // The influence bound does not survive this contamination level.
    assert!((shifted.location - original.location).abs() > 1.5 * original.scale);
}

// ============================================================================
// Edge Cases
// ============================================================================

/// A single observation is its own assigned value with zero spread.
#[test]
fn test_single_observation() {
    let estimate = AlgorithmA::new().estimate(&[42.0]).unwrap();

    assert_eq!(estimate.location, 42.0);
    assert_eq!(estimate.scale, 0.0);
    assert_eq!(estimate.p_used, 1);
    assert_eq!(estimate.iterations, 0);
    assert!(estimate.converged);
}

/// All-equal observations terminate immediately with zero scale.
#[test]
fn test_degenerate_equal_values() {
    let estimate = AlgorithmA::new().estimate(&[5.0, 5.0, 5.0, 5.0]).unwrap();

    assert_eq!(estimate.location, 5.0);
    assert_eq!(estimate.scale, 0.0);
    assert_eq!(estimate.iterations, 0);
    assert!(estimate.converged);
}

/// Hitting the iteration cap reports non-convergence instead of failing.
#[test]
fn test_iteration_cap_is_reported_not_raised() {
    let data = [
        9.8, 9.85, 9.9, 9.95, 10.0, 10.05, 10.1, 10.15, 1000.0, 1000.0,
    ];
    let estimate = AlgorithmA::<f64>::new()
        .max_iterations(1)
        .estimate(&data)
        .unwrap();

    assert!(!estimate.converged);
    assert_eq!(estimate.iterations, 1);
    assert!(estimate.location.is_finite());
    assert!(estimate.scale >= 0.0);
}

// ============================================================================
// Properties
// ============================================================================

/// Two runs over the same input produce bitwise-identical estimates.
#[test]
fn test_determinism() {
    let data = [
        9.8, 9.85, 9.9, 9.95, 10.0, 10.05, 10.1, 10.15, 1000.0, 12.0,
    ];
    let estimator = AlgorithmA::new();
    let first = estimator.estimate(&data).unwrap();
    let second = estimator.estimate(&data).unwrap();

    assert_eq!(first, second);
}

/// Affine transforms of the data transform the estimate the same way:
/// location is equivariant under `a*x + b`, scale under `a*x`.
#[test]
fn test_scale_shift_equivariance() {
    let a = 2.5;
    let b = 7.0;
    let transformed: Vec<f64> = CLEAN.iter().map(|&x| a * x + b).collect();

    let base = AlgorithmA::new().estimate(&CLEAN).unwrap();
    let scaled = AlgorithmA::new().estimate(&transformed).unwrap();

    assert_relative_eq!(scaled.location, a * base.location + b, epsilon = 1e-9);
    assert_relative_eq!(scaled.scale, a * base.scale, epsilon = 1e-9);
}

/// Restarting the iteration from a converged estimate finishes within a
/// single iteration.
#[test]
fn test_idempotence_at_fixed_point() {
    let estimator = AlgorithmA::new();
    let estimate = estimator.estimate(&CLEAN).unwrap();

    let resumed = estimator
        .estimate_from(&CLEAN, estimate.location, estimate.scale)
        .unwrap();

    assert!(resumed.converged);
    assert!(resumed.iterations <= 1);
    assert_relative_eq!(resumed.location, estimate.location, epsilon = 1e-12);
    assert_relative_eq!(resumed.scale, estimate.scale, epsilon = 1e-12);
}

// ============================================================================
// Input Validation
// ============================================================================

/// An empty vector is a shape error.
#[test]
fn test_empty_input() {
    let result = AlgorithmA::<f64>::new().estimate(&[]);
    assert!(matches!(result, Err(PtError::EmptyDataset)));
}

/// Non-finite entries are rejected with the offending row.
#[test]
fn test_non_finite_input() {
    let result = AlgorithmA::new().estimate(&[1.0, f64::NAN, 3.0]);
    assert!(matches!(
        result,
        Err(PtError::NonFiniteResult { row: 1, .. })
    ));

    let result = AlgorithmA::new().estimate(&[1.0, 2.0, f64::INFINITY]);
    assert!(matches!(
        result,
        Err(PtError::NonFiniteResult { row: 2, .. })
    ));
}

/// Non-positive tolerances and a zero iteration cap are parameter errors.
#[test]
fn test_invalid_parameters() {
    let result = AlgorithmA::new().tolerance(0.0).estimate(&CLEAN);
    assert!(matches!(
        result,
        Err(PtError::InvalidParameter {
            name: "tolerance",
            ..
        })
    ));

    let result = AlgorithmA::new().tolerance(f64::NAN).estimate(&CLEAN);
    assert!(matches!(
        result,
        Err(PtError::InvalidParameter {
            name: "tolerance",
            ..
        })
    ));

    let result = AlgorithmA::new().max_iterations(0).estimate(&CLEAN);
    assert!(matches!(
        result,
        Err(PtError::InvalidParameter {
            name: "max_iterations",
            ..
        })
    ));
}
