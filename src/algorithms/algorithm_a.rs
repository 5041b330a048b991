//! Robust location/scale estimation (ISO 13528 Algorithm A).
//!
//! ## Purpose
//!
//! This module implements the iterative winsorized estimator of Annex C of
//! ISO 13528:2022. It produces a robust mean `x*` (used as the assigned
//! value for consensus rounds) and a robust standard deviation `s*` while
//! retaining every observation: outliers are pulled to a cap rather than
//! deleted.
//!
//! ## Design notes
//!
//! * **Initialization**: median and MAD scaled by 1.4826 for normal
//!   consistency.
//! * **Update**: observations are clamped to `x* ± 1.5 s*`, then the mean
//!   and the 1.134-corrected sample deviation of the clamped values become
//!   the next iterates. The 1.134 factor restores consistency with the
//!   normal standard deviation under 1.5-sigma winsorization and must not be
//!   substituted with another correction.
//! * **Convergence**: relative change test on both iterates; hitting the
//!   iteration cap is reported through [`RobustEstimate::converged`], never
//!   as an error.
//! * **Generics**: generic over `Float`; all arithmetic is IEEE 754 in the
//!   chosen precision and summation follows input order, so results are
//!   deterministic for identical input.
//!
//! ## Invariants
//!
//! * `scale >= 0` on every return path.
//! * `p_used` equals the input length: no observation is ever discarded.
//! * A zero initial MAD short-circuits with `scale = 0` and zero iterations.
//!
//! ## Non-goals
//!
//! * This module does not compute uncertainties or scores.
//! * This module does not apply outlier rejection tests; bounded influence
//!   is the only outlier policy.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::huber::winsorize;
use crate::math::mad::{mad, MAD_TO_SIGMA};
use crate::math::median::median;
use crate::primitives::errors::PtError;

// ============================================================================
// Constants
// ============================================================================

/// Default convergence tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Winsorization cap in units of the current scale.
const WINSOR_CAP: f64 = 1.5;

/// Consistency correction for the sample deviation of 1.5-sigma winsorized
/// normal data.
const WINSOR_CONSISTENCY: f64 = 1.134;

// ============================================================================
// Output
// ============================================================================

/// Result of a robust estimation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RobustEstimate<T> {
    /// Robust location `x*`.
    pub location: T,

    /// Robust scale `s*`.
    pub scale: T,

    /// Number of observations contributing to the estimate (always the full
    /// input length; winsorized points are retained).
    pub p_used: usize,

    /// Number of update iterations performed.
    pub iterations: usize,

    /// Whether the relative-change test passed within the iteration cap.
    pub converged: bool,
}

// ============================================================================
// Estimator
// ============================================================================

/// Iterative winsorized location/scale estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlgorithmA<T> {
    /// Relative convergence tolerance (> 0).
    pub tolerance: T,

    /// Maximum number of update iterations (>= 1).
    pub max_iterations: usize,
}

impl<T: Float> Default for AlgorithmA<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> AlgorithmA<T> {
    /// Create an estimator with the default tolerance and iteration cap.
    pub fn new() -> Self {
        Self {
            tolerance: T::from(DEFAULT_TOLERANCE).unwrap(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Set the relative convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    // ========================================================================
    // Main Entry Points
    // ========================================================================

    /// Estimate robust location and scale from raw participant results.
    ///
    /// Starts from the median and the normal-consistent MAD, then iterates
    /// the winsorized update until the relative change in both iterates
    /// drops below the tolerance or the cap is reached.
    pub fn estimate(&self, results: &[T]) -> Result<RobustEstimate<T>, PtError> {
        self.validate(results)?;

        if results.len() == 1 {
            return Ok(RobustEstimate {
                location: results[0],
                scale: T::zero(),
                p_used: 1,
                iterations: 0,
                converged: true,
            });
        }

        let mut scratch = results.to_vec();
        let location = median(&mut scratch);
        let scale = T::from(MAD_TO_SIGMA).unwrap() * mad(results, location);

        Ok(self.iterate(results, location, scale))
    }

    /// Resume estimation from a previously obtained location and scale.
    ///
    /// Restarting from a converged estimate completes within a single
    /// iteration; this entry point also supports warm starts across related
    /// rounds.
    pub fn estimate_from(
        &self,
        results: &[T],
        location: T,
        scale: T,
    ) -> Result<RobustEstimate<T>, PtError> {
        self.validate(results)?;
        if !location.is_finite() {
            return Err(PtError::InvalidParameter {
                name: "location",
                value: location.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !scale.is_finite() || scale < T::zero() {
            return Err(PtError::InvalidParameter {
                name: "scale",
                value: scale.to_f64().unwrap_or(f64::NAN),
            });
        }

        if results.len() == 1 {
            return Ok(RobustEstimate {
                location: results[0],
                scale: T::zero(),
                p_used: 1,
                iterations: 0,
                converged: true,
            });
        }

        Ok(self.iterate(results, location, scale))
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Run the winsorized update loop from the given starting iterates.
    fn iterate(&self, results: &[T], start_location: T, start_scale: T) -> RobustEstimate<T> {
        let n = results.len();
        let n_t = T::from(n).unwrap();
        let cap = T::from(WINSOR_CAP).unwrap();
        let consistency = T::from(WINSOR_CONSISTENCY).unwrap();
        let one = T::one();

        let mut location = start_location;
        let mut scale = start_scale;

        // Degenerate spread: more than half the values sit on the median.
        if scale.is_zero() {
            return RobustEstimate {
                location,
                scale: T::zero(),
                p_used: n,
                iterations: 0,
                converged: true,
            };
        }

        // Single O(n) buffer reused across iterations.
        let mut winsorized = vec![T::zero(); n];

        for k in 1..=self.max_iterations {
            let delta = cap * scale;
            let lo = location - delta;
            let hi = location + delta;

            for (w, &x) in winsorized.iter_mut().zip(results.iter()) {
                *w = winsorize(x, lo, hi);
            }

            let mut sum = T::zero();
            for &w in &winsorized {
                sum = sum + w;
            }
            let new_location = sum / n_t;

            let mut sum_sq = T::zero();
            for &w in &winsorized {
                let d = w - new_location;
                sum_sq = sum_sq + d * d;
            }
            let new_scale = consistency * (sum_sq / T::from(n - 1).unwrap()).sqrt();

            let location_settled =
                (new_location - location).abs() <= self.tolerance * one.max(location.abs());
            let scale_settled = (new_scale - scale).abs() <= self.tolerance * one.max(scale);

            location = new_location;
            scale = new_scale;

            if location_settled && scale_settled {
                return RobustEstimate {
                    location,
                    scale,
                    p_used: n,
                    iterations: k,
                    converged: true,
                };
            }
        }

        RobustEstimate {
            location,
            scale,
            p_used: n,
            iterations: self.max_iterations,
            converged: false,
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check parameters and input shape; data-quality filtering happens
    /// upstream in the validation kernel.
    fn validate(&self, results: &[T]) -> Result<(), PtError> {
        if !self.tolerance.is_finite() || self.tolerance <= T::zero() {
            return Err(PtError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance.to_f64().unwrap_or(f64::NAN),
            });
        }
        if self.max_iterations == 0 {
            return Err(PtError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
            });
        }
        if results.is_empty() {
            return Err(PtError::EmptyDataset);
        }
        for (row, &x) in results.iter().enumerate() {
            if !x.is_finite() {
                return Err(PtError::NonFiniteResult {
                    row,
                    value: x.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }
}
