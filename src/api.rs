//! High-level API for proficiency-testing analysis.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder for configuring a round and running it against a dataset or a
//! raw frame.
//!
//! ## Design notes
//!
//! * **Ergonomic**: sensible defaults for every parameter; only deviations
//!   need to be spelled out.
//! * **Validated**: parameters are checked when the round runs, with typed
//!   errors for each violation.
//!
//! ### Configuration flow
//!
//! 1. Create a [`PtRound`] via `PtRound::new()`.
//! 2. Chain configuration methods (`.method()`, `.sigma_pt()`, ...).
//! 3. Run with `.analyze(&dataset)` or `.analyze_frame(&frame, &map)`.

// Internal dependencies
use crate::engine::executor::{RoundExecutor, RoundRequest};
use crate::engine::validator::{ColumnMap, Frame, Validator};
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::PtError;

// Publicly re-exported types
pub use crate::algorithms::algorithm_a::{AlgorithmA, RobustEstimate};
pub use crate::engine::executor::Method;
pub use crate::engine::output::RoundResult;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for one proficiency-testing round.
///
/// ```
/// use ptcalc_rs::prelude::*;
///
/// let dataset = Dataset::new(
///     vec!["L01".into(), "L02".into(), "L03".into(), "L04".into(), "L05".into()],
///     vec![9.8, 9.9, 10.0, 10.1, 10.2],
///     None,
/// )?;
///
/// let record = PtRound::new().sigma_pt(0.1).analyze(&dataset)?;
/// assert_eq!(record.p_used, Some(5));
/// assert!(record.converged.unwrap());
/// # Ok::<(), PtError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PtRound {
    request: RoundRequest,
}

impl PtRound {
    /// Create a builder with defaults: consensus method (Algorithm A),
    /// tolerance 1e-5, at most 50 iterations, no `sigma_pt`.
    pub fn new() -> Self {
        Self {
            request: RoundRequest::default(),
        }
    }

    /// Set the assigned-value method.
    pub fn method(mut self, method: Method) -> Self {
        self.request.method = method;
        self
    }

    /// Set the estimator convergence tolerance (consensus rounds).
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.request.algorithm_a = self.request.algorithm_a.tolerance(tolerance);
        self
    }

    /// Set the estimator iteration cap (consensus rounds).
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.request.algorithm_a = self.request.algorithm_a.max_iterations(max_iterations);
        self
    }

    /// Set the standard deviation for proficiency assessment used by
    /// z-scores.
    pub fn sigma_pt(mut self, sigma_pt: f64) -> Self {
        self.request.sigma_pt = Some(sigma_pt);
        self
    }

    /// Set the supplied assigned value (CRM, formulation, and expert
    /// rounds).
    pub fn supplied_value(mut self, value: f64) -> Self {
        self.request.supplied_value = Some(value);
        self
    }

    /// Set the supplied standard uncertainty (CRM, formulation, and expert
    /// rounds).
    pub fn supplied_uncertainty(mut self, uncertainty: f64) -> Self {
        self.request.supplied_uncertainty = Some(uncertainty);
        self
    }

    /// The underlying request, for callers composing with the engine
    /// directly.
    pub fn request(&self) -> RoundRequest {
        self.request
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Run the round on an already validated dataset.
    pub fn analyze(&self, dataset: &Dataset) -> Result<RoundResult, PtError> {
        RoundExecutor::run(&self.request, dataset)
    }

    /// Validate a raw frame with the given column mapping, then run the
    /// round; dropped rows are carried into the record.
    pub fn analyze_frame(&self, frame: &Frame, map: &ColumnMap) -> Result<RoundResult, PtError> {
        let validated = Validator::validate_frame(frame, map)?;
        RoundExecutor::run_validated(&self.request, &validated)
    }
}
