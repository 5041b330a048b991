//! Round execution: method dispatch and score assembly.
//!
//! ## Purpose
//!
//! This module orchestrates one proficiency-testing round from a validated
//! dataset to a results record. It selects the assigned-value path
//! (consensus, reference material, formulation, or expert consensus),
//! propagates the matching uncertainty, and drives the scoring engine.
//!
//! ## Design notes
//!
//! * **Discriminated dispatch**: the method is a closed enum; each branch
//!   owns its own uncertainty path.
//! * **Consensus**: Algorithm A supplies `x_pt = x*` and the consensus
//!   uncertainty law; the estimator's convergence state is carried into the
//!   record unchanged, and scores are still emitted on non-convergence.
//! * **Supplied-value methods**: the result vector never influences `x_pt`;
//!   it is retained only for scoring.
//! * **Single pass**: one round is one synchronous top-to-bottom call with
//!   no shared state; inputs are borrowed read-only and outputs are freshly
//!   allocated.
//!
//! ## Invariants
//!
//! * Score vectors in the produced record are parallel to the dataset.
//! * `u(x_pt) >= 0` on every path.
//!
//! ## Non-goals
//!
//! * This module does not parse raw tables (see `validator`).
//! * This module does not render reports.

use std::fmt;
use std::str::FromStr;

// External dependencies
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::algorithms::algorithm_a::AlgorithmA;
use crate::engine::output::RoundResult;
use crate::engine::validator::ValidatedData;
use crate::evaluation::scoring::{z_scores, zeta_scores};
use crate::evaluation::uncertainty::{consensus_uncertainty, supplied_uncertainty};
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::PtError;

// ============================================================================
// Method
// ============================================================================

/// Path used to determine the assigned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Method {
    /// Robust consensus of participant results (Algorithm A).
    #[default]
    #[serde(rename = "A")]
    A,

    /// Certified reference material value.
    #[serde(rename = "CRM")]
    Crm,

    /// Known value from formulation.
    #[serde(rename = "Formulation")]
    Formulation,

    /// Expert laboratory consensus value.
    #[serde(rename = "Expert")]
    Expert,
}

impl Method {
    /// Canonical method name, as serialized in results records.
    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Crm => "CRM",
            Self::Formulation => "Formulation",
            Self::Expert => "Expert",
        }
    }

    /// Whether the assigned value is derived from participant results.
    pub fn is_consensus(&self) -> bool {
        matches!(self, Self::A)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = PtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" | "algorithma" => Ok(Self::A),
            "crm" => Ok(Self::Crm),
            "formulation" => Ok(Self::Formulation),
            "expert" => Ok(Self::Expert),
            _ => Err(PtError::Parse {
                context: "method".to_string(),
                message: format!("unknown method '{s}' (expected A, CRM, Formulation, or Expert)"),
            }),
        }
    }
}

// ============================================================================
// Assigned Value
// ============================================================================

/// An assigned value with its uncertainty and, for consensus rounds, the
/// estimator diagnostics. Optional fields are populated only when meaningful
/// for the method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignedValue {
    /// Method that produced the value.
    pub method: Method,

    /// The assigned value `x_pt`.
    pub x_pt: f64,

    /// Standard uncertainty `u(x_pt)`.
    pub u_x_pt: f64,

    /// Robust standard deviation `s*` (consensus only).
    pub s_star: Option<f64>,

    /// Number of participant results used (consensus only).
    pub p_used: Option<usize>,

    /// Estimator iterations performed (consensus only).
    pub iterations: Option<usize>,

    /// Estimator convergence state (consensus only).
    pub converged: Option<bool>,
}

// ============================================================================
// Round Request
// ============================================================================

/// Per-round calculation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundRequest {
    /// Assigned-value path to use.
    pub method: Method,

    /// Estimator parameters for consensus rounds.
    pub algorithm_a: AlgorithmA<f64>,

    /// Supplied assigned value (required for non-consensus methods).
    pub supplied_value: Option<f64>,

    /// Supplied standard uncertainty (required for non-consensus methods).
    pub supplied_uncertainty: Option<f64>,

    /// Standard deviation for proficiency assessment, when set by
    /// fitness-for-purpose.
    pub sigma_pt: Option<f64>,
}

impl Default for RoundRequest {
    fn default() -> Self {
        Self {
            method: Method::A,
            algorithm_a: AlgorithmA::new(),
            supplied_value: None,
            supplied_uncertainty: None,
            sigma_pt: None,
        }
    }
}

impl RoundRequest {
    /// Check request-level parameters; estimator parameters are checked by
    /// the estimator itself.
    fn validate(&self) -> Result<(), PtError> {
        if let Some(sigma) = self.sigma_pt {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(PtError::InvalidParameter {
                    name: "sigma_pt",
                    value: sigma,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for proficiency-testing rounds.
pub struct RoundExecutor;

impl RoundExecutor {
    /// Determine the assigned value and its uncertainty for the requested
    /// method.
    pub fn assign_value(
        request: &RoundRequest,
        dataset: &Dataset,
    ) -> Result<AssignedValue, PtError> {
        match request.method {
            Method::A => {
                let estimate = request.algorithm_a.estimate(&dataset.results)?;
                let u_x_pt = consensus_uncertainty(estimate.scale, estimate.p_used)?;

                debug!(
                    x_pt = estimate.location,
                    s_star = estimate.scale,
                    iterations = estimate.iterations,
                    converged = estimate.converged,
                    "consensus estimate complete"
                );

                Ok(AssignedValue {
                    method: Method::A,
                    x_pt: estimate.location,
                    u_x_pt,
                    s_star: Some(estimate.scale),
                    p_used: Some(estimate.p_used),
                    iterations: Some(estimate.iterations),
                    converged: Some(estimate.converged),
                })
            }
            method => {
                let x_pt = request.supplied_value.ok_or(PtError::MissingMethodInput {
                    method: method.name(),
                })?;
                let raw_u = request
                    .supplied_uncertainty
                    .ok_or(PtError::MissingMethodInput {
                        method: method.name(),
                    })?;
                if !x_pt.is_finite() {
                    return Err(PtError::InvalidParameter {
                        name: "supplied_value",
                        value: x_pt,
                    });
                }
                let u_x_pt = supplied_uncertainty(raw_u)?;

                Ok(AssignedValue {
                    method,
                    x_pt,
                    u_x_pt,
                    s_star: None,
                    p_used: None,
                    iterations: None,
                    converged: None,
                })
            }
        }
    }

    /// Run a full round on a dataset, producing the results record.
    pub fn run(request: &RoundRequest, dataset: &Dataset) -> Result<RoundResult, PtError> {
        request.validate()?;

        let assigned = Self::assign_value(request, dataset)?;

        let z = z_scores(&dataset.results, assigned.x_pt, request.sigma_pt);
        let zeta = zeta_scores(
            &dataset.results,
            dataset.uncertainties.as_deref(),
            assigned.x_pt,
            assigned.u_x_pt,
        );

        Ok(RoundResult {
            method: assigned.method,
            x_pt: assigned.x_pt,
            u_x_pt: assigned.u_x_pt,
            s_star: assigned.s_star,
            p_used: assigned.p_used,
            iterations: assigned.iterations,
            converged: assigned.converged,
            sigma_pt: request.sigma_pt,
            ids: dataset.ids.clone(),
            results: dataset.results.clone(),
            uncertainties: dataset.uncertainties.clone(),
            z_scores: z,
            zeta_scores: zeta,
            dropped_rows: Vec::new(),
        })
    }

    /// Run a full round on validator output, carrying the dropped-rows
    /// report into the record.
    pub fn run_validated(
        request: &RoundRequest,
        data: &ValidatedData,
    ) -> Result<RoundResult, PtError> {
        let mut record = Self::run(request, &data.dataset)?;
        record.dropped_rows = data.dropped_rows.clone();
        Ok(record)
    }
}
