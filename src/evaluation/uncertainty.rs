//! Standard uncertainty of the assigned value.
//!
//! ## Purpose
//!
//! This module computes `u(x_pt)` consistently with the path that produced
//! the assigned value: the consensus law for Algorithm A rounds, and a
//! checked passthrough for reference-material, formulation, and expert
//! values whose uncertainties arrive from certificates or assessments.
//!
//! ## Key concepts
//!
//! * **Consensus law**: `u(x_pt) = 1.25 * s* / sqrt(p)`, the ISO 13528
//!   expression for the uncertainty of a robust consensus mean.
//! * **Degenerate spread**: a zero robust scale yields a zero uncertainty,
//!   never an error.
//!
//! ## Invariants
//!
//! * Every returned uncertainty is finite and non-negative.
//!
//! ## Non-goals
//!
//! * This module does not decide which method applies (engine
//!   responsibility).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::PtError;

// ============================================================================
// Constants
// ============================================================================

/// Factor relating the robust scale of a consensus round to the uncertainty
/// of its mean: `u(x_pt) = 1.25 * s* / sqrt(p)`.
pub const UNCERTAINTY_FACTOR: f64 = 1.25;

// ============================================================================
// Uncertainty Laws
// ============================================================================

/// Uncertainty of a consensus assigned value from Algorithm A output.
///
/// Returns zero when the robust scale is zero (no spread).
pub fn consensus_uncertainty<T: Float>(scale: T, p_used: usize) -> Result<T, PtError> {
    if !scale.is_finite() || scale < T::zero() {
        return Err(PtError::InvalidParameter {
            name: "s_star",
            value: scale.to_f64().unwrap_or(f64::NAN),
        });
    }
    if p_used == 0 {
        return Err(PtError::InvalidParameter {
            name: "p_used",
            value: 0.0,
        });
    }
    if scale.is_zero() {
        return Ok(T::zero());
    }

    let factor = T::from(UNCERTAINTY_FACTOR).unwrap();
    Ok(factor * scale / T::from(p_used).unwrap().sqrt())
}

/// Checked passthrough for an externally supplied uncertainty (CRM
/// certificate, formulation budget, or expert assessment).
pub fn supplied_uncertainty<T: Float>(uncertainty: T) -> Result<T, PtError> {
    if !uncertainty.is_finite() || uncertainty < T::zero() {
        return Err(PtError::InvalidParameter {
            name: "supplied_uncertainty",
            value: uncertainty.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(uncertainty)
}
