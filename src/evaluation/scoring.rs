//! Participant performance scores (z and zeta).
//!
//! ## Purpose
//!
//! This module turns an assigned value and its uncertainty into
//! per-participant performance scores. Scores whose defining denominator is
//! unavailable are represented as absent, never as zero or as an error: the
//! scoring engine does not fail on a per-row basis.
//!
//! ## Key concepts
//!
//! * **z-score**: `(x_i - x_pt) / sigma_pt`, against the standard deviation
//!   for proficiency assessment. Absent when `sigma_pt` is unset or zero.
//! * **zeta-score**: `(x_i - x_pt) / sqrt(u_i^2 + u(x_pt)^2)`. Absent when
//!   the participant reported no uncertainty or the combined denominator is
//!   zero. A participant with `u_i = 0` still scores when `u(x_pt) > 0`.
//! * **Interpretation bands**: the conventional satisfactory / questionable
//!   / unsatisfactory classification, used for display only.
//!
//! ## Invariants
//!
//! * Output vectors are parallel to the input result vector.
//! * Absence is the only failure mode; no NaN is ever emitted.
//!
//! ## Non-goals
//!
//! * This module does not derive `x_pt` or `u(x_pt)`.
//! * This module does not validate result finiteness (dataset invariant).

// External dependencies
use num_traits::Float;

// ============================================================================
// Score Computation
// ============================================================================

/// Compute z-scores against `sigma_pt`.
///
/// All scores are absent when `sigma_pt` is `None` or not strictly positive.
pub fn z_scores<T: Float>(results: &[T], x_pt: T, sigma_pt: Option<T>) -> Vec<Option<T>> {
    match sigma_pt {
        Some(sigma) if sigma > T::zero() => results
            .iter()
            .map(|&x| Some((x - x_pt) / sigma))
            .collect(),
        _ => vec![None; results.len()],
    }
}

/// Compute zeta-scores from participant uncertainties and `u(x_pt)`.
///
/// `uncertainties` is `None` when the round carries no uncertainty column;
/// every zeta is then absent.
pub fn zeta_scores<T: Float>(
    results: &[T],
    uncertainties: Option<&[Option<T>]>,
    x_pt: T,
    u_x_pt: T,
) -> Vec<Option<T>> {
    let Some(uncertainties) = uncertainties else {
        return vec![None; results.len()];
    };

    results
        .iter()
        .zip(uncertainties.iter())
        .map(|(&x, &u)| {
            let u = u?;
            let combined_sq = u * u + u_x_pt * u_x_pt;
            if combined_sq.is_zero() {
                None
            } else {
                Some((x - x_pt) / combined_sq.sqrt())
            }
        })
        .collect()
}

// ============================================================================
// Interpretation
// ============================================================================

/// Classify a z-score: |z| <= 2 satisfactory, <= 3 questionable, else
/// unsatisfactory.
pub fn interpret_z<T: Float>(z: T) -> &'static str {
    let abs = z.abs();
    if abs <= T::from(2.0).unwrap() {
        "Satisfactory"
    } else if abs <= T::from(3.0).unwrap() {
        "Questionable"
    } else {
        "Unsatisfactory"
    }
}

/// Classify a zeta-score: |zeta| <= 2 satisfactory, else unsatisfactory.
pub fn interpret_zeta<T: Float>(zeta: T) -> &'static str {
    if zeta.abs() <= T::from(2.0).unwrap() {
        "Satisfactory"
    } else {
        "Unsatisfactory"
    }
}
