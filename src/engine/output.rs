//! Results record for a proficiency-testing round.
//!
//! ## Purpose
//!
//! This module defines [`RoundResult`], the serialization boundary between
//! the calculation core and its consumers: the report renderer reads it as
//! JSON, the CLI prints it through `Display`, and `report-only` runs load a
//! previously saved record.
//!
//! ## Design notes
//!
//! * **Flat contract**: parallel `f64` and string vectors with index
//!   correspondence; absent scores are `null` in JSON, absent metadata
//!   fields are omitted.
//! * **Round-trip**: records serialize and deserialize losslessly so
//!   rendering can be decoupled from calculation.
//!
//! ## Invariants
//!
//! * `ids`, `results`, `z_scores`, `zeta_scores`, and (when present)
//!   `uncertainties` all have the same length.
//! * The record never contains NaN; unavailable values are represented as
//!   absence.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not invoke the renderer (see `report`).

use std::fmt::{Display, Formatter, Result as FmtResult};

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::engine::executor::Method;
use crate::engine::validator::DroppedRow;
use crate::evaluation::scoring::{interpret_z, interpret_zeta};

// ============================================================================
// Results Record
// ============================================================================

/// Complete output of one proficiency-testing round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Method that produced the assigned value.
    pub method: Method,

    /// Assigned value `x_pt`.
    pub x_pt: f64,

    /// Standard uncertainty `u(x_pt)`.
    pub u_x_pt: f64,

    /// Robust standard deviation `s*` (consensus rounds only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub s_star: Option<f64>,

    /// Number of participant results used (consensus rounds only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub p_used: Option<usize>,

    /// Estimator iterations performed (consensus rounds only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub iterations: Option<usize>,

    /// Estimator convergence state (consensus rounds only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub converged: Option<bool>,

    /// Standard deviation for proficiency assessment, when set.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sigma_pt: Option<f64>,

    /// Participant identifiers, in input order.
    pub ids: Vec<String>,

    /// Participant results, in input order.
    pub results: Vec<f64>,

    /// Participant uncertainties, when the round reports them.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub uncertainties: Option<Vec<Option<f64>>>,

    /// z-scores; absent entries had no defined denominator.
    pub z_scores: Vec<Option<f64>>,

    /// zeta-scores; absent entries had no usable uncertainty.
    pub zeta_scores: Vec<Option<f64>>,

    /// Rows removed during validation, for the audit trail.
    #[serde(default)]
    pub dropped_rows: Vec<DroppedRow>,
}

impl RoundResult {
    /// Number of scored participants.
    pub fn n_participants(&self) -> usize {
        self.results.len()
    }

    /// Whether any z-score is present.
    pub fn has_z_scores(&self) -> bool {
        self.z_scores.iter().any(Option::is_some)
    }

    /// Whether any zeta-score is present.
    pub fn has_zeta_scores(&self) -> bool {
        self.zeta_scores.iter().any(Option::is_some)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

fn write_opt(f: &mut Formatter<'_>, value: Option<f64>, width: usize) -> FmtResult {
    match value {
        Some(v) => write!(f, " {:>width$.4}", v, width = width),
        None => write!(f, " {:>width$}", "-", width = width),
    }
}

impl Display for RoundResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Method:       {}", self.method)?;
        writeln!(f, "  Participants: {}", self.n_participants())?;
        writeln!(f, "  x_pt:         {:.6}", self.x_pt)?;
        writeln!(f, "  u(x_pt):      {:.6}", self.u_x_pt)?;
        if let Some(s_star) = self.s_star {
            writeln!(f, "  s*:           {s_star:.6}")?;
        }
        if let Some(sigma) = self.sigma_pt {
            writeln!(f, "  sigma_pt:     {sigma:.6}")?;
        }
        if let (Some(iterations), Some(converged)) = (self.iterations, self.converged) {
            writeln!(
                f,
                "  Iterations:   {} ({})",
                iterations,
                if converged { "converged" } else { "NOT converged" }
            )?;
        }
        if !self.dropped_rows.is_empty() {
            writeln!(f, "  Dropped rows: {}", self.dropped_rows.len())?;
        }
        writeln!(f)?;

        let has_u = self.uncertainties.is_some();

        writeln!(f, "Scores:")?;
        write!(f, "{:>12} {:>12}", "Participant", "Result")?;
        if has_u {
            write!(f, " {:>10}", "u(x_i)")?;
        }
        write!(f, " {:>10} {:>10} {:>16}", "z", "zeta", "Performance")?;
        writeln!(f)?;

        let line_width = 25 + if has_u { 11 } else { 0 } + 39;
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Show first 10 and last 10 rows for large rounds.
        let n = self.results.len();
        let show_all = n <= 20;
        let rows_to_show: Vec<usize> = if show_all {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>12}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>12} {:>12.4}", self.ids[idx], self.results[idx])?;
            if let Some(ref u) = self.uncertainties {
                write_opt(f, u[idx], 10)?;
            }
            write_opt(f, self.z_scores[idx], 10)?;
            write_opt(f, self.zeta_scores[idx], 10)?;

            let performance = match (self.z_scores[idx], self.zeta_scores[idx]) {
                (Some(z), _) => interpret_z(z),
                (None, Some(zeta)) => interpret_zeta(zeta),
                (None, None) => "-",
            };
            writeln!(f, " {performance:>16}")?;
        }

        Ok(())
    }
}
