//! # ptcalc — Proficiency-Testing Analysis for Rust
//!
//! A statistical engine for interlaboratory proficiency-testing (PT) rounds
//! following ISO 13528:2022: robust assigned values, their standard
//! uncertainties, and per-participant performance scores.
//!
//! ## What does it compute?
//!
//! Given the measurement results of a PT round (and optionally each
//! participant's standard uncertainty), the engine determines:
//!
//! - the **assigned value** `x_pt`, by robust consensus (Algorithm A,
//!   ISO 13528 Annex C) or from a supplied reference (CRM certificate,
//!   formulation, expert consensus);
//! - the **standard uncertainty** `u(x_pt)` consistent with the path that
//!   produced the value (`1.25 * s* / sqrt(p)` for consensus rounds);
//! - **z-scores** `(x_i - x_pt) / sigma_pt` and **zeta-scores**
//!   `(x_i - x_pt) / sqrt(u_i^2 + u(x_pt)^2)` for every participant.
//!
//! Algorithm A tolerates outliers without discarding data: observations are
//! winsorized at `x* ± 1.5 s*` each iteration, so every laboratory stays in
//! the round while gross errors lose their influence. Non-convergence within
//! the iteration cap is reported in the result, never raised as an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use ptcalc_rs::prelude::*;
//!
//! let dataset = Dataset::new(
//!     vec!["L01".into(), "L02".into(), "L03".into(), "L04".into(), "L05".into()],
//!     vec![9.8, 9.9, 10.0, 10.1, 10.2],
//!     None,
//! )?;
//!
//! let record = PtRound::new()
//!     .sigma_pt(0.1)          // fitness-for-purpose sigma for z-scores
//!     .tolerance(1e-5)        // Algorithm A convergence tolerance
//!     .max_iterations(50)     // Algorithm A iteration cap
//!     .analyze(&dataset)?;
//!
//! println!("{record}");
//! assert!((record.x_pt - 10.0).abs() < 1e-9);
//! # Ok::<(), PtError>(())
//! ```
//!
//! ### Supplied-value rounds
//!
//! When a certified reference material (or a formulation / expert value) is
//! available, the participant results are used only for scoring:
//!
//! ```rust
//! use ptcalc_rs::prelude::*;
//!
//! # let dataset = Dataset::new(
//! #     vec!["L01".into(), "L02".into(), "L03".into()],
//! #     vec![12.30, 12.41, 12.28],
//! #     None,
//! # )?;
//! let record = PtRound::new()
//!     .method(Method::Crm)
//!     .supplied_value(12.34)
//!     .supplied_uncertainty(0.05)
//!     .sigma_pt(0.1)
//!     .analyze(&dataset)?;
//!
//! assert_eq!(record.x_pt, 12.34);
//! assert_eq!(record.s_star, None);
//! # Ok::<(), PtError>(())
//! ```
//!
//! ### From a raw table
//!
//! Raw CSV-style frames are validated through a deterministic pipeline
//! (column mapping, float coercion, NaN-row dropping with an audit trail):
//!
//! ```rust
//! use ptcalc_rs::prelude::*;
//!
//! let mut frame = Frame::new(vec!["ParticipantID", "Value", "Uncertainty"]);
//! frame.push_row(vec!["L01", "10.1", "0.2"]);
//! frame.push_row(vec!["L02", "not a number", ""]);
//! frame.push_row(vec!["L03", "9.9", ""]);
//!
//! let record = PtRound::new().sigma_pt(0.1).analyze_frame(&frame, &ColumnMap::default())?;
//! assert_eq!(record.n_participants(), 2);
//! assert_eq!(record.dropped_rows.len(), 1);
//! # Ok::<(), PtError>(())
//! ```
//!
//! ## Result and error handling
//!
//! Every entry point returns `Result<_, PtError>`. Structural input defects
//! (missing columns, negative uncertainties, blank ids, empty datasets) fail
//! fast with a typed error; recoverable row-level issues are accumulated
//! into `dropped_rows` next to a successful result. Scores whose defining
//! denominator is unavailable are absent (`None`), never zero.
//!
//! ## The `ptcalc` binary
//!
//! The companion CLI wires the engine to files: `ptcalc validate` checks an
//! input table, `ptcalc calculate` runs the full pipeline and renders a
//! report through an external renderer, and `ptcalc report-only` re-renders
//! a previously saved results record. See the `config` module for the
//! TOML/YAML configuration surface.
//!
//! ## References
//!
//! - ISO 13528:2022, "Statistical methods for use in proficiency testing by
//!   interlaboratory comparison" (Annex C for Algorithm A).

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - error taxonomy and the validated dataset.
pub mod primitives;

// Layer 2: Math - median, MAD, and bounded influence functions.
pub mod math;

// Layer 3: Algorithms - the iterative robust estimator.
pub mod algorithms;

// Layer 4: Evaluation - uncertainty propagation and scoring.
pub mod evaluation;

// Layer 5: Engine - validation kernel, method dispatch, results record.
pub mod engine;

// High-level fluent API.
pub mod api;

// Collaborator surfaces consumed by the CLI binary.

/// Configuration file contract (TOML/YAML).
pub mod config;

/// Results-record persistence and report renderer invocation.
pub mod report;

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types, intended for wildcard import:
///
/// ```
/// use ptcalc_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{AlgorithmA, Method, PtRound, RobustEstimate, RoundResult};
    pub use crate::engine::executor::{AssignedValue, RoundExecutor, RoundRequest};
    pub use crate::engine::validator::{ColumnMap, DroppedRow, Frame, ValidatedData, Validator};
    pub use crate::primitives::dataset::Dataset;
    pub use crate::primitives::errors::PtError;
}
