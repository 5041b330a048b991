//! Error types for proficiency-testing calculations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while turning a
//! raw participant table into a scored round: structural input defects,
//! invalid parameters, missing method inputs, and collaborator failures
//! (report rendering, file I/O).
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending row index, column name, or
//!   value so the CLI can print a single actionable line.
//! * **Fail-fast**: Structural errors abort the round; recoverable row-level
//!   issues are *not* errors (they are reported as dropped rows alongside a
//!   successful result).
//! * **Non-convergence is not an error**: Algorithm A reports it as a field
//!   of the result, never through this type.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Row indices are zero-based positions in the input frame.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

use thiserror::Error;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for proficiency-testing operations.
#[derive(Debug, Error)]
pub enum PtError {
    /// A required input column is absent from the frame.
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    /// An uncertainty cell coerced to a negative number.
    #[error("negative uncertainty in row {row}: {value}")]
    NegativeUncertainty {
        /// Zero-based row index in the input frame.
        row: usize,
        /// The offending cell value.
        value: f64,
    },

    /// A participant id is blank after trimming.
    #[error("empty participant id in row {row}")]
    EmptyId {
        /// Zero-based row index in the input frame.
        row: usize,
    },

    /// No usable rows remain after filtering.
    #[error("dataset contains no usable rows")]
    EmptyDataset,

    /// A result or uncertainty cell coerced to an infinite value.
    #[error("non-finite value in row {row}: {value}")]
    NonFiniteResult {
        /// Zero-based row index in the input frame.
        row: usize,
        /// The offending cell value.
        value: f64,
    },

    /// A non-consensus method was requested without a supplied value and
    /// uncertainty.
    #[error("method '{method}' requires a supplied value and uncertainty")]
    MissingMethodInput {
        /// Name of the requested method.
        method: &'static str,
    },

    /// A parameter is outside its valid range (tolerance <= 0,
    /// max_iterations = 0, sigma_pt <= 0, supplied uncertainty < 0, ...).
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Parallel input vectors disagree in length.
    #[error("length mismatch: expected {expected} elements, got {got}")]
    MismatchedInputs {
        /// Length of the result vector.
        expected: usize,
        /// Length of the disagreeing vector.
        got: usize,
    },

    /// The external report renderer exited with a failure.
    #[error("report renderer failed: {0}")]
    RendererFailed(String),

    /// A file could not be read or written.
    #[error("I/O error while {context}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration or results file could not be parsed.
    #[error("failed to parse {context}: {message}")]
    Parse {
        /// What was being parsed.
        context: String,
        /// Parser diagnostic.
        message: String,
    },
}

impl PtError {
    /// Stable identifier of the error kind, used by the CLI for terse
    /// reporting and by tests asserting on the taxonomy.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingColumn(_) => "MissingColumn",
            Self::NegativeUncertainty { .. } => "NegativeUncertainty",
            Self::EmptyId { .. } => "EmptyId",
            Self::EmptyDataset => "EmptyDataset",
            Self::NonFiniteResult { .. } => "NonFiniteResult",
            Self::MissingMethodInput { .. } => "MissingMethodInput",
            Self::InvalidParameter { .. } => "InvalidParameter",
            Self::MismatchedInputs { .. } => "MismatchedInputs",
            Self::RendererFailed(_) => "RendererFailed",
            Self::Io { .. } => "Io",
            Self::Parse { .. } => "Parse",
        }
    }
}
