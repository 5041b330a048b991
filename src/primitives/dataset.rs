//! Validated participant dataset.
//!
//! ## Purpose
//!
//! This module defines [`Dataset`], the ordered collection of participant
//! records consumed by the estimators and the scoring engine. A constructed
//! dataset guarantees the numeric invariants the downstream algorithms
//! assume, so they never re-check finiteness row by row.
//!
//! ## Invariants
//!
//! * Every result is finite (no NaN, no infinities).
//! * Every present uncertainty is finite and non-negative.
//! * Ids are non-empty; duplicates are permitted.
//! * `ids`, `results`, and (when present) `uncertainties` have equal length,
//!   and that length is at least 1.
//! * Caller-supplied ordering is preserved; records are never reordered or
//!   deduplicated.
//!
//! ## Non-goals
//!
//! * This module does not parse raw tables (handled by the validation
//!   kernel in `engine::validator`).
//! * This module does not compute statistics.

use crate::primitives::errors::PtError;

// ============================================================================
// Dataset
// ============================================================================

/// An ordered, validated set of participant measurement results.
///
/// `uncertainties` is `None` when the round carries no uncertainty column at
/// all; individual missing values within a present column are `None` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Participant identifiers, opaque to the calculations.
    pub ids: Vec<String>,

    /// Measurement results, one per participant.
    pub results: Vec<f64>,

    /// Per-participant standard uncertainties, when reported.
    pub uncertainties: Option<Vec<Option<f64>>>,
}

impl Dataset {
    /// Construct a dataset, checking every invariant listed in the module
    /// documentation.
    pub fn new(
        ids: Vec<String>,
        results: Vec<f64>,
        uncertainties: Option<Vec<Option<f64>>>,
    ) -> Result<Self, PtError> {
        if results.is_empty() {
            return Err(PtError::EmptyDataset);
        }
        if ids.len() != results.len() {
            return Err(PtError::MismatchedInputs {
                expected: results.len(),
                got: ids.len(),
            });
        }
        if let Some(ref u) = uncertainties {
            if u.len() != results.len() {
                return Err(PtError::MismatchedInputs {
                    expected: results.len(),
                    got: u.len(),
                });
            }
        }

        for (row, &x) in results.iter().enumerate() {
            if !x.is_finite() {
                return Err(PtError::NonFiniteResult { row, value: x });
            }
        }
        for (row, id) in ids.iter().enumerate() {
            if id.trim().is_empty() {
                return Err(PtError::EmptyId { row });
            }
        }
        if let Some(ref u) = uncertainties {
            for (row, entry) in u.iter().enumerate() {
                if let Some(value) = *entry {
                    if !value.is_finite() {
                        return Err(PtError::NonFiniteResult { row, value });
                    }
                    if value < 0.0 {
                        return Err(PtError::NegativeUncertainty { row, value });
                    }
                }
            }
        }

        Ok(Self {
            ids,
            results,
            uncertainties,
        })
    }

    /// Number of participant records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the dataset holds no records. Always false for a constructed
    /// dataset; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether any participant reported an uncertainty.
    pub fn has_uncertainties(&self) -> bool {
        self.uncertainties
            .as_ref()
            .is_some_and(|u| u.iter().any(Option::is_some))
    }
}
