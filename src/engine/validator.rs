//! Input validation kernel: raw tables to validated datasets.
//!
//! ## Purpose
//!
//! This module converts a raw tabular frame (caller-named columns of
//! untyped cells) into the numeric vectors the estimators require, applying
//! a deterministic filtering pipeline: column presence, float coercion,
//! row policy, id normalization, and a minimum-size check.
//!
//! ## Design notes
//!
//! * **Fail-fast on structure**: a missing column, negative uncertainty, or
//!   blank id aborts validation with the first error found.
//! * **Accumulate on data quality**: a row whose result cell does not parse
//!   is dropped and recorded, and validation continues; a missing
//!   uncertainty cell keeps the row with the uncertainty marked absent.
//! * **Order-preserving**: rows are never reordered; the output carries the
//!   original row index of every retained record so scores can be realigned
//!   with the source table.
//!
//! ## Key concepts
//!
//! * **Coercion**: cells are parsed as 64-bit floats; unparsable or empty
//!   cells become NaN. NaN results drop the row; infinite values are a
//!   structural error (a present-but-broken number, unlike a blank).
//!
//! ## Invariants
//!
//! * The returned dataset satisfies every invariant of
//!   [`Dataset`](crate::primitives::dataset::Dataset).
//! * `row_indices` is strictly increasing and parallel to the dataset.
//!
//! ## Non-goals
//!
//! * This module does not deduplicate participants.
//! * This module does not compute any statistics.

use std::io::Read;
use std::path::Path;

// External dependencies
use serde::{Deserialize, Serialize};
use tracing::debug;

// Internal dependencies
use crate::primitives::dataset::Dataset;
use crate::primitives::errors::PtError;

// ============================================================================
// Raw Frame
// ============================================================================

/// A raw tabular frame: named columns over rows of untyped cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    /// Create an empty frame with the given column names.
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row of cells. Short rows are read as empty cells beyond
    /// their length.
    pub fn push_row<S: Into<String>>(&mut self, row: Vec<S>) {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    /// Column names in declaration order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows.
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Read a frame from a CSV file with a header row.
    pub fn from_csv_path(path: &Path) -> Result<Self, PtError> {
        let file = std::fs::File::open(path).map_err(|source| PtError::Io {
            context: format!("opening input file '{}'", path.display()),
            source,
        })?;
        Self::from_csv_reader(file)
    }

    /// Read a frame from any CSV source with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, PtError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| PtError::Parse {
                context: "CSV header".to_string(),
                message: e.to_string(),
            })?
            .iter()
            .map(str::to_string)
            .collect();

        let mut frame = Frame {
            columns: headers,
            rows: Vec::new(),
        };
        for record in csv_reader.records() {
            let record = record.map_err(|e| PtError::Parse {
                context: "CSV record".to_string(),
                message: e.to_string(),
            })?;
            frame.rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(frame)
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }
}

// ============================================================================
// Column Mapping
// ============================================================================

/// Mapping from frame column names to their roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMap {
    /// Column holding participant identifiers.
    pub id_col: String,

    /// Column holding measurement results.
    pub result_col: String,

    /// Column holding participant uncertainties, when the round reports
    /// them.
    pub uncertainty_col: Option<String>,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            id_col: "ParticipantID".to_string(),
            result_col: "Value".to_string(),
            uncertainty_col: Some("Uncertainty".to_string()),
        }
    }
}

// ============================================================================
// Validation Output
// ============================================================================

/// A row removed during validation, with the reason it was removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRow {
    /// Zero-based row index in the input frame.
    pub index: usize,

    /// Human-readable reason for the removal.
    pub reason: String,
}

/// Output of the validation kernel: the validated dataset plus the audit
/// trail needed to realign scores with the original table.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedData {
    /// The validated participant dataset.
    pub dataset: Dataset,

    /// Rows removed by the NaN-result policy.
    pub dropped_rows: Vec<DroppedRow>,

    /// Original frame row index of each retained record.
    pub row_indices: Vec<usize>,
}

// ============================================================================
// Validator
// ============================================================================

/// Validation utility converting frames into datasets.
///
/// All methods fail fast on the first structural violation; individually
/// recoverable data-quality issues accumulate into the dropped-rows report.
pub struct Validator;

impl Validator {
    /// Run the full validation pipeline on a frame.
    pub fn validate_frame(frame: &Frame, map: &ColumnMap) -> Result<ValidatedData, PtError> {
        // Step 1: Column presence, by exact name.
        let id_idx = frame
            .column_index(&map.id_col)
            .ok_or_else(|| PtError::MissingColumn(map.id_col.clone()))?;
        let result_idx = frame
            .column_index(&map.result_col)
            .ok_or_else(|| PtError::MissingColumn(map.result_col.clone()))?;
        let uncertainty_idx = match map.uncertainty_col {
            Some(ref name) => Some(
                frame
                    .column_index(name)
                    .ok_or_else(|| PtError::MissingColumn(name.clone()))?,
            ),
            None => None,
        };

        let mut ids = Vec::with_capacity(frame.n_rows());
        let mut results = Vec::with_capacity(frame.n_rows());
        let mut uncertainties = uncertainty_idx.map(|_| Vec::with_capacity(frame.n_rows()));
        let mut dropped_rows = Vec::new();
        let mut row_indices = Vec::with_capacity(frame.n_rows());

        for row in 0..frame.n_rows() {
            // Step 2: Coerce the result cell to f64; unparsable becomes NaN.
            let result_cell = frame.cell(row, result_idx).trim();
            let result = coerce_float(result_cell);

            // Step 3: Row policy.
            if result.is_nan() {
                dropped_rows.push(DroppedRow {
                    index: row,
                    reason: format!("non-numeric result '{result_cell}'"),
                });
                continue;
            }
            if result.is_infinite() {
                return Err(PtError::NonFiniteResult { row, value: result });
            }

            let uncertainty = match uncertainty_idx {
                Some(col) => {
                    let u = coerce_float(frame.cell(row, col).trim());
                    if u.is_nan() {
                        None
                    } else if u.is_infinite() {
                        return Err(PtError::NonFiniteResult { row, value: u });
                    } else if u < 0.0 {
                        return Err(PtError::NegativeUncertainty { row, value: u });
                    } else {
                        Some(u)
                    }
                }
                None => None,
            };

            // Step 4: Id normalization.
            let id = frame.cell(row, id_idx).trim();
            if id.is_empty() {
                return Err(PtError::EmptyId { row });
            }

            ids.push(id.to_string());
            results.push(result);
            if let Some(ref mut u) = uncertainties {
                u.push(uncertainty);
            }
            row_indices.push(row);
        }

        // Step 5: Minimum size after dropping.
        if results.is_empty() {
            return Err(PtError::EmptyDataset);
        }

        debug!(
            retained = results.len(),
            dropped = dropped_rows.len(),
            "frame validation complete"
        );

        let dataset = Dataset::new(ids, results, uncertainties)?;
        Ok(ValidatedData {
            dataset,
            dropped_rows,
            row_indices,
        })
    }
}

/// Parse a cell as a 64-bit float, mapping empty or unparsable cells to NaN.
fn coerce_float(cell: &str) -> f64 {
    if cell.is_empty() {
        return f64::NAN;
    }
    cell.parse::<f64>().unwrap_or(f64::NAN)
}
