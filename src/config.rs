//! Configuration file contract.
//!
//! ## Purpose
//!
//! This module defines the closed set of options the CLI surfaces to the
//! engine: input column mapping, calculation method and parameters, and
//! reporting defaults. Files are TOML or YAML, chosen by extension.
//!
//! ## Design notes
//!
//! * **Closed option set**: unknown keys are rejected at parse time rather
//!   than silently ignored.
//! * **Defaults everywhere**: an absent file or empty document yields a
//!   fully usable configuration (consensus method, tolerance 1e-5, cap 50).
//! * **No engine coupling**: the engine never reads configuration; this
//!   module translates a parsed file into a [`RoundRequest`].
//!
//! ## Non-goals
//!
//! * This module does not validate statistical parameters (engine
//!   responsibility) beyond what types enforce.

use std::path::{Path, PathBuf};

// External dependencies
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::algorithms::algorithm_a::{AlgorithmA, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::engine::executor::{Method, RoundRequest};
use crate::engine::validator::ColumnMap;
use crate::primitives::errors::PtError;
use crate::report::OutputFormat;

// ============================================================================
// Configuration Model
// ============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MainConfig {
    /// Input column mapping.
    pub input_data: InputDataConfig,

    /// Calculation method and parameters.
    pub calculation: CalculationConfig,

    /// Report rendering defaults.
    pub reporting: ReportingConfig,
}

/// Column mapping for the validation kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct InputDataConfig {
    /// Column holding participant identifiers.
    pub id_col: String,

    /// Column holding measurement results.
    pub result_col: String,

    /// Column holding participant uncertainties; set to null/omit the key
    /// for rounds without reported uncertainties.
    pub uncertainty_col: Option<String>,
}

impl Default for InputDataConfig {
    fn default() -> Self {
        Self {
            id_col: "ParticipantID".to_string(),
            result_col: "Value".to_string(),
            uncertainty_col: Some("Uncertainty".to_string()),
        }
    }
}

/// Calculation method and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CalculationConfig {
    /// Default assigned-value method.
    pub method: Method,

    /// Standard deviation for proficiency assessment; z-scores are omitted
    /// when unset.
    pub sigma_pt: Option<f64>,

    /// Estimator parameters for consensus rounds.
    pub algorithm_a: AlgorithmAConfig,

    /// Certified reference material value and uncertainty.
    pub crm: SuppliedConfig,

    /// Formulation value and uncertainty.
    pub formulation: SuppliedConfig,

    /// Expert consensus value and uncertainty.
    pub expert: SuppliedConfig,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            method: Method::A,
            sigma_pt: None,
            algorithm_a: AlgorithmAConfig::default(),
            crm: SuppliedConfig::default(),
            formulation: SuppliedConfig::default(),
            expert: SuppliedConfig::default(),
        }
    }
}

/// Convergence parameters for the robust estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AlgorithmAConfig {
    /// Relative convergence tolerance.
    pub tolerance: f64,

    /// Iteration cap.
    pub max_iterations: usize,
}

impl Default for AlgorithmAConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// A supplied assigned value with its uncertainty, for non-consensus
/// methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SuppliedConfig {
    /// The supplied assigned value.
    pub value: Option<f64>,

    /// The supplied standard uncertainty.
    pub uncertainty: Option<f64>,
}

/// Report rendering defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ReportingConfig {
    /// Default output format when the CLI does not override it.
    pub default_format: OutputFormat,

    /// Report template handed to the renderer.
    pub template: Option<PathBuf>,
}

// ============================================================================
// Loading and Translation
// ============================================================================

impl MainConfig {
    /// Load a configuration file, or the defaults when no path is given.
    ///
    /// The format is chosen by extension: `.toml`, `.yaml`, or `.yml`.
    pub fn load(path: Option<&Path>) -> Result<Self, PtError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| PtError::Io {
            context: format!("reading config file '{}'", path.display()),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();

        match extension.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| PtError::Parse {
                context: format!("config file '{}'", path.display()),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| PtError::Parse {
                context: format!("config file '{}'", path.display()),
                message: e.to_string(),
            }),
            other => Err(PtError::Parse {
                context: format!("config file '{}'", path.display()),
                message: format!("unsupported config format '{other}' (expected toml, yaml, or yml)"),
            }),
        }
    }

    /// Column mapping for the validation kernel.
    pub fn column_map(&self) -> ColumnMap {
        ColumnMap {
            id_col: self.input_data.id_col.clone(),
            result_col: self.input_data.result_col.clone(),
            uncertainty_col: self.input_data.uncertainty_col.clone(),
        }
    }

    /// Translate the configuration into a per-round request.
    ///
    /// The supplied value/uncertainty pair is taken from the section
    /// matching the configured method; missing inputs surface later as
    /// `MissingMethodInput` when the round runs.
    pub fn to_request(&self) -> RoundRequest {
        let calc = &self.calculation;
        let (supplied_value, supplied_uncertainty) = match calc.method {
            Method::A => (None, None),
            Method::Crm => (calc.crm.value, calc.crm.uncertainty),
            Method::Formulation => (calc.formulation.value, calc.formulation.uncertainty),
            Method::Expert => (calc.expert.value, calc.expert.uncertainty),
        };

        RoundRequest {
            method: calc.method,
            algorithm_a: AlgorithmA::new()
                .tolerance(calc.algorithm_a.tolerance)
                .max_iterations(calc.algorithm_a.max_iterations),
            supplied_value,
            supplied_uncertainty,
            sigma_pt: calc.sigma_pt,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
