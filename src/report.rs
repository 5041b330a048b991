//! Results-record persistence and report rendering.
//!
//! ## Purpose
//!
//! This module is the boundary between the calculation engine and the
//! external document renderer. It writes results records as JSON, reads
//! them back for render-only runs, and invokes the renderer as an opaque
//! subprocess given a template, the record path, a format, and an output
//! path.
//!
//! ## Design notes
//!
//! * **Opaque renderer**: the renderer is a subprocess (Quarto by default);
//!   the engine knows nothing about templates beyond their path. A missing
//!   executable or a non-zero exit surfaces as `RendererFailed` with the
//!   captured stderr.
//! * **JSON interchange**: the record file is the bit-level contract; the
//!   renderer reads the same parallel vectors the engine produced.
//!
//! ## Non-goals
//!
//! * This module does not rasterize plots or lay out documents; the
//!   renderer owns presentation entirely.

use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

// External dependencies
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

// Internal dependencies
use crate::engine::output::RoundResult;
use crate::primitives::errors::PtError;

// ============================================================================
// Output Format
// ============================================================================

/// Document format produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Portable Document Format.
    #[default]
    Pdf,

    /// Standalone HTML.
    Html,

    /// Office Open XML document.
    Docx,
}

impl OutputFormat {
    /// File extension and renderer target name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Html => "html",
            Self::Docx => "docx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = PtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "html" => Ok(Self::Html),
            "docx" => Ok(Self::Docx),
            _ => Err(PtError::Parse {
                context: "output format".to_string(),
                message: format!("unknown format '{s}' (expected pdf, html, or docx)"),
            }),
        }
    }
}

// ============================================================================
// Record Persistence
// ============================================================================

/// Write a results record as pretty-printed JSON.
pub fn write_results_json(record: &RoundResult, path: &Path) -> Result<(), PtError> {
    let json = serde_json::to_string_pretty(record).map_err(|e| PtError::Parse {
        context: "results record".to_string(),
        message: e.to_string(),
    })?;
    std::fs::write(path, json).map_err(|source| PtError::Io {
        context: format!("writing results file '{}'", path.display()),
        source,
    })?;
    debug!(path = %path.display(), "results record written");
    Ok(())
}

/// Read a results record previously written by [`write_results_json`].
pub fn read_results_json(path: &Path) -> Result<RoundResult, PtError> {
    let content = std::fs::read_to_string(path).map_err(|source| PtError::Io {
        context: format!("reading results file '{}'", path.display()),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| PtError::Parse {
        context: format!("results file '{}'", path.display()),
        message: e.to_string(),
    })
}

// ============================================================================
// Renderer Invocation
// ============================================================================

/// Default renderer executable.
pub const DEFAULT_RENDERER: &str = "quarto";

/// Render a report from a template and a saved results record.
///
/// Invokes `<renderer> render <template> --to <format> --output <output>`
/// with the record path passed as an execution parameter. The renderer is
/// treated as fully opaque; any failure is surfaced verbatim.
pub fn render_report(
    renderer: &str,
    template: &Path,
    results_json: &Path,
    format: OutputFormat,
    output: &Path,
) -> Result<(), PtError> {
    info!(
        renderer,
        template = %template.display(),
        format = %format,
        "rendering report"
    );

    let result = Command::new(renderer)
        .arg("render")
        .arg(template)
        .args(["--to", format.as_str()])
        .arg("--output")
        .arg(output)
        .arg("-P")
        .arg(format!("results_json:{}", results_json.display()))
        .output();

    let output_data = match result {
        Ok(output_data) => output_data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(PtError::RendererFailed(format!(
                "renderer executable '{renderer}' not found on PATH"
            )));
        }
        Err(e) => {
            return Err(PtError::RendererFailed(format!(
                "failed to launch renderer '{renderer}': {e}"
            )));
        }
    };

    if !output_data.status.success() {
        let stderr = String::from_utf8_lossy(&output_data.stderr);
        return Err(PtError::RendererFailed(stderr.trim().to_string()));
    }

    info!(output = %output.display(), "report rendered");
    Ok(())
}
