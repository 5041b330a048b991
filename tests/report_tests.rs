//! Tests for results-record persistence and renderer invocation.
//!
//! The renderer itself is external; these tests cover the JSON interchange
//! files and the failure surface when the renderer cannot run.
//!
//! ## Test Organization
//!
//! 1. **Persistence** - write/read round-trips on disk
//! 2. **Renderer failures** - missing executable surfaced as RendererFailed

use std::str::FromStr;

use ptcalc_rs::engine::executor::{RoundExecutor, RoundRequest};
use ptcalc_rs::prelude::*;
use ptcalc_rs::report::{self, OutputFormat};

fn sample_record() -> RoundResult {
    let data = Dataset::new(
        vec!["L01".into(), "L02".into(), "L03".into()],
        vec![9.9, 10.0, 10.1],
        None,
    )
    .unwrap();
    let request = RoundRequest {
        sigma_pt: Some(0.1),
        ..RoundRequest::default()
    };
    RoundExecutor::run(&request, &data).unwrap()
}

// ============================================================================
// Persistence
// ============================================================================

/// A record written to disk reads back identical.
#[test]
fn test_results_file_round_trip() {
    let record = sample_record();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("round.results.json");

    report::write_results_json(&record, &path).unwrap();
    let restored = report::read_results_json(&path).unwrap();
    assert_eq!(record, restored);
}

/// Reading a missing or malformed results file is a typed error.
#[test]
fn test_results_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("absent.json");
    assert!(matches!(
        report::read_results_json(&missing),
        Err(PtError::Io { .. })
    ));

    let malformed = dir.path().join("malformed.json");
    std::fs::write(&malformed, "{ not json").unwrap();
    assert!(matches!(
        report::read_results_json(&malformed),
        Err(PtError::Parse { .. })
    ));
}

// ============================================================================
// Renderer Failures
// ============================================================================

/// A renderer executable that does not exist surfaces as RendererFailed,
/// not as a raw I/O error.
#[test]
fn test_missing_renderer_executable() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template.qmd");
    std::fs::write(&template, "# report").unwrap();
    let results = dir.path().join("round.results.json");
    report::write_results_json(&sample_record(), &results).unwrap();

    let result = report::render_report(
        "ptcalc-renderer-that-does-not-exist",
        &template,
        &results,
        OutputFormat::Html,
        &dir.path().join("report.html"),
    );
    assert!(matches!(result, Err(PtError::RendererFailed(msg)) if msg.contains("not found")));
}

/// Output formats parse case-insensitively and display lowercase.
#[test]
fn test_output_format_parsing() {
    assert_eq!(OutputFormat::from_str("PDF").unwrap(), OutputFormat::Pdf);
    assert_eq!(OutputFormat::from_str("html").unwrap(), OutputFormat::Html);
    assert_eq!(OutputFormat::from_str("Docx").unwrap(), OutputFormat::Docx);
    assert!(OutputFormat::from_str("odt").is_err());
    assert_eq!(OutputFormat::Pdf.to_string(), "pdf");
}
