//! Tests for the error taxonomy.
//!
//! These pin the stable kind identifiers and the single-line messages the
//! CLI surfaces to users.
//!
//! ## Test Organization
//!
//! 1. **Kind identifiers** - stable names per variant
//! 2. **Messages** - context carried into Display
//! 3. **Dataset invariants** - constructor-level enforcement

use ptcalc_rs::prelude::*;

// ============================================================================
// Kind Identifiers
// ============================================================================

/// Every variant reports its stable kind name.
#[test]
fn test_kind_identifiers() {
    assert_eq!(
        PtError::MissingColumn("Value".into()).kind(),
        "MissingColumn"
    );
    assert_eq!(
        PtError::NegativeUncertainty { row: 3, value: -0.1 }.kind(),
        "NegativeUncertainty"
    );
    assert_eq!(PtError::EmptyId { row: 0 }.kind(), "EmptyId");
    assert_eq!(PtError::EmptyDataset.kind(), "EmptyDataset");
    assert_eq!(
        PtError::NonFiniteResult {
            row: 1,
            value: f64::INFINITY
        }
        .kind(),
        "NonFiniteResult"
    );
    assert_eq!(
        PtError::MissingMethodInput { method: "CRM" }.kind(),
        "MissingMethodInput"
    );
    assert_eq!(
        PtError::InvalidParameter {
            name: "sigma_pt",
            value: -1.0
        }
        .kind(),
        "InvalidParameter"
    );
    assert_eq!(
        PtError::RendererFailed("boom".into()).kind(),
        "RendererFailed"
    );
}

// ============================================================================
// Messages
// ============================================================================

/// Messages carry the offending column, row, or value.
#[test]
fn test_messages_carry_context() {
    let message = PtError::MissingColumn("Value".into()).to_string();
    assert!(message.contains("Value"));

    let message = PtError::NegativeUncertainty { row: 3, value: -0.1 }.to_string();
    assert!(message.contains("row 3"));
    assert!(message.contains("-0.1"));

    let message = PtError::MissingMethodInput { method: "CRM" }.to_string();
    assert!(message.contains("CRM"));

    let message = PtError::InvalidParameter {
        name: "tolerance",
        value: 0.0,
    }
    .to_string();
    assert!(message.contains("tolerance"));
}

// ============================================================================
// Dataset Invariants
// ============================================================================

/// The dataset constructor enforces the invariants the algorithms assume.
#[test]
fn test_dataset_constructor_invariants() {
    // Mismatched id/result lengths.
    let result = Dataset::new(vec!["L01".into()], vec![1.0, 2.0], None);
    assert!(matches!(result, Err(PtError::MismatchedInputs { .. })));

    // Non-finite result.
    let result = Dataset::new(
        vec!["L01".into(), "L02".into()],
        vec![1.0, f64::NAN],
        None,
    );
    assert!(matches!(result, Err(PtError::NonFiniteResult { row: 1, .. })));

    // Blank id.
    let result = Dataset::new(vec!["L01".into(), "  ".into()], vec![1.0, 2.0], None);
    assert!(matches!(result, Err(PtError::EmptyId { row: 1 })));

    // Negative uncertainty.
    let result = Dataset::new(
        vec!["L01".into(), "L02".into()],
        vec![1.0, 2.0],
        Some(vec![Some(0.1), Some(-0.2)]),
    );
    assert!(matches!(
        result,
        Err(PtError::NegativeUncertainty { row: 1, .. })
    ));

    // Empty round.
    let result = Dataset::new(vec![], vec![], None);
    assert!(matches!(result, Err(PtError::EmptyDataset)));
}

/// Valid datasets expose their shape through query helpers.
#[test]
fn test_dataset_queries() {
    let dataset = Dataset::new(
        vec!["L01".into(), "L02".into()],
        vec![1.0, 2.0],
        Some(vec![None, Some(0.2)]),
    )
    .unwrap();

    assert_eq!(dataset.len(), 2);
    assert!(!dataset.is_empty());
    assert!(dataset.has_uncertainties());

    let bare = Dataset::new(vec!["L01".into()], vec![1.0], Some(vec![None])).unwrap();
    assert!(!bare.has_uncertainties());
}
