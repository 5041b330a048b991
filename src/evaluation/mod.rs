//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer turns estimator output into reportable quantities: the
//! standard uncertainty of the assigned value and the per-participant
//! performance scores.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Uncertainty of the assigned value per method.
pub mod uncertainty;

/// z- and zeta-score computation and interpretation.
pub mod scoring;
