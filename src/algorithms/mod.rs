//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer contains the core statistical algorithm of the crate: the
//! iterative robust location/scale estimator (Algorithm A of ISO
//! 13528:2022) used to derive consensus assigned values.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Iterative winsorized robust estimator.
pub mod algorithm_a;
