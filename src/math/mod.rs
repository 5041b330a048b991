//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions used throughout the
//! pipeline:
//! - Median via order statistics
//! - Robust scale estimation (MAD)
//! - Bounded influence functions (winsorization, Huber psi)
//!
//! These are reusable building blocks with no method-specific logic; all are
//! pure functions over finite inputs.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Median via Quickselect.
pub mod median;

/// Robust scale estimation (MAD).
pub mod mad;

/// Winsorization and Huber psi.
pub mod huber;
