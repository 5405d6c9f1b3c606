//! Checked integer arithmetic.
//!
//! # Responsibility
//! - Provide fixed-width arithmetic that fails explicitly instead of wrapping.
//!
//! # Invariants
//! - Results are either exact or an error; no saturation, no wrapping.

pub mod safe_add;
