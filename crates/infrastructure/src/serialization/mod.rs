//! Deterministic JSON serialization for reports and suite files.
//!
//! Output is stable across runs:
//! - Fields in declaration order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
