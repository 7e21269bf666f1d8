//! Assertion engine.
//!
//! Judges one transport result against one case's predicate. Everything in
//! here is pure: no I/O, no shared state, so re-evaluating the same response
//! always gives the same verdict.

mod engine;
mod matcher;

pub use engine::{check, evaluate};
pub use matcher::{CompiledCase, Matcher};
