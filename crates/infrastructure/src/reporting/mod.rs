//! Reporter implementations.
//!
//! The runner never prints; the binary hands the finished `RunSummary` to
//! one of these. Both write through a locked sink and never panic on I/O
//! failure.

mod console;
mod json;
mod sink;

pub use console::ConsoleReporter;
pub use json::JsonReporter;
pub use sink::ReportSink;
