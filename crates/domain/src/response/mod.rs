//! Response types

mod raw;

pub use raw::{RawResponse, SNIPPET_CHARS, StatusCode};
