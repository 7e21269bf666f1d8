//! Request types

mod descriptor;
mod query;

pub use descriptor::RequestDescriptor;
pub use query::{QueryParam, QueryParams};
