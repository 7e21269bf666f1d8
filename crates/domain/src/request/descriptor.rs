//! Request descriptor: what a test case asks the service for.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{QueryParam, QueryParams};
use crate::error::{DomainError, DomainResult};

/// Path plus ordered query parameters of a GET request.
///
/// The base URL is not part of the descriptor; it is supplied at run time so
/// the same suite can be pointed at any deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Path relative to the base URL (e.g. `/api/deals`).
    pub path: String,
    /// Query parameters, appended URL-encoded in declaration order.
    #[serde(default, skip_serializing_if = "QueryParams::is_empty")]
    pub query: QueryParams,
}

impl RequestDescriptor {
    /// Creates a descriptor for `path` with no query parameters.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryParams::new(),
        }
    }

    /// Adds a query parameter (builder pattern).
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.add(QueryParam::new(key, value));
        self
    }

    /// Builds the absolute URL against `base`.
    ///
    /// Any path prefix on the base is kept, so `http://host/v1` + `/deals`
    /// resolves to `http://host/v1/deals`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidUrl` if the joined URL does not parse.
    pub fn resolve(&self, base: &Url) -> DomainResult<Url> {
        let joined = format!(
            "{}/{}",
            base.as_str().trim_end_matches('/'),
            self.path.trim_start_matches('/')
        );
        let mut url =
            Url::parse(&joined).map_err(|e| DomainError::InvalidUrl(format!("{e}: {joined}")))?;

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in self.query.iter() {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        Ok(url)
    }
}
