use std::fmt::Debug;

use axum::body::Body;
use axum::http::Request;

use crate::domain::error::MatcherError;

/// Predicate over incoming requests used by the security chain
pub trait RequestMatcher: Send + Sync + Debug {
    fn matches(&self, request: &Request<Body>) -> Result<bool, MatcherError>;
}

/// Matches every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyRequest;

impl RequestMatcher for AnyRequest {
    fn matches(&self, _request: &Request<Body>) -> Result<bool, MatcherError> {
        Ok(true)
    }
}
