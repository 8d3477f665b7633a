//! Lookup of the enclosing application context for a request

use std::fmt::Debug;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

use super::ApplicationContext;
use crate::domain::error::MatcherError;

/// Finds the application context that encloses an incoming request
pub trait ContextLocator: Send + Sync + Debug {
    fn locate(&self, request: &Request<Body>) -> Result<Arc<ApplicationContext>, MatcherError>;
}

/// Reads the context attached to the request's extensions
///
/// The HTTP layer attaches the context on the way in, see
/// `api::middleware::context_middleware`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestExtensionLocator;

impl ContextLocator for RequestExtensionLocator {
    fn locate(&self, request: &Request<Body>) -> Result<Arc<ApplicationContext>, MatcherError> {
        request
            .extensions()
            .get::<Arc<ApplicationContext>>()
            .cloned()
            .ok_or_else(|| {
                MatcherError::missing_context(format!(
                    "no application context attached to {} {}",
                    request.method(),
                    request.uri().path()
                ))
            })
    }
}

/// Always returns the same context, regardless of the request
#[derive(Debug, Clone)]
pub struct FixedContextLocator {
    context: Arc<ApplicationContext>,
}

impl FixedContextLocator {
    pub fn new(context: Arc<ApplicationContext>) -> Self {
        Self { context }
    }
}

impl ContextLocator for FixedContextLocator {
    fn locate(&self, _request: &Request<Body>) -> Result<Arc<ApplicationContext>, MatcherError> {
        Ok(self.context.clone())
    }
}
