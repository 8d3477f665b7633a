use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;

#[cfg(test)]
use mockall::automock;

use crate::domain::context::{ContextLocator, ContextType, RequestExtensionLocator};
use crate::domain::error::MatcherError;

/// Strategy used by a matcher to obtain its context on first use
#[cfg_attr(test, automock)]
pub trait ContextResolver<C: Send + Sync + 'static>: Send + Sync {
    fn resolve(&self, request: &Request<Body>) -> Result<Arc<C>, MatcherError>;
}

/// Resolves `C` against the application context enclosing the request
pub struct ApplicationContextResolver<C> {
    context_type: ContextType<C>,
    locator: Arc<dyn ContextLocator>,
}

impl<C: Send + Sync + 'static> ApplicationContextResolver<C> {
    pub fn new(context_type: ContextType<C>, locator: Arc<dyn ContextLocator>) -> Self {
        Self {
            context_type,
            locator,
        }
    }

    /// Resolver reading the context from request extensions
    pub fn from_request_extensions(context_type: ContextType<C>) -> Self {
        Self::new(context_type, Arc::new(RequestExtensionLocator))
    }
}

impl<C: Send + Sync + 'static> ContextResolver<C> for ApplicationContextResolver<C> {
    fn resolve(&self, request: &Request<Body>) -> Result<Arc<C>, MatcherError> {
        let enclosing = self.locator.locate(request)?;
        self.context_type.resolve_from(&enclosing)
    }
}

impl<C> fmt::Debug for ApplicationContextResolver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContextResolver")
            .field("context_type", &self.context_type)
            .field("locator", &self.locator)
            .finish()
    }
}
