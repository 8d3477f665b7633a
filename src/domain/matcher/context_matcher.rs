//! Request matcher backed by a lazily resolved application context

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::{ApplicationContextResolver, ContextResolver, ContextRule, RequestMatcher};
use crate::domain::context::{short_type_name, ContextLocator, ContextType, RequestExtensionLocator};
use crate::domain::error::MatcherError;

/// [`RequestMatcher`] that resolves a context of type `C` on first use and
/// keeps it for the lifetime of the matcher
///
/// The context can be the enclosing [`ApplicationContext`], an existing bean
/// or a type that is autowired on demand (see [`ContextType`]). Resolution
/// happens at most once: concurrent first calls block until a single
/// resolution completes and then all observe the same instance. A failed
/// resolution leaves the matcher unresolved so the next call retries.
///
/// [`ApplicationContext`]: crate::domain::context::ApplicationContext
pub struct ApplicationContextRequestMatcher<C: Send + Sync + 'static, R> {
    rule: R,
    resolver: Arc<dyn ContextResolver<C>>,
    context: OnceCell<Arc<C>>,
}

impl<C, R> ApplicationContextRequestMatcher<C, R>
where
    C: Send + Sync + 'static,
    R: ContextRule<C>,
{
    pub fn builder(rule: R) -> MatcherBuilder<C, R> {
        MatcherBuilder::new(rule)
    }

    pub fn new(rule: R, context_type: ContextType<C>, locator: Arc<dyn ContextLocator>) -> Self {
        Self::with_resolver(
            rule,
            Arc::new(ApplicationContextResolver::new(context_type, locator)),
        )
    }

    pub fn with_resolver(rule: R, resolver: Arc<dyn ContextResolver<C>>) -> Self {
        Self {
            rule,
            resolver,
            context: OnceCell::new(),
        }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn is_resolved(&self) -> bool {
        self.context.get().is_some()
    }

    /// The cached context, if it has been resolved
    pub fn resolved_context(&self) -> Option<&Arc<C>> {
        self.context.get()
    }

    fn context(&self, request: &Request<Body>) -> Result<&Arc<C>, MatcherError> {
        if let Some(context) = self.context.get() {
            return Ok(context);
        }

        // Re-checked under the cell's lock; only one caller runs the closure
        self.context.get_or_try_init(|| {
            debug!(
                context_type = short_type_name::<C>(),
                path = %request.uri().path(),
                "Resolving matcher context"
            );

            let context = self.resolver.resolve(request)?;
            self.rule.on_initialized(&context);

            info!(
                context_type = short_type_name::<C>(),
                rule = short_type_name::<R>(),
                "Matcher context initialized"
            );

            Ok(context)
        })
    }
}

impl<C, R> RequestMatcher for ApplicationContextRequestMatcher<C, R>
where
    C: Send + Sync + 'static,
    R: ContextRule<C> + fmt::Debug,
{
    fn matches(&self, request: &Request<Body>) -> Result<bool, MatcherError> {
        let context = self.context(request)?;
        Ok(self.rule.decide(request, context))
    }
}

impl<C: Send + Sync + 'static, R: fmt::Debug> fmt::Debug for ApplicationContextRequestMatcher<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContextRequestMatcher")
            .field("context_type", &short_type_name::<C>())
            .field("rule", &self.rule)
            .field("resolved", &self.context.get().is_some())
            .finish()
    }
}

/// Builder for [`ApplicationContextRequestMatcher`]
///
/// Either a context type or a complete resolver must be supplied. Without a
/// locator, the context is read from request extensions.
pub struct MatcherBuilder<C: Send + Sync + 'static, R> {
    rule: R,
    context_type: Option<ContextType<C>>,
    locator: Option<Arc<dyn ContextLocator>>,
    resolver: Option<Arc<dyn ContextResolver<C>>>,
}

impl<C, R> MatcherBuilder<C, R>
where
    C: Send + Sync + 'static,
    R: ContextRule<C>,
{
    pub fn new(rule: R) -> Self {
        Self {
            rule,
            context_type: None,
            locator: None,
            resolver: None,
        }
    }

    pub fn context_type(mut self, context_type: ContextType<C>) -> Self {
        self.context_type = Some(context_type);
        self
    }

    pub fn locator(mut self, locator: Arc<dyn ContextLocator>) -> Self {
        self.locator = Some(locator);
        self
    }

    /// Use a custom resolver instead of a context type and locator
    pub fn resolver(mut self, resolver: Arc<dyn ContextResolver<C>>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn build(self) -> Result<ApplicationContextRequestMatcher<C, R>, MatcherError> {
        if let Some(resolver) = self.resolver {
            return Ok(ApplicationContextRequestMatcher::with_resolver(
                self.rule, resolver,
            ));
        }

        let context_type = self
            .context_type
            .ok_or_else(|| MatcherError::invalid_configuration("Context type must not be null"))?;
        let locator = self
            .locator
            .unwrap_or_else(|| Arc::new(RequestExtensionLocator));

        Ok(ApplicationContextRequestMatcher::new(
            self.rule,
            context_type,
            locator,
        ))
    }
}
