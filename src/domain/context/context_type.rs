use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::{short_type_name, ApplicationContext, Autowire};
use crate::domain::error::{BeanError, MatcherError};

type Constructor<C> = fn(&ApplicationContext) -> Result<C, BeanError>;

/// Describes the context type `C` a matcher needs and how to obtain it
///
/// Resolution against an enclosing [`ApplicationContext`] tries, in order:
/// the enclosing context itself, a bean of type `C`, then the constructor
/// (if any). Constructed instances are never registered back.
pub struct ContextType<C> {
    type_name: &'static str,
    constructor: Option<Constructor<C>>,
}

impl<C: Send + Sync + 'static> ContextType<C> {
    /// Resolve from the context itself or an existing bean only
    pub fn bean() -> Self {
        Self {
            type_name: short_type_name::<C>(),
            constructor: None,
        }
    }

    /// Resolve from an existing bean, falling back to autowiring a new one
    pub fn autowired() -> Self
    where
        C: Autowire,
    {
        Self::with_constructor(C::autowire)
    }

    pub fn with_constructor(constructor: Constructor<C>) -> Self {
        Self {
            type_name: short_type_name::<C>(),
            constructor: Some(constructor),
        }
    }

    pub fn resolve_from(&self, context: &Arc<ApplicationContext>) -> Result<Arc<C>, MatcherError> {
        let enclosing: Arc<dyn Any + Send + Sync> = context.clone();
        if let Ok(direct) = enclosing.downcast::<C>() {
            debug!(
                context_id = %context.id(),
                context_type = self.type_name,
                "Using enclosing application context"
            );
            return Ok(direct);
        }

        // Ambiguous candidates fall through to construction, same as a missing bean
        let lookup_error = match context.get_bean::<C>() {
            Ok(bean) => {
                debug!(
                    context_id = %context.id(),
                    context_type = self.type_name,
                    "Using registered bean"
                );
                return Ok(bean);
            }
            Err(e) => e,
        };

        match self.constructor {
            Some(constructor) => context.instantiate(constructor),
            None => Err(MatcherError::construction(
                self.type_name,
                format!("{} and the type cannot be instantiated", lookup_error),
            )),
        }
    }
}

impl<C> Clone for ContextType<C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for ContextType<C> {}

impl<C> fmt::Debug for ContextType<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextType")
            .field("type_name", &self.type_name)
            .field("constructible", &self.constructor.is_some())
            .finish()
    }
}
