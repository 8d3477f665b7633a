//! Application context domain

mod application_context;
mod context_type;
mod locator;

pub use application_context::{ApplicationContext, ApplicationContextBuilder, Autowire};
pub use context_type::ContextType;
pub use locator::{ContextLocator, FixedContextLocator, RequestExtensionLocator};

/// Type name without its module path, e.g. `ManagementPaths`
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
