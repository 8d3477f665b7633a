//! Domain layer - context resolution, matchers and security rules

pub mod context;
pub mod error;
pub mod matcher;
pub mod rules;
pub mod security;

pub use context::{
    ApplicationContext, ApplicationContextBuilder, Autowire, ContextLocator, ContextType,
    FixedContextLocator, RequestExtensionLocator,
};
pub use error::{BeanError, MatcherError};
pub use matcher::{
    AnyRequest, ApplicationContextRequestMatcher, ApplicationContextResolver, ContextResolver,
    ContextRule, MatcherBuilder, RequestMatcher,
};
pub use rules::{
    EndpointRule, ErrorPageRule, ManagementPaths, PathPattern, ServerPaths, StaticLocation,
    StaticResourcePaths, StaticResourceRule,
};
pub use security::{Access, Decision, SecurityChain, SecurityChainBuilder, SecurityRule};
