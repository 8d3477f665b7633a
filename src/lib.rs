//! context-guard
//!
//! Request matchers for HTTP security rules that lazily resolve their
//! context from an application context:
//! - Matchers resolve their context once and cache it for their lifetime
//! - Contexts come from the enclosing context, a registered bean or are autowired
//! - Endpoint, static resource and error page rules built on top
//! - A security chain and axum middleware enforcing it

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
pub use domain::{
    ApplicationContext, ApplicationContextRequestMatcher, ContextResolver, ContextRule,
    ContextType, MatcherError, RequestMatcher, SecurityChain,
};
