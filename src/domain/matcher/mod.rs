//! Request matching domain

mod context_matcher;
mod request_matcher;
mod resolver;
mod rule;

pub use context_matcher::{ApplicationContextRequestMatcher, MatcherBuilder};
pub use request_matcher::{AnyRequest, RequestMatcher};
pub use resolver::{ApplicationContextResolver, ContextResolver};
pub use rule::ContextRule;

#[cfg(test)]
pub use resolver::MockContextResolver;
