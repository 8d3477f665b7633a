//! Concrete context-backed rules

mod endpoint;
mod error_page;
mod path_pattern;
mod paths;
mod static_resource;

pub use endpoint::EndpointRule;
pub use error_page::ErrorPageRule;
pub use path_pattern::PathPattern;
pub use paths::{ManagementPaths, ServerPaths, DEFAULT_ERROR_PATH, DEFAULT_MANAGEMENT_BASE_PATH};
pub use static_resource::{StaticLocation, StaticResourcePaths, StaticResourceRule};
