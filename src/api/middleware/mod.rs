//! HTTP middleware

mod authorization;
mod context;
mod logging;

pub use authorization::{authorization_middleware, Principal};
pub use context::context_middleware;
pub use logging::logging_middleware;
