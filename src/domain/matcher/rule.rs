use axum::body::Body;
use axum::http::Request;

/// Decision logic of a context-backed matcher
pub trait ContextRule<C>: Send + Sync {
    /// Decides whether the rule matches the supplied request
    fn decide(&self, request: &Request<Body>, context: &C) -> bool;

    /// Called once, right after the context is first resolved and before
    /// any call to [`decide`](Self::decide)
    fn on_initialized(&self, _context: &C) {}
}
