//! Attaches the application context to incoming requests

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::api::state::AppState;

/// Makes the root context the enclosing context of every request, so
/// `RequestExtensionLocator` can find it
pub async fn context_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(state.context.clone());
    next.run(request).await
}
