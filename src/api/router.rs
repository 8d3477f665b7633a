//! Router assembly

use axum::{
    extract::Extension,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::warn;

use super::actuator;
use super::middleware::{
    authorization_middleware, context_middleware, logging_middleware, Principal,
};
use super::state::AppState;
use super::types::ApiError;
use crate::domain::{ManagementPaths, ServerPaths};

/// Create the application router
///
/// Management routes follow the `ManagementPaths` bean, application routes
/// the `ServerPaths` bean. Every request passes through the security chain.
pub fn create_router(state: AppState) -> Router {
    let server = state
        .context
        .get_bean::<ServerPaths>()
        .map(|paths| ServerPaths::clone(&paths))
        .unwrap_or_else(|e| {
            warn!(error = %e, "Using default server paths");
            ServerPaths::default()
        });

    let mut router = Router::new()
        .route(&server.relative("/api/whoami"), get(whoami))
        .route(server.error_path(), get(error_page));

    match state.context.get_bean::<ManagementPaths>() {
        Ok(management) => router = router.merge(management_router(&management)),
        Err(e) => warn!(error = %e, "Management endpoints disabled"),
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authorization_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            context_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

fn management_router(paths: &ManagementPaths) -> Router<AppState> {
    let mut router = Router::new();

    if !paths.base_path().is_empty() {
        router = router.route(paths.base_path(), get(actuator::links));
    }

    for id in paths.endpoints() {
        let path = paths.endpoint_path(id);
        router = match id.as_str() {
            "health" => router.route(&path, get(actuator::health)),
            "info" => router.route(&path, get(actuator::info)),
            "beans" => router.route(&path, get(actuator::beans)),
            other => {
                warn!(endpoint = other, "No handler for exposed endpoint");
                router
            }
        };
    }

    router
}

async fn whoami(Extension(principal): Extension<Principal>) -> impl IntoResponse {
    Json(principal)
}

async fn error_page() -> impl IntoResponse {
    ApiError::internal("An error occurred").with_code("error_page")
}

async fn not_found() -> impl IntoResponse {
    ApiError::not_found("Resource not found")
}
