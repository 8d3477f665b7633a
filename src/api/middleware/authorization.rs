//! Security chain enforcement

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::Access;

/// Identity of an authenticated caller, attached to request extensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub name: String,
}

impl Principal {
    fn from_token(token: &str) -> Self {
        Self {
            name: format!("token:{}", token.chars().take(4).collect::<String>()),
        }
    }
}

/// Evaluates the security chain and enforces the resulting access
///
/// Matcher failures are reported as server errors.
pub async fn authorization_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let decision = state.chain.evaluate(&request).map_err(|e| {
        error!(
            error = %e,
            path = %request.uri().path(),
            "Security chain evaluation failed"
        );
        ApiError::from(e)
    })?;

    match decision.access {
        Access::PermitAll => {}
        Access::DenyAll => {
            warn!(
                rule = ?decision.rule,
                path = %request.uri().path(),
                "Request denied"
            );
            return Err(ApiError::forbidden("Access denied"));
        }
        Access::Authenticated => {
            let token = extract_token_from_headers(request.headers())?;

            if !state.is_valid_token(&token) {
                return Err(ApiError::unauthorized("Invalid token"));
            }

            let principal = Principal::from_token(&token);
            debug!(principal = %principal.name, "Request authenticated");
            request.extensions_mut().insert(principal);
        }
    }

    Ok(next.run(request).await)
}

fn extract_token_from_headers(headers: &HeaderMap) -> Result<String, ApiError> {
    // Try Authorization header first (Bearer token)
    if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
        let auth_str = auth_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

        if let Some(token) = auth_str.strip_prefix("Bearer ") {
            return Ok(token.trim().to_string());
        }
    }

    if let Some(api_key_header) = headers.get("x-api-key") {
        let key = api_key_header
            .to_str()
            .map_err(|_| ApiError::bad_request("Invalid X-API-Key header encoding"))?;

        return Ok(key.trim().to_string());
    }

    Err(ApiError::unauthorized(
        "Authentication required. Provide a token via 'Authorization: Bearer <token>' or 'X-API-Key: <token>' header",
    ))
}
