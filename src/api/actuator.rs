//! Management endpoints

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use super::state::AppState;
use super::types::ApiError;
use crate::domain::ManagementPaths;
use crate::infrastructure::ApplicationInfo;

#[derive(Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Serialize)]
pub struct LinksResponse {
    #[serde(rename = "_links")]
    pub links: BTreeMap<String, Link>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
}

#[derive(Serialize)]
pub struct BeansResponse {
    pub context: String,
    pub beans: Vec<String>,
}

/// Links to every exposed endpoint
pub async fn links(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let paths = management_paths(&state)?;

    let mut links = BTreeMap::new();
    links.insert(
        "self".to_string(),
        Link {
            href: paths.base_path().to_string(),
        },
    );
    for id in paths.endpoints() {
        links.insert(
            id.clone(),
            Link {
                href: paths.endpoint_path(id),
            },
        );
    }

    Ok(Json(LinksResponse { links }))
}

pub async fn health() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Up,
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

pub async fn info(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let info = state
        .context
        .get_bean::<ApplicationInfo>()
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(ApplicationInfo::clone(&info)))
}

pub async fn beans(State(state): State<AppState>) -> impl IntoResponse {
    Json(BeansResponse {
        context: state.context.id().to_string(),
        beans: state.context.bean_names(),
    })
}

fn management_paths(state: &AppState) -> Result<std::sync::Arc<ManagementPaths>, ApiError> {
    state
        .context
        .get_bean::<ManagementPaths>()
        .map_err(|e| ApiError::internal(e.to_string()))
}
