//! Path settings shared with rules through the application context

use crate::domain::error::MatcherError;

/// Default error page path
pub const DEFAULT_ERROR_PATH: &str = "/error";

/// Default base path of management endpoints
pub const DEFAULT_MANAGEMENT_BASE_PATH: &str = "/actuator";

/// Server path settings (dispatcher prefix and error page)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerPaths {
    servlet_path: String,
    error_path: String,
}

impl ServerPaths {
    pub fn new(servlet_path: &str, error_path: &str) -> Result<Self, MatcherError> {
        let error_path = normalize_path(error_path)?;
        if error_path.is_empty() {
            return Err(MatcherError::invalid_configuration(
                "Error path must not be the root path",
            ));
        }

        Ok(Self {
            servlet_path: normalize_path(servlet_path)?,
            error_path,
        })
    }

    /// Dispatcher prefix; empty when mapped to the root
    pub fn servlet_path(&self) -> &str {
        &self.servlet_path
    }

    pub fn error_path(&self) -> &str {
        &self.error_path
    }

    /// Prefix `path` with the dispatcher path
    pub fn relative(&self, path: &str) -> String {
        format!("{}{}", self.servlet_path, path)
    }
}

impl Default for ServerPaths {
    fn default() -> Self {
        Self {
            servlet_path: String::new(),
            error_path: DEFAULT_ERROR_PATH.to_string(),
        }
    }
}

/// Management endpoint settings: base path and exposed endpoint ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementPaths {
    base_path: String,
    endpoints: Vec<String>,
}

impl ManagementPaths {
    pub fn new<I, S>(base_path: &str, endpoints: I) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids: Vec<String> = Vec::new();
        for endpoint in endpoints {
            let id = endpoint.into().trim().to_string();
            if id.is_empty() || id.contains('/') {
                return Err(MatcherError::invalid_configuration(format!(
                    "Invalid endpoint id '{}'",
                    id
                )));
            }
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(Self {
            base_path: normalize_path(base_path)?,
            endpoints: ids,
        })
    }

    /// Base path; empty when endpoints are mapped to the root
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    pub fn is_exposed(&self, id: &str) -> bool {
        self.endpoints.iter().any(|endpoint| endpoint == id)
    }

    pub fn endpoint_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, id)
    }
}

/// `""` and `"/"` become `""`; trailing slashes are removed
fn normalize_path(path: &str) -> Result<String, MatcherError> {
    let trimmed = path.trim();
    if trimmed.is_empty() || trimmed == "/" {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(MatcherError::invalid_configuration(format!(
            "Path '{}' must start with '/'",
            trimmed
        )));
    }
    if trimmed.contains('*') || trimmed.contains('?') {
        return Err(MatcherError::invalid_configuration(format!(
            "Path '{}' must not contain wildcards",
            trimmed
        )));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
