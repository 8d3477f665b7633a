use std::path::Path;

use serde::Deserialize;

use crate::domain::rules::{DEFAULT_ERROR_PATH, DEFAULT_MANAGEMENT_BASE_PATH};
use crate::domain::StaticLocation;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub management: ManagementConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix under which the application is dispatched
    pub servlet_path: String,
    pub error_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManagementConfig {
    pub base_path: String,
    /// Exposed endpoint ids
    pub exposure: Vec<String>,
    /// Endpoints reachable without authentication
    pub public_endpoints: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Bearer tokens accepted for authenticated rules
    pub api_tokens: Vec<String>,
    pub static_locations: Vec<StaticLocation>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            servlet_path: String::new(),
            error_path: DEFAULT_ERROR_PATH.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for ManagementConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_MANAGEMENT_BASE_PATH.to_string(),
            exposure: vec!["health".to_string(), "info".to_string(), "beans".to_string()],
            public_endpoints: vec!["health".to_string(), "info".to_string()],
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            api_tokens: Vec::new(),
            static_locations: StaticLocation::ALL.to_vec(),
        }
    }
}

/// Directory holding `default` and `local` configuration files
pub const DEFAULT_CONFIG_DIR: &str = "config";

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_DIR))
    }

    /// Load from `{dir}/default`, `{dir}/local` and `APP__*` variables
    ///
    /// Missing files are skipped; a present but invalid source is an error.
    pub fn load_from(dir: &Path) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(file_source(dir, "default"))
            .add_source(file_source(dir, "local"))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("management.exposure")
                    .with_list_parse_key("management.public_endpoints")
                    .with_list_parse_key("security.api_tokens")
                    .with_list_parse_key("security.static_locations")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

fn file_source(dir: &Path, name: &str) -> config::File<config::FileSourceFile, config::FileFormat> {
    config::File::with_name(&dir.join(name).to_string_lossy()).required(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn config_dir(default_toml: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("context-guard-config-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("default.toml"), default_toml).unwrap();
        dir
    }

    #[test]
    fn test_load_from_missing_directory_uses_defaults() {
        let dir = std::env::temp_dir().join(format!("context-guard-missing-{}", uuid::Uuid::new_v4()));

        let config = AppConfig::load_from(&dir).unwrap();

        assert_eq!(config.management.public_endpoints, vec!["health", "info"]);
    }

    #[test]
    fn test_load_from_keeps_empty_public_endpoints() {
        let dir = config_dir(
            r#"
            [management]
            public_endpoints = []
            "#,
        );

        let config = AppConfig::load_from(&dir).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert!(config.management.public_endpoints.is_empty());
    }

    #[test]
    fn test_load_from_rejects_invalid_value() {
        let dir = config_dir(
            r#"
            [server]
            port = "not-a-port"

            [management]
            public_endpoints = []
            "#,
        );

        let result = AppConfig::load_from(&dir);
        fs::remove_dir_all(&dir).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.error_path, "/error");
        assert_eq!(config.management.base_path, "/actuator");
        assert!(config.management.exposure.contains(&"health".to_string()));
        assert_eq!(config.security.static_locations.len(), 5);
        assert!(config.security.api_tokens.is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let source = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 9090
                servlet_path = "/app"

                [security]
                api_tokens = ["secret-token"]
                static_locations = ["css", "favicon"]
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: AppConfig = source.try_deserialize().unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.servlet_path, "/app");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.security.api_tokens, vec!["secret-token"]);
        assert_eq!(
            config.security.static_locations,
            vec![StaticLocation::Css, StaticLocation::Favicon]
        );
        assert_eq!(config.management.base_path, "/actuator");
    }
}
