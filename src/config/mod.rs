mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_CONFIG_DIR, LogFormat, LoggingConfig, ManagementConfig, SecurityConfig, ServerConfig,
};
