//! Wiring of the application context and security chain from configuration

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::domain::{
    Access, AnyRequest, ApplicationContext, ContextLocator, EndpointRule, ErrorPageRule,
    ManagementPaths, MatcherError, SecurityChain, ServerPaths, StaticResourceRule,
};

/// Identifier of the root application context
pub const ROOT_CONTEXT_ID: &str = "application";

/// Application metadata exposed by the info endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationInfo {
    pub name: String,
    pub version: String,
}

impl Default for ApplicationInfo {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Build the root application context with the beans rules depend on
pub fn build_application_context(
    config: &AppConfig,
) -> Result<Arc<ApplicationContext>, MatcherError> {
    let server_paths = ServerPaths::new(&config.server.servlet_path, &config.server.error_path)?;
    let management_paths = ManagementPaths::new(
        &config.management.base_path,
        config.management.exposure.iter().cloned(),
    )?;

    let context = ApplicationContext::builder(ROOT_CONTEXT_ID)
        .bean(server_paths)
        .bean(management_paths)
        .bean(ApplicationInfo::default())
        .build();

    info!(
        context_id = %context.id(),
        beans = context.bean_count(),
        "Application context ready"
    );

    Ok(context)
}

/// Build the security chain
///
/// Rules, in order: public endpoints, other endpoints (authenticated),
/// static resources, the error page, then everything else (authenticated).
pub fn build_security_chain(config: &AppConfig, locator: Arc<dyn ContextLocator>) -> SecurityChain {
    let mut builder = SecurityChain::builder();

    if !config.management.public_endpoints.is_empty() {
        builder = builder.rule(
            "public-endpoints",
            EndpointRule::to(config.management.public_endpoints.iter().cloned())
                .into_matcher(locator.clone()),
            Access::PermitAll,
        );
    }

    builder = builder.rule(
        "endpoints",
        EndpointRule::to_any().into_matcher(locator.clone()),
        Access::Authenticated,
    );

    if !config.security.static_locations.is_empty() {
        builder = builder.rule(
            "static-resources",
            StaticResourceRule::at(config.security.static_locations.iter().copied())
                .into_matcher(locator.clone()),
            Access::PermitAll,
        );
    }

    let chain = builder
        .rule(
            "error-page",
            ErrorPageRule::new().into_matcher(locator),
            Access::PermitAll,
        )
        .rule("any-request", AnyRequest, Access::Authenticated)
        .build();

    for rule in chain.rules() {
        debug!(rule = rule.name(), access = %rule.access(), "Security rule registered");
    }
    info!(rules = chain.rules().len(), "Security chain built");

    chain
}
