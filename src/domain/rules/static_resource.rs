//! Matching of requests for common static resource locations

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::path_pattern::PathPattern;
use super::paths::ServerPaths;
use crate::domain::context::{ApplicationContext, Autowire, ContextLocator, ContextType};
use crate::domain::error::BeanError;
use crate::domain::matcher::{ApplicationContextRequestMatcher, ContextRule};

/// Common locations for static resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticLocation {
    Css,
    JavaScript,
    Images,
    WebJars,
    Favicon,
}

impl StaticLocation {
    pub const ALL: [StaticLocation; 5] = [
        StaticLocation::Css,
        StaticLocation::JavaScript,
        StaticLocation::Images,
        StaticLocation::WebJars,
        StaticLocation::Favicon,
    ];

    pub fn patterns(&self) -> &'static [&'static str] {
        match self {
            Self::Css => &["/css/**"],
            Self::JavaScript => &["/js/**"],
            Self::Images => &["/images/**"],
            Self::WebJars => &["/webjars/**"],
            Self::Favicon => &["/favicon.*", "/*/icon-*"],
        }
    }
}

impl fmt::Display for StaticLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css => write!(f, "css"),
            Self::JavaScript => write!(f, "java_script"),
            Self::Images => write!(f, "images"),
            Self::WebJars => write!(f, "web_jars"),
            Self::Favicon => write!(f, "favicon"),
        }
    }
}

/// Context for [`StaticResourceRule`], autowired from the [`ServerPaths`] bean
#[derive(Debug, Clone)]
pub struct StaticResourcePaths {
    server: Arc<ServerPaths>,
}

impl StaticResourcePaths {
    pub fn patterns_for(&self, location: StaticLocation) -> Vec<String> {
        location
            .patterns()
            .iter()
            .map(|pattern| self.server.relative(pattern))
            .collect()
    }
}

impl Autowire for StaticResourcePaths {
    fn autowire(context: &ApplicationContext) -> Result<Self, BeanError> {
        Ok(Self {
            server: context.get_bean::<ServerPaths>()?,
        })
    }
}

/// Rule matching requests for static resources
#[derive(Debug)]
pub struct StaticResourceRule {
    locations: Vec<StaticLocation>,
    patterns: OnceCell<Vec<PathPattern>>,
}

impl StaticResourceRule {
    pub fn at_common_locations() -> Self {
        Self::at(StaticLocation::ALL)
    }

    pub fn at(locations: impl IntoIterator<Item = StaticLocation>) -> Self {
        let mut unique = Vec::new();
        for location in locations {
            if !unique.contains(&location) {
                unique.push(location);
            }
        }

        Self {
            locations: unique,
            patterns: OnceCell::new(),
        }
    }

    pub fn excluding(mut self, locations: impl IntoIterator<Item = StaticLocation>) -> Self {
        let excluded: Vec<StaticLocation> = locations.into_iter().collect();
        self.locations.retain(|location| !excluded.contains(location));
        self
    }

    pub fn locations(&self) -> &[StaticLocation] {
        &self.locations
    }

    /// Wrap the rule in a matcher autowiring [`StaticResourcePaths`]
    pub fn into_matcher(
        self,
        locator: Arc<dyn ContextLocator>,
    ) -> ApplicationContextRequestMatcher<StaticResourcePaths, Self> {
        ApplicationContextRequestMatcher::new(self, ContextType::autowired(), locator)
    }

    fn build_patterns(&self, paths: &StaticResourcePaths) -> Vec<PathPattern> {
        self.locations
            .iter()
            .flat_map(|location| paths.patterns_for(*location))
            .filter_map(|pattern| match PathPattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!(error = %e, "Skipping static resource pattern");
                    None
                }
            })
            .collect()
    }
}

impl ContextRule<StaticResourcePaths> for StaticResourceRule {
    fn decide(&self, request: &Request<Body>, _context: &StaticResourcePaths) -> bool {
        let path = request.uri().path();
        self.patterns
            .get()
            .is_some_and(|patterns| patterns.iter().any(|pattern| pattern.matches(path)))
    }

    fn on_initialized(&self, context: &StaticResourcePaths) {
        self.patterns.get_or_init(|| self.build_patterns(context));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::FixedContextLocator;
    use crate::domain::error::MatcherError;
    use crate::domain::matcher::RequestMatcher;

    fn locator(servlet_path: &str) -> Arc<dyn ContextLocator> {
        let paths = ServerPaths::new(servlet_path, "/error").unwrap();
        let context = ApplicationContext::builder("root").bean(paths).build();
        Arc::new(FixedContextLocator::new(context))
    }

    fn matches(matcher: &impl RequestMatcher, path: &str) -> bool {
        let request = Request::builder().uri(path).body(Body::empty()).unwrap();
        matcher.matches(&request).unwrap()
    }

    #[test]
    fn test_common_locations() {
        let matcher = StaticResourceRule::at_common_locations().into_matcher(locator(""));

        assert!(matches(&matcher, "/css/site.css"));
        assert!(matches(&matcher, "/js/app.js"));
        assert!(matches(&matcher, "/images/logo.png"));
        assert!(matches(&matcher, "/webjars/jquery/jquery.min.js"));
        assert!(matches(&matcher, "/favicon.ico"));
        assert!(matches(&matcher, "/static/icon-192.png"));
        assert!(!matches(&matcher, "/api/users"));
    }

    #[test]
    fn test_servlet_path_prefix() {
        let matcher = StaticResourceRule::at_common_locations().into_matcher(locator("/app"));

        assert!(matches(&matcher, "/app/css/site.css"));
        assert!(!matches(&matcher, "/css/site.css"));
    }

    #[test]
    fn test_excluding_locations() {
        let matcher = StaticResourceRule::at_common_locations()
            .excluding([StaticLocation::Favicon])
            .into_matcher(locator(""));

        assert!(matches(&matcher, "/css/site.css"));
        assert!(!matches(&matcher, "/favicon.ico"));
        assert_eq!(matcher.rule().locations().len(), 4);
    }

    #[test]
    fn test_at_deduplicates_locations() {
        let rule = StaticResourceRule::at([StaticLocation::Css, StaticLocation::Css]);
        assert_eq!(rule.locations(), [StaticLocation::Css]);
    }

    #[test]
    fn test_context_is_autowired_not_registered() {
        let paths = ServerPaths::new("", "/error").unwrap();
        let context = ApplicationContext::builder("root").bean(paths).build();
        let matcher = StaticResourceRule::at_common_locations()
            .into_matcher(Arc::new(FixedContextLocator::new(context.clone())));

        assert!(matches(&matcher, "/css/a.css"));
        assert!(matcher.is_resolved());
        assert!(!context.contains_bean::<StaticResourcePaths>());
    }

    #[test]
    fn test_missing_server_paths_fails_construction() {
        let context = ApplicationContext::builder("root").build();
        let matcher = StaticResourceRule::at_common_locations()
            .into_matcher(Arc::new(FixedContextLocator::new(context)));

        let request = Request::builder()
            .uri("/css/a.css")
            .body(Body::empty())
            .unwrap();
        let err = matcher.matches(&request).unwrap_err();

        assert!(matches!(
            err,
            MatcherError::ConstructionFailure { ref type_name, .. } if type_name == "StaticResourcePaths"
        ));
    }
}
