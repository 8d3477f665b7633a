//! Matching of management endpoint requests

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use once_cell::sync::OnceCell;
use tracing::warn;

use super::paths::ManagementPaths;
use super::path_pattern::PathPattern;
use crate::domain::context::{ContextLocator, ContextType};
use crate::domain::matcher::{ApplicationContextRequestMatcher, ContextRule};

/// Which endpoints a rule includes
#[derive(Debug, Clone, PartialEq, Eq)]
enum EndpointSelection {
    All,
    Ids(Vec<String>),
}

/// Rule matching requests to management endpoints
///
/// Patterns are derived from the [`ManagementPaths`] bean once the context
/// is resolved. Ids that are not exposed are ignored.
#[derive(Debug)]
pub struct EndpointRule {
    includes: EndpointSelection,
    excludes: Vec<String>,
    include_links: bool,
    patterns: OnceCell<Vec<PathPattern>>,
}

impl EndpointRule {
    /// Any exposed endpoint, including the links page
    pub fn to_any() -> Self {
        Self {
            includes: EndpointSelection::All,
            excludes: Vec::new(),
            include_links: true,
            patterns: OnceCell::new(),
        }
    }

    /// The given endpoints only
    pub fn to<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            includes: EndpointSelection::Ids(ids.into_iter().map(Into::into).collect()),
            excludes: Vec::new(),
            include_links: false,
            patterns: OnceCell::new(),
        }
    }

    pub fn excluding<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn excluding_links(mut self) -> Self {
        self.include_links = false;
        self
    }

    /// Wrap the rule in a matcher resolving [`ManagementPaths`] as a bean
    pub fn into_matcher(
        self,
        locator: Arc<dyn ContextLocator>,
    ) -> ApplicationContextRequestMatcher<ManagementPaths, Self> {
        ApplicationContextRequestMatcher::new(self, ContextType::bean(), locator)
    }

    /// Patterns compiled on initialization; empty before
    pub fn patterns(&self) -> &[PathPattern] {
        self.patterns.get().map(Vec::as_slice).unwrap_or_default()
    }

    fn selected_ids(&self, paths: &ManagementPaths) -> Vec<String> {
        let included: Vec<String> = match &self.includes {
            EndpointSelection::All => paths.endpoints().to_vec(),
            EndpointSelection::Ids(ids) => ids
                .iter()
                .filter(|id| {
                    let exposed = paths.is_exposed(id);
                    if !exposed {
                        warn!(endpoint = %id, "Ignoring endpoint that is not exposed");
                    }
                    exposed
                })
                .cloned()
                .collect(),
        };

        included
            .into_iter()
            .filter(|id| !self.excludes.contains(id))
            .collect()
    }

    fn build_patterns(&self, paths: &ManagementPaths) -> Vec<PathPattern> {
        let mut raw: Vec<String> = Vec::new();

        for id in self.selected_ids(paths) {
            let endpoint_path = paths.endpoint_path(&id);
            raw.push(format!("{}/**", endpoint_path));
            raw.push(endpoint_path);
        }

        if self.include_links && !paths.base_path().is_empty() {
            raw.push(paths.base_path().to_string());
            raw.push(format!("{}/", paths.base_path()));
        }

        raw.into_iter()
            .filter_map(|pattern| match PathPattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    warn!(error = %e, "Skipping endpoint pattern");
                    None
                }
            })
            .collect()
    }
}

impl ContextRule<ManagementPaths> for EndpointRule {
    fn decide(&self, request: &Request<Body>, _context: &ManagementPaths) -> bool {
        let path = request.uri().path();
        self.patterns().iter().any(|pattern| pattern.matches(path))
    }

    fn on_initialized(&self, context: &ManagementPaths) {
        self.patterns.get_or_init(|| self.build_patterns(context));
    }
}
