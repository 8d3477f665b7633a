use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use once_cell::sync::OnceCell;

use super::paths::{ServerPaths, DEFAULT_ERROR_PATH};
use crate::domain::context::{ApplicationContext, ContextLocator, ContextType};
use crate::domain::matcher::{ApplicationContextRequestMatcher, ContextRule};

/// Rule matching the error page, working directly with the application context
#[derive(Debug, Default)]
pub struct ErrorPageRule {
    error_path: OnceCell<String>,
}

impl ErrorPageRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_matcher(
        self,
        locator: Arc<dyn ContextLocator>,
    ) -> ApplicationContextRequestMatcher<ApplicationContext, Self> {
        ApplicationContextRequestMatcher::new(self, ContextType::bean(), locator)
    }

    pub fn error_path(&self) -> Option<&str> {
        self.error_path.get().map(String::as_str)
    }
}

impl ContextRule<ApplicationContext> for ErrorPageRule {
    fn decide(&self, request: &Request<Body>, _context: &ApplicationContext) -> bool {
        self.error_path() == Some(request.uri().path())
    }

    fn on_initialized(&self, context: &ApplicationContext) {
        self.error_path.get_or_init(|| {
            context
                .get_bean::<ServerPaths>()
                .map(|paths| paths.error_path().to_string())
                .unwrap_or_else(|_| DEFAULT_ERROR_PATH.to_string())
        });
    }
}
