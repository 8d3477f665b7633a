//! Application state shared by handlers and middleware

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{ApplicationContext, SecurityChain};

#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ApplicationContext>,
    pub chain: Arc<SecurityChain>,
    pub api_tokens: Arc<HashSet<String>>,
}

impl AppState {
    pub fn new(
        context: Arc<ApplicationContext>,
        chain: SecurityChain,
        api_tokens: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            context,
            chain: Arc::new(chain),
            api_tokens: Arc::new(api_tokens.into_iter().collect()),
        }
    }

    pub fn is_valid_token(&self, token: &str) -> bool {
        self.api_tokens.contains(token)
    }
}
