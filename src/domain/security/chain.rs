use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::error::MatcherError;
use crate::domain::matcher::RequestMatcher;

/// Access granted to requests matched by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    PermitAll,
    Authenticated,
    DenyAll,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermitAll => write!(f, "permit_all"),
            Self::Authenticated => write!(f, "authenticated"),
            Self::DenyAll => write!(f, "deny_all"),
        }
    }
}

/// A named matcher with the access it grants
#[derive(Debug, Clone)]
pub struct SecurityRule {
    name: String,
    matcher: Arc<dyn RequestMatcher>,
    access: Access,
}

impl SecurityRule {
    pub fn new(name: impl Into<String>, matcher: Arc<dyn RequestMatcher>, access: Access) -> Self {
        Self {
            name: name.into(),
            matcher,
            access,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn access(&self) -> Access {
        self.access
    }
}

/// Outcome of evaluating a request against the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    /// Name of the matching rule; `None` when the default applied
    pub rule: Option<String>,
    pub access: Access,
}

/// Ordered list of rules; the first matching rule decides
#[derive(Debug, Clone)]
pub struct SecurityChain {
    rules: Vec<SecurityRule>,
    default_access: Access,
}

impl SecurityChain {
    pub fn builder() -> SecurityChainBuilder {
        SecurityChainBuilder::default()
    }

    pub fn rules(&self) -> &[SecurityRule] {
        &self.rules
    }

    /// Evaluate the request; matcher errors propagate to the caller
    pub fn evaluate(&self, request: &Request<Body>) -> Result<Decision, MatcherError> {
        for rule in &self.rules {
            if rule.matcher.matches(request)? {
                debug!(
                    rule = %rule.name,
                    access = %rule.access,
                    path = %request.uri().path(),
                    "Security rule matched"
                );
                return Ok(Decision {
                    rule: Some(rule.name.clone()),
                    access: rule.access,
                });
            }
        }

        Ok(Decision {
            rule: None,
            access: self.default_access,
        })
    }
}

/// Builder for [`SecurityChain`]
#[derive(Debug)]
pub struct SecurityChainBuilder {
    rules: Vec<SecurityRule>,
    default_access: Access,
}

impl Default for SecurityChainBuilder {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            default_access: Access::Authenticated,
        }
    }
}

impl SecurityChainBuilder {
    pub fn rule(
        mut self,
        name: impl Into<String>,
        matcher: impl RequestMatcher + 'static,
        access: Access,
    ) -> Self {
        self.rules
            .push(SecurityRule::new(name, Arc::new(matcher), access));
        self
    }

    pub fn default_access(mut self, access: Access) -> Self {
        self.default_access = access;
        self
    }

    pub fn build(self) -> SecurityChain {
        SecurityChain {
            rules: self.rules,
            default_access: self.default_access,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matcher::AnyRequest;

    #[derive(Debug)]
    struct PrefixMatcher(&'static str);

    impl RequestMatcher for PrefixMatcher {
        fn matches(&self, request: &Request<Body>) -> Result<bool, MatcherError> {
            Ok(request.uri().path().starts_with(self.0))
        }
    }

    #[derive(Debug)]
    struct FailingMatcher;

    impl RequestMatcher for FailingMatcher {
        fn matches(&self, _request: &Request<Body>) -> Result<bool, MatcherError> {
            Err(MatcherError::missing_context("not attached"))
        }
    }

    fn request(path: &str) -> Request<Body> {
        Request::builder().uri(path).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_first_matching_rule_wins() {
        let chain = SecurityChain::builder()
            .rule("public", PrefixMatcher("/public"), Access::PermitAll)
            .rule("admin", PrefixMatcher("/admin"), Access::DenyAll)
            .rule("everything", AnyRequest, Access::Authenticated)
            .build();

        let decision = chain.evaluate(&request("/public/index.html")).unwrap();
        assert_eq!(decision.rule.as_deref(), Some("public"));
        assert_eq!(decision.access, Access::PermitAll);

        let decision = chain.evaluate(&request("/admin/users")).unwrap();
        assert_eq!(decision.access, Access::DenyAll);

        let decision = chain.evaluate(&request("/api")).unwrap();
        assert_eq!(decision.rule.as_deref(), Some("everything"));
    }

    #[test]
    fn test_default_access_when_nothing_matches() {
        let chain = SecurityChain::builder()
            .rule("public", PrefixMatcher("/public"), Access::PermitAll)
            .default_access(Access::DenyAll)
            .build();

        let decision = chain.evaluate(&request("/private")).unwrap();
        assert_eq!(
            decision,
            Decision {
                rule: None,
                access: Access::DenyAll
            }
        );
    }

    #[test]
    fn test_matcher_error_propagates() {
        let chain = SecurityChain::builder()
            .rule("broken", FailingMatcher, Access::PermitAll)
            .rule("everything", AnyRequest, Access::PermitAll)
            .build();

        let err = chain.evaluate(&request("/")).unwrap_err();
        assert!(matches!(err, MatcherError::MissingContext { .. }));
    }

    #[test]
    fn test_access_serialization() {
        let json = serde_json::to_string(&Access::PermitAll).unwrap();
        assert_eq!(json, "\"permit_all\"");
    }
}
