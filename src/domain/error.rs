use thiserror::Error;

/// Errors raised while resolving or using a matcher's context
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("No application context found for request: {message}")]
    MissingContext { message: String },

    #[error("Unable to create context of type '{type_name}': {message}")]
    ConstructionFailure { type_name: String, message: String },

    #[error("Invalid matcher configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Invalid path pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl MatcherError {
    pub fn missing_context(message: impl Into<String>) -> Self {
        Self::MissingContext {
            message: message.into(),
        }
    }

    pub fn construction(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConstructionFailure {
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by bean lookups against an application context
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BeanError {
    #[error("No bean of type '{type_name}' is registered")]
    NoSuchBean { type_name: String },

    #[error("No bean named '{name}' of type '{type_name}' is registered")]
    NoSuchNamedBean { name: String, type_name: String },

    #[error("Expected a single bean of type '{type_name}' but found {candidates}: {names:?}")]
    NotUnique {
        type_name: String,
        candidates: usize,
        names: Vec<String>,
    },
}
