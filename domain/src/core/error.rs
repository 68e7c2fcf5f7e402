//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown agent type: {0}")]
    UnknownAgentType(String),

    #[error("Decision has no options")]
    NoOptions,

    #[error("No JSON object found in {context} response")]
    MissingJson { context: String },

    #[error("Failed to parse {context} response: {message}")]
    InvalidJson { context: String, message: String },
}

impl DomainError {
    /// Whether this error came from reading LLM output (as opposed to bad input)
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            DomainError::MissingJson { .. } | DomainError::InvalidJson { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_json_display() {
        let error = DomainError::MissingJson {
            context: "risk".to_string(),
        };
        assert_eq!(error.to_string(), "No JSON object found in risk response");
    }

    #[test]
    fn test_is_parse_error() {
        assert!(
            DomainError::InvalidJson {
                context: "x".into(),
                message: "eof".into()
            }
            .is_parse_error()
        );
        assert!(!DomainError::NoOptions.is_parse_error());
        assert!(!DomainError::UnknownAgentType("ceo".into()).is_parse_error());
    }
}
