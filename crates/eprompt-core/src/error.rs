//! Error types for the ePrompt workbench.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the whole workbench.
///
/// Every variant is recoverable: a failure leaves the session on its current
/// stage and is reported to the user as a notification.
#[derive(Error, Debug, Clone, Serialize, PartialEq)]
pub enum EpromptError {
    /// Required template fields are blank. Never sent to the remote service.
    #[error("Missing required fields: {}", .missing_fields.join(", "))]
    Validation { missing_fields: Vec<String> },

    /// Network or service failure during a remote call
    #[error("Remote call '{operation}' failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },

    /// A selected entity references something that is not loaded locally
    #[error("Reference not found: {entity_type} '{id}'")]
    Reference {
        entity_type: &'static str,
        id: String,
    },

    /// Another generate/refine operation is in flight
    #[error("Another operation is already in progress")]
    Busy,

    /// The session is not in a state that allows the operation
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Feature handled by an external collaborator
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl EpromptError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error from the offending field names
    pub fn validation<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            missing_fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a Remote error
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Remote {
            operation,
            message: message.into(),
        }
    }

    /// Creates a Reference error
    pub fn reference(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::Reference {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a Remote error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check if this is a Busy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy)
    }

    /// Field names reported by a Validation error, empty otherwise.
    pub fn missing_fields(&self) -> &[String] {
        match self {
            Self::Validation { missing_fields } => missing_fields,
            _ => &[],
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for EpromptError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for EpromptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for EpromptError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for EpromptError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, EpromptError>`.
pub type Result<T> = std::result::Result<T, EpromptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_fields() {
        let err = EpromptError::validation(["topic", "tone"]);
        assert_eq!(err.to_string(), "Missing required fields: topic, tone");
        assert_eq!(err.missing_fields(), ["topic", "tone"]);
        assert!(err.is_validation());
    }

    #[test]
    fn test_missing_fields_empty_for_other_variants() {
        let err = EpromptError::remote("search", "timeout");
        assert!(err.missing_fields().is_empty());
        assert!(err.is_remote());
    }

    #[test]
    fn test_remote_error_serializes_operation() {
        let value = serde_json::to_value(EpromptError::remote("search", "timeout")).unwrap();
        assert_eq!(value["Remote"]["operation"], "search");
        assert_eq!(value["Remote"]["message"], "timeout");
    }
}
