//! Data-source port errors
//!
//! The finance core never performs I/O itself. Rows are supplied by a
//! data-access layer behind a port trait (see `interface_app`), and every
//! adapter of that port reports failures with [`PortError`].

use std::fmt;
use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all data-source adapters must use.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The data layer returned rows that could not be shaped
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation timed out
    #[error("Timeout after {duration_ms}ms: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// Access to the organization's rows was refused
    #[error("Unauthorized: {message}")]
    Unauthorized {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. } | PortError::Timeout { .. })
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(PortError::connection("reset by peer").is_transient());
        assert!(PortError::Timeout { operation: "movements".into(), duration_ms: 5000 }.is_transient());
        assert!(!PortError::not_found("organization", "ORG-1").is_transient());
    }

    #[test]
    fn test_not_found_display() {
        let err = PortError::not_found("currency", "CUR-42");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: currency with id CUR-42");
    }
}
