//! Error types for the mealdash client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole mealdash workspace.
///
/// Remote calls, persistence and configuration all report through this enum.
/// The store never hands it to presentation code directly; it is logged and
/// folded into a fallback value (see `DashboardStore`).
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DashboardError {
    /// The request never produced an HTTP response (connect, timeout, DNS).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The backend answered with a non-success status code.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DashboardError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns the HTTP status code carried by a `Status` error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for DashboardError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, DashboardError>`.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Message used when the backend rejects a login without saying why.
pub const DEFAULT_LOGIN_FAILURE_MESSAGE: &str = "Login failed";

/// Message shown for any login attempt that never reached the backend.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Outcome of a failed `login` call.
///
/// The `Display` text is what a login form shows in its banner.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginError {
    /// The backend (or input validation) rejected the credentials.
    #[error("{message}")]
    Credential { message: String },

    /// The request failed before an answer came back; the cause is only logged.
    #[error("Network error. Please try again.")]
    Transport,
}

impl LoginError {
    /// Builds a credential error, substituting the default message when the
    /// backend supplied none (or an empty one).
    pub fn credential(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOGIN_FAILURE_MESSAGE.to_string());
        Self::Credential { message }
    }

    /// The user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_defaults_message() {
        assert_eq!(
            LoginError::credential(None).message(),
            DEFAULT_LOGIN_FAILURE_MESSAGE
        );
        assert_eq!(
            LoginError::credential(Some("  ".into())).message(),
            DEFAULT_LOGIN_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_credential_keeps_server_message() {
        let err = LoginError::credential(Some("Account locked".into()));
        assert_eq!(err.message(), "Account locked");
    }

    #[test]
    fn test_transport_message() {
        assert_eq!(LoginError::Transport.message(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn test_json_error_conversion() {
        let err: DashboardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.is_serialization());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(DashboardError::status(503, "down").status_code(), Some(503));
        assert_eq!(DashboardError::transport("reset").status_code(), None);
        assert!(DashboardError::transport("reset").is_transport());
    }
}
