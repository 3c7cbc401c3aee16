//! Error types for the Aria application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-facing authentication failure categories.
///
/// Provider error codes are collapsed into this closed set per operation.
/// The local-validation variants (`InvalidInput`, `PasswordTooShort`,
/// `PasswordMismatch`) short-circuit before any provider call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthError {
    /// A required field was empty or otherwise malformed locally.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password shorter than the 6-character minimum.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    /// Password and confirmation do not match.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// No account exists for the given email.
    #[error("Email not found")]
    UserNotFound,

    /// The password does not match the account.
    #[error("Wrong password")]
    WrongPassword,

    /// The provider rejected the email address.
    #[error("Invalid email")]
    InvalidEmail,

    /// The email is already registered.
    #[error("Email already registered")]
    EmailInUse,

    /// The provider considered the password too weak.
    #[error("Password too weak")]
    WeakPassword,

    /// The user aborted an interactive sign-in flow.
    #[error("Sign-in cancelled")]
    Cancelled,

    /// Any provider failure outside the per-operation category set.
    #[error("Authentication failed: {0}")]
    Unknown(String),
}

/// A shared error type for the entire Aria application.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AriaError {
    /// Local validation failure; never reaches the provider or backend.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Authentication failure, already mapped to a user-facing category.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// No response received from the backend.
    #[error("Backend not responding on {endpoint}")]
    NetworkUnreachable { endpoint: String },

    /// The backend answered with a non-success HTTP status.
    #[error("Server error: {status}")]
    Server { status: u16 },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AriaError {
    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a NetworkUnreachable error for the given endpoint
    pub fn network_unreachable(endpoint: impl Into<String>) -> Self {
        Self::NetworkUnreachable {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a Server error for the given HTTP status
    pub fn server(status: u16) -> Self {
        Self::Server { status }
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

    /// Check if this is a NetworkUnreachable error
    pub fn is_network_unreachable(&self) -> bool {
        matches!(self, Self::NetworkUnreachable { .. })
    }

    /// Check if this is a Server error
    pub fn is_server(&self) -> bool {
        matches!(self, Self::Server { .. })
    }

    /// Check if this is an Auth error
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

impl From<std::io::Error> for AriaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AriaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, AriaError>`.
pub type Result<T> = std::result::Result<T, AriaError>;
