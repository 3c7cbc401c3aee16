//! Identity types for the provider boundary.

use serde::{Deserialize, Serialize};

/// The identity the provider reports for an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Email address of the authenticated user.
    pub email: String,
    /// Which provider flow produced this identity ("password", "google", ...).
    pub provider: String,
}

impl Identity {
    /// Creates an identity for the given email and provider name.
    pub fn new(email: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            provider: provider.into(),
        }
    }
}

/// Whether a federated sign-in was started from the login or signup screen.
///
/// The provider flow is identical either way; the intent only affects which
/// inline status area reports progress and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederatedIntent {
    Login,
    Signup,
}
