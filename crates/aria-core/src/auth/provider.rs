//! The `AuthProvider` trait and its wire-level error type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use super::model::{FederatedIntent, Identity};

/// Machine-readable error codes a provider implementation can report.
///
/// These are the raw categories coming off the wire; the session gate maps
/// them into the per-operation [`AuthError`](crate::error::AuthError) set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorCode {
    /// No account exists for the email.
    UserNotFound,
    /// Password does not match the account.
    WrongPassword,
    /// The email address was rejected.
    InvalidEmail,
    /// The email is already registered.
    EmailInUse,
    /// The password failed the provider's strength policy.
    WeakPassword,
    /// The interactive popup flow could not open a window.
    PopupBlocked,
    /// The user dismissed the interactive popup.
    PopupClosedByUser,
    /// The flow is not available on this frontend surface.
    Unsupported,
    /// Transport-level failure talking to the provider.
    Network,
    /// Anything the implementation could not classify.
    Other,
}

/// A structured error from an [`AuthProvider`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message} ({code:?})")]
pub struct ProviderError {
    /// Machine-readable category.
    pub code: ProviderErrorCode,
    /// Provider-supplied detail, suitable for logs.
    pub message: String,
}

impl ProviderError {
    /// Creates a provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// An abstract identity provider.
///
/// This trait defines the contract the session gate relies on, decoupling the
/// gate's logic from the concrete identity service (REST implementation,
/// in-memory test double, ...).
///
/// # Implementation Notes
///
/// Implementations must deliver an authentication-state notification stream:
/// every successful sign-in/sign-up and every sign-out publishes
/// `Some(identity)` / `None` to all subscribers. Subscribers also receive the
/// current state immediately on subscription, mirroring how browser identity
/// SDKs fire their state callback on registration.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Signs in with email and password.
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Identity, ProviderError>;

    /// Creates an account with email and password and signs it in.
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Identity, ProviderError>;

    /// Runs the interactive (popup) federated sign-in flow.
    async fn sign_in_with_popup(
        &self,
        intent: FederatedIntent,
    ) -> std::result::Result<Identity, ProviderError>;

    /// Starts the full-page redirect federated sign-in flow.
    ///
    /// The flow's eventual result is not returned here; it is recovered on
    /// the next startup via [`redirect_result`](Self::redirect_result),
    /// because a full-page redirect destroys in-memory state.
    async fn sign_in_with_redirect(
        &self,
        intent: FederatedIntent,
    ) -> std::result::Result<(), ProviderError>;

    /// Recovers the result of a prior redirect sign-in, if one is pending.
    ///
    /// Absence of a pending redirect is not an error: `Ok(None)`.
    async fn redirect_result(&self) -> std::result::Result<Option<Identity>, ProviderError>;

    /// Signs the current user out.
    async fn sign_out(&self) -> std::result::Result<(), ProviderError>;

    /// Subscribes to authentication-state notifications.
    ///
    /// Each call returns an independent receiver; the current state is
    /// delivered first, then every subsequent change for the process
    /// lifetime.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<Option<Identity>>;
}
