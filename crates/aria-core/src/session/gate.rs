//! The session gate state machine and its auth operations.

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use super::model::{GateEvent, GateState, ScreenMode, Session};
use crate::auth::{AuthProvider, FederatedIntent, Identity, ProviderError, ProviderErrorCode};
use crate::error::AuthError;

/// Owns the boolean "is a user authenticated" state and the screen it
/// implies.
///
/// The gate is driven by the provider's authentication-state notification
/// stream: a notification carrying an identity enters `Authenticated`, a null
/// notification enters `Unauthenticated`. The auth operations below delegate
/// to the provider and surface mapped errors; they do not transition the
/// machine themselves (the provider's notification does), with the single
/// exception of sign-out, which transitions locally regardless of the
/// provider-call outcome.
pub struct SessionGate {
    provider: Arc<dyn AuthProvider>,
    state: RwLock<GateState>,
    session: RwLock<Session>,
    events: mpsc::UnboundedSender<GateEvent>,
}

impl SessionGate {
    /// Creates a gate over the given provider.
    ///
    /// Returns the gate and the receiver for its screen-visibility events.
    pub fn new(provider: Arc<dyn AuthProvider>) -> (Self, mpsc::UnboundedReceiver<GateEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let gate = Self {
            provider,
            state: RwLock::new(GateState::Unknown),
            session: RwLock::new(Session::anonymous()),
            events,
        };
        (gate, receiver)
    }

    /// Current machine state.
    pub async fn state(&self) -> GateState {
        *self.state.read().await
    }

    /// Current session projection.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Which screen the current state implies.
    pub async fn screen_mode(&self) -> ScreenMode {
        match *self.state.read().await {
            GateState::Authenticated => ScreenMode::MainApp,
            GateState::Unknown | GateState::Unauthenticated => ScreenMode::AuthPanel,
        }
    }

    /// Applies one provider notification to the machine.
    pub async fn apply_notification(&self, identity: Option<Identity>) {
        match identity {
            Some(identity) => {
                let session = Session::authenticated(identity);
                *self.state.write().await = GateState::Authenticated;
                *self.session.write().await = session.clone();
                self.emit(GateEvent::ShowMainApp { session });
            }
            None => {
                *self.state.write().await = GateState::Unauthenticated;
                *self.session.write().await = Session::anonymous();
                self.emit(GateEvent::ShowAuthPanel {
                    clear_credentials: false,
                });
            }
        }
    }

    /// Consumes the provider notification stream for the process lifetime.
    pub async fn run(&self, mut notifications: mpsc::UnboundedReceiver<Option<Identity>>) {
        while let Some(identity) = notifications.recv().await {
            self.apply_notification(identity).await;
        }
    }

    /// Signs in with email and password.
    ///
    /// Fails with `InvalidInput` before any provider call if either field is
    /// empty.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> std::result::Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::InvalidInput(
                "Please enter email and password".to_string(),
            ));
        }

        let identity = self
            .provider
            .sign_in(email.trim(), password)
            .await
            .map_err(map_sign_in_error)?;

        Ok(Session::authenticated(identity))
    }

    /// Creates an account with email, password, and confirmation.
    ///
    /// All local validation happens before the provider is contacted: empty
    /// fields, the 6-character minimum, and the password/confirm match.
    pub async fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> std::result::Result<Session, AuthError> {
        if email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(AuthError::InvalidInput(
                "Please fill all fields".to_string(),
            ));
        }
        if password.len() < 6 {
            return Err(AuthError::PasswordTooShort);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let identity = self
            .provider
            .sign_up(email.trim(), password)
            .await
            .map_err(map_sign_up_error)?;

        Ok(Session::authenticated(identity))
    }

    /// Runs the federated sign-in flow.
    ///
    /// Attempts the interactive popup first. A blocked popup automatically
    /// falls back to the full-page redirect flow, whose eventual result is
    /// consumed on the next startup via
    /// [`resolve_redirect_result`](Self::resolve_redirect_result) - hence the
    /// `Ok(None)` outcome. A popup dismissed by the user reports `Cancelled`
    /// without retrying.
    pub async fn sign_in_with_federated(
        &self,
        intent: FederatedIntent,
    ) -> std::result::Result<Option<Session>, AuthError> {
        match self.provider.sign_in_with_popup(intent).await {
            Ok(identity) => Ok(Some(Session::authenticated(identity))),
            Err(err) => match err.code {
                ProviderErrorCode::PopupClosedByUser => Err(AuthError::Cancelled),
                ProviderErrorCode::PopupBlocked => {
                    tracing::warn!("popup blocked, falling back to redirect sign-in");
                    self.provider
                        .sign_in_with_redirect(intent)
                        .await
                        .map_err(|redirect_err| AuthError::Unknown(redirect_err.message))?;
                    Ok(None)
                }
                _ => Err(AuthError::Unknown(err.message)),
            },
        }
    }

    /// Recovers a session from a prior redirect-fallback attempt.
    ///
    /// Invoked once at application start. Absence of a pending redirect is
    /// not an error and transitions nothing.
    pub async fn resolve_redirect_result(
        &self,
    ) -> std::result::Result<Option<Session>, AuthError> {
        match self.provider.redirect_result().await {
            Ok(Some(identity)) => Ok(Some(Session::authenticated(identity))),
            Ok(None) => Ok(None),
            Err(err) => Err(AuthError::Unknown(err.message)),
        }
    }

    /// Signs out.
    ///
    /// Logout is best-effort: a provider-side failure is logged and otherwise
    /// swallowed. The gate transitions to `Unauthenticated` and asks the UI
    /// to clear all credential fields regardless of the provider outcome.
    pub async fn sign_out(&self) -> std::result::Result<(), AuthError> {
        if let Err(err) = self.provider.sign_out().await {
            tracing::warn!(error = %err, "sign-out provider call failed");
        }

        *self.state.write().await = GateState::Unauthenticated;
        *self.session.write().await = Session::anonymous();
        self.emit(GateEvent::ShowAuthPanel {
            clear_credentials: true,
        });

        Ok(())
    }

    fn emit(&self, event: GateEvent) {
        // The receiver side may have shut down during teardown.
        let _ = self.events.send(event);
    }
}

fn map_sign_in_error(err: ProviderError) -> AuthError {
    match err.code {
        ProviderErrorCode::UserNotFound => AuthError::UserNotFound,
        ProviderErrorCode::WrongPassword => AuthError::WrongPassword,
        ProviderErrorCode::InvalidEmail => AuthError::InvalidEmail,
        _ => AuthError::Unknown(err.message),
    }
}

fn map_sign_up_error(err: ProviderError) -> AuthError {
    match err.code {
        ProviderErrorCode::EmailInUse => AuthError::EmailInUse,
        ProviderErrorCode::WeakPassword => AuthError::WeakPassword,
        ProviderErrorCode::InvalidEmail => AuthError::InvalidEmail,
        _ => AuthError::Unknown(err.message),
    }
}
