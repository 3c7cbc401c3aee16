//! Session gate domain model.

use serde::{Deserialize, Serialize};

use crate::auth::Identity;

/// A projection of provider-reported authentication state.
///
/// Created or replaced on every provider notification; it has no independent
/// persistence and is never written back to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Whether a user is currently authenticated.
    pub is_authenticated: bool,
    /// The authenticated identity, when present.
    pub identity: Option<Identity>,
}

impl Session {
    /// A session for an authenticated identity.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            is_authenticated: true,
            identity: Some(identity),
        }
    }

    /// The unauthenticated session.
    pub fn anonymous() -> Self {
        Self {
            is_authenticated: false,
            identity: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// The gate's state machine states.
///
/// Purely reactive: the only transitions are provider notifications carrying
/// a non-null identity (`Authenticated`) or null (`Unauthenticated`), plus
/// the explicit local transition performed by sign-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateState {
    /// Before the first provider callback has been observed.
    Unknown,
    Authenticated,
    Unauthenticated,
}

/// Which of the two screens is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenMode {
    /// Login/signup panel visible, main application hidden.
    AuthPanel,
    /// Main application visible, auth panel hidden.
    MainApp,
}

/// Side effects the gate asks the UI layer to perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GateEvent {
    /// Reveal the main application container, hide the auth container.
    ShowMainApp {
        session: Session,
    },
    /// Reveal the auth container, hide the main application container.
    ///
    /// `clear_credentials` is set only on explicit logout; the ordinary
    /// unauthenticated notification leaves the credential fields untouched.
    ShowAuthPanel {
        clear_credentials: bool,
    },
}
