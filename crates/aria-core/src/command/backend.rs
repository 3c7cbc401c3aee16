//! The backend boundary for command and status requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::transcript::MessageKind;

/// A successful reply from the command endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    /// The assistant's reply text.
    pub reply: String,
    /// The reply kind; drives transcript rendering.
    #[serde(rename = "type")]
    pub kind: MessageKind,
}

/// A system-info snapshot.
///
/// Both fields are optional on the wire; an absent field leaves the
/// corresponding display untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SystemInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ram: Option<f64>,
}

/// An abstract command backend.
///
/// Decouples the command channel from the concrete HTTP client so the round
/// trip can be exercised against a test double.
#[async_trait]
pub trait CommandBackend: Send + Sync {
    /// Sends one command and returns the backend's reply.
    ///
    /// Errors: `Server { status }` for a non-2xx response,
    /// `NetworkUnreachable` when no response was received at all.
    async fn send_command(&self, text: &str) -> Result<CommandReply>;

    /// Fetches the current system-info snapshot.
    async fn system_info(&self) -> Result<SystemInfo>;

    /// The configured endpoint, for user-facing failure messages.
    fn endpoint(&self) -> &str;
}
