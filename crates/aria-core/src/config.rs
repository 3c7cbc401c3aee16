//! Backend endpoint resolution and client-side preferences.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fixed endpoint used when running against a local backend.
pub const LOCAL_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// Fixed endpoint of the deployed backend.
pub const DEPLOYED_BACKEND_URL: &str = "https://api.aria-assistant.dev";

/// Resolves the backend base URL for the host the client is served from.
///
/// A two-value environment switch, not a general configuration system:
/// loopback host names select the local backend, everything else the
/// deployed one.
pub fn backend_url_for_host(host: &str) -> &'static str {
    match host {
        "localhost" | "127.0.0.1" => LOCAL_BACKEND_URL,
        _ => DEPLOYED_BACKEND_URL,
    }
}

/// The persisted display theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    /// The other theme.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

/// Repository for client-local preferences.
///
/// One key-value preference today (the theme), read at startup and written
/// on toggle. Not security-sensitive.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    /// Loads the saved theme, if any.
    async fn load_theme(&self) -> Result<Option<Theme>>;

    /// Persists the theme.
    async fn save_theme(&self, theme: Theme) -> Result<()>;
}
