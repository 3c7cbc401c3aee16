//! TOML-backed preference storage.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use aria_core::config::{PreferenceRepository, Theme};
use aria_core::error::{AriaError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PreferencesFile {
    #[serde(default)]
    theme: Option<Theme>,
}

/// Persists client-local preferences to a TOML file.
///
/// Writes go through a temporary file plus atomic rename so a crash mid-write
/// never leaves a truncated preferences file behind.
pub struct TomlPreferenceRepository {
    path: PathBuf,
}

impl TomlPreferenceRepository {
    /// Creates a repository over the given file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default preferences path under the platform config directory.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AriaError::config("could not determine the config directory"))?;
        Ok(config_dir.join("aria").join("preferences.toml"))
    }

    /// Creates a repository at the default preferences path.
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    fn read_file(path: &Path) -> Result<PreferencesFile> {
        if !path.exists() {
            return Ok(PreferencesFile::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|err| AriaError::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        })
    }

    fn write_file(path: &Path, prefs: &PreferencesFile) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(prefs).map_err(|err| AriaError::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        })?;

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceRepository for TomlPreferenceRepository {
    async fn load_theme(&self) -> Result<Option<Theme>> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || Self::read_file(&path))
            .await
            .map_err(|err| AriaError::internal(format!("failed to join task: {err}")))?
            .map(|prefs| prefs.theme)
    }

    async fn save_theme(&self, theme: Theme) -> Result<()> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut prefs = Self::read_file(&path).unwrap_or_default();
            prefs.theme = Some(theme);
            Self::write_file(&path, &prefs)
        })
        .await
        .map_err(|err| AriaError::internal(format!("failed to join task: {err}")))?
    }
}
