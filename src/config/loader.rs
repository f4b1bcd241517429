//! Settings layered from defaults, an optional TOML file and the environment

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// Config file picked up from the current directory when present.
pub const CONFIG_FILE_NAME: &str = "repo-gemini.toml";

/// Prefix for the optional environment overrides (`REPO_GEMINI_MODEL`, ...).
pub const ENV_PREFIX: &str = "REPO_GEMINI_";

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Credential for the Gemini API (`GEMINI_API_KEY`)
    pub gemini_api_key: Option<String>,

    /// Directory to flatten (`FOLDER_PATH`)
    pub folder_path: Option<PathBuf>,

    pub model: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    pub base_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            folder_path: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Settings {
    /// The directory to flatten, or an error naming the missing variable.
    pub fn require_folder_path(&self) -> Result<&Path> {
        self.folder_path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty())
            .context("FOLDER_PATH is not set (set it in .env or pass --path)")
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load `KEY=value` pairs from `path` into the process environment.
///
/// Variables that are already set keep their value.
pub fn load_env_file(path: &Path) -> Result<()> {
    dotenvy::from_path(path).with_context(|| format!("Error loading {} file", path.display()))?;
    tracing::debug!("Loaded environment from {}", path.display());
    Ok(())
}

/// Build [`Settings`] from defaults, the config file and the environment.
///
/// An explicit `config_path` must exist; otherwise `repo-gemini.toml` in
/// `cwd` is used when present.
pub fn load_settings(cwd: &Path, config_path: Option<&Path>) -> Result<Settings> {
    let mut figment = Figment::from(Serialized::defaults(Settings::default()));

    match config_path {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            let default_path = cwd.join(CONFIG_FILE_NAME);
            if default_path.is_file() {
                tracing::debug!("Using config file {}", default_path.display());
                figment = figment.merge(Toml::file(default_path));
            }
        }
    }

    // The two required variables are opaque strings; figment's env parser
    // would turn `2024` or `true` into numbers and booleans.
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        figment = figment.merge(Serialized::default("gemini_api_key", key));
    }
    if let Ok(folder) = std::env::var("FOLDER_PATH") {
        figment = figment.merge(Serialized::default("folder_path", folder));
    }
    figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["gemini_api_key", "folder_path"]));

    figment.extract().context("Invalid configuration")
}
