//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configured API token.
pub const TOKEN_ENV_VAR: &str = "MARQUEE_TMDB_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB API settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Bearer API token (API Read Access Token).
    #[serde(default)]
    pub api_token: Option<String>,
    /// Response language, e.g. "en-US".
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    String::from("en-US")
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            language: default_language(),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Resolves the API token: the environment variable wins over the file.
    ///
    /// # Errors
    ///
    /// Returns an error when neither source provides a token.
    pub fn resolve_api_token(&self) -> Result<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR)
            && !token.is_empty()
        {
            return Ok(token);
        }
        self.tmdb.api_token.clone().with_context(|| {
            format!(
                "no TMDB API token configured: set tmdb.api_token in config.toml or the {TOKEN_ENV_VAR} environment variable"
            )
        })
    }
}
