//! Application configuration module.
//!
//! Manages TOML-based config files for user settings such as the
//! TMDB API token and response language.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, TOKEN_ENV_VAR};
pub use paths::resolve_config_path;
