//! Shared configuration for the librero CLI and TUI.
//!
//! A single TOML file under the platform config directory, merged with
//! `LIBRERO_`-prefixed environment variables. Both binaries depend on this
//! crate; the CLI layers its flag overrides (`--server`, `--timeout`) on top
//! of the loaded values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

/// The `[server]` table: where the book API lives.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Base URL of the book server (e.g., "http://localhost:8080").
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    30
}

impl ServerConfig {
    /// Parse and validate the configured base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        self.url.parse().map_err(|_| ConfigError::Validation {
            field: "server.url".into(),
            reason: format!("invalid URL: {}", self.url),
        })
    }

    #[must_use]
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
#[must_use]
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "librero", "librero").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("librero");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full `Config` from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from an explicit path + environment. A missing file means
/// defaults; `LIBRERO_SERVER_URL` / `LIBRERO_SERVER_TIMEOUT` override it.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LIBRERO_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails for any reason.
#[must_use]
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Write as _;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.server.url, "http://localhost:8080");
        assert_eq!(cfg.server.timeout, 30);
        assert_eq!(cfg.server.timeout_duration(), Duration::from_secs(30));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.server.url, "http://localhost:8080");
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[server]\nurl = \"http://books.local:9090\"\ntimeout = 5").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.server.url, "http://books.local:9090");
        assert_eq!(cfg.server.timeout, 5);
    }

    #[test]
    fn invalid_url_is_a_validation_error() {
        let cfg = ServerConfig {
            url: "not a url".into(),
            timeout: 30,
        };
        let err = cfg.base_url().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }), "{err}");
    }

    #[test]
    fn valid_url_parses() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.base_url().unwrap().as_str(), "http://localhost:8080/");
    }
}
