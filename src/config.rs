/*============================================================
  Synavera Project: Syn-Pub
  Module: synpub_core::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load and validate Syn-Pub-Core configuration: registry
    endpoint, package list, and logging destinations.

  Security / Safety Notes:
    Reads a single operator-owned TOML file; no secrets are
    expected or stored.

  Dependencies:
    serde + toml for parsing, dirs for XDG locations, url for
    endpoint validation.

  Operational Scope:
    Consulted once at start-up before any network activity.

  Revision History:
    2026-10-18 COD  Authored configuration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Sensible defaults with explicit override paths
    - Validation before use
============================================================*/

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

use crate::error::{Result, SynpubError};

pub const DEFAULT_BASE_URL: &str = "https://dart.dev";
pub const DEFAULT_PATH_TEMPLATE: &str = "/f/packages/{package}.json";
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

const APP_DIR: &str = "syn-pub";

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynpubConfig {
    pub registry: RegistryConfig,
    pub run: RunConfig,
    pub logging: LoggingConfig,
}

/// Where package documents are fetched from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    pub base_url: String,
    pub path_template: String,
    /// Request timeout in seconds; `None` leaves the transport default.
    pub timeout: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            path_template: DEFAULT_PATH_TEMPLATE.to_string(),
            timeout: None,
        }
    }
}

/// Packages reported on each invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    pub packages: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            packages: vec!["http".to_string(), "path".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub persist: bool,
    pub directory: Option<PathBuf>,
}

impl SynpubConfig {
    /// Load from `path` when given, otherwise from the default location.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(explicit) => Self::load_file(explicit)?,
            None => match default_config_path() {
                Some(default) if default.is_file() => Self::load_file(&default)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynpubError::Config(format!("Failed to read {}: {err}", path.display()))
        })?;
        Self::from_toml(&raw)
            .map_err(|err| SynpubError::Config(format!("{}: {err}", path.display())))
    }

    fn from_toml(raw: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Reject configurations that cannot produce a usable request.
    pub fn validate(&self) -> Result<()> {
        let base = Url::parse(&self.registry.base_url).map_err(|err| {
            SynpubError::Config(format!(
                "registry.base_url `{}` is not a valid URL: {err}",
                self.registry.base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SynpubError::Config(format!(
                "registry.base_url must use http or https, got `{}`",
                base.scheme()
            )));
        }
        if !self.registry.path_template.contains(PACKAGE_PLACEHOLDER) {
            return Err(SynpubError::Config(format!(
                "registry.path_template must contain {PACKAGE_PLACEHOLDER}"
            )));
        }
        if self.run.packages.iter().any(|pkg| pkg.trim().is_empty()) {
            return Err(SynpubError::Config(
                "run.packages contains an empty package name".into(),
            ));
        }
        Ok(())
    }

    /// Directory for session log files.
    pub fn log_dir(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("logs")
        })
    }
}

/// `$XDG_CONFIG_HOME/syn-pub/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}
