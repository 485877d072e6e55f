//! Client configuration and where it is stored.
//!
//! The configuration file lives in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/org.barstock.Barstock/
//! - Windows: %APPDATA%/barstock/Barstock/config/
//! - Linux: ~/.config/barstock/

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use barstock_core::ReconcilePolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_QUALIFIER: &str = "org";
const APP_ORG: &str = "barstock";
const APP_NAME: &str = "Barstock";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_COLLECTION_PATH: &str = "/api/ingredients";
pub const DEFAULT_ITEM_PATH: &str = "/api/ingredient";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How mutation requests are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// `application/x-www-form-urlencoded`, what the inventory server expects.
    #[default]
    Form,
    Json,
}

impl fmt::Display for BodyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BodyEncoding::Form => "form",
            BodyEncoding::Json => "json",
        })
    }
}

/// Where the inventory server lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Path answering `GET` with the whole collection.
    pub collection_path: String,
    /// Path answering `PUT` and `DELETE` for a single row.
    pub item_path: String,
    pub timeout_secs: u64,
    pub body_encoding: BodyEncoding,
    /// Which local row an acknowledgment is applied to.
    pub reconcile: ReconcilePolicy,
    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            collection_path: DEFAULT_COLLECTION_PATH.to_string(),
            item_path: DEFAULT_ITEM_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            body_encoding: BodyEncoding::default(),
            reconcile: ReconcilePolicy::default(),
            system_proxy: true,
        }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML document. Missing keys take defaults.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, or the platform config file when `path` is `None`.
    ///
    /// An explicit path must exist. The platform file is optional; when it
    /// is absent (or no config directory can be determined) the defaults
    /// are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(path = %path.display(), "loaded client config");
            return Self::from_toml(&content, path);
        }

        let Some(path) = config_path() else {
            tracing::warn!("could not determine config directory, using defaults");
            return Ok(Self::default());
        };
        match fs::read_to_string(&path) {
            Ok(content) => {
                tracing::info!(path = %path.display(), "loaded client config");
                Self::from_toml(&content, &path)
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Replaces the base URL, as given on the command line.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn collection_url(&self) -> String {
        join_url(&self.base_url, &self.collection_path)
    }

    pub fn item_url(&self) -> String {
        join_url(&self.base_url, &self.item_path)
    }
}

/// Path of the platform config file, if a config directory exists.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Joins with exactly one `/` between base and path.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim().trim_end_matches('/'),
        path.trim().trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ClientConfig, ConfigError> {
        ClientConfig::from_toml(content, Path::new("test.toml"))
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse("").unwrap(), ClientConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = parse(
            r#"
            base_url = "https://bar.example.com/"
            timeout_secs = 5
            body_encoding = "json"
            reconcile = "natural-key"
            system_proxy = false
            "#,
        )
        .unwrap();
        assert_eq!(config.body_encoding, BodyEncoding::Json);
        assert_eq!(config.reconcile, ReconcilePolicy::NaturalKey);
        assert!(!config.system_proxy);
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(
            config.collection_url(),
            "https://bar.example.com/api/ingredients"
        );
        assert_eq!(config.item_url(), "https://bar.example.com/api/ingredient");
    }

    #[test]
    fn rejects_relative_url() {
        assert!(matches!(
            parse(r#"base_url = "bar.example.com""#),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            ClientConfig::default().with_base_url("ftp://bar"),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(matches!(
            parse("timeout_secs = 0"),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn unknown_encoding_is_a_parse_error() {
        let err = parse(r#"body_encoding = "xml""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse test.toml"));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = ClientConfig::load(Some(Path::new("/nonexistent/barstock.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn join_handles_slashes() {
        assert_eq!(join_url("http://h:1/", "/a"), "http://h:1/a");
        assert_eq!(join_url("http://h:1", "a"), "http://h:1/a");
    }

    #[test]
    fn default_config_serializes() {
        let text = toml::to_string_pretty(&ClientConfig::default()).unwrap();
        assert_eq!(parse(&text).unwrap(), ClientConfig::default());
    }
}
