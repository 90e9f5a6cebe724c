//! # Client Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_API_URL=https://shop.example.com                        │
//! │     STOREFRONT_DATA_DIR=/var/lib/storefront                            │
//! │     STOREFRONT_TIMEOUT_SECS=10                                         │
//! │     STOREFRONT_CURRENCY=EGP                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/config.toml (Linux)                           │
//! │     ~/Library/Application Support/com.storefront.storefront/config.toml│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8080, 30s timeout, "LE"                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:8080"
//! timeout_secs = 30
//! csrf_cookie = "XSRF-TOKEN"
//! csrf_header = "X-XSRF-TOKEN"
//! csrf_exempt_paths = ["/api/v1/auth/login"]
//!
//! [storage]
//! data_dir = "/home/mona/.local/share/storefront"
//!
//! [display]
//! currency = "LE"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ConfigError;

// =============================================================================
// API Settings
// =============================================================================

/// How to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Origin of the backend. Request paths are absolute (`/api/v1/...`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout. The core never retries; this is the only
    /// timeout policy.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Cookie the backend puts its CSRF token in.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,

    /// Header the token is echoed back in on state-changing requests.
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    /// Paths that never carry the CSRF header.
    #[serde(default = "default_csrf_exempt_paths")]
    pub csrf_exempt_paths: Vec<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_csrf_cookie() -> String {
    "XSRF-TOKEN".to_string()
}

fn default_csrf_header() -> String {
    "X-XSRF-TOKEN".to_string()
}

fn default_csrf_exempt_paths() -> Vec<String> {
    vec!["/api/v1/auth/login".to_string()]
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            csrf_exempt_paths: default_csrf_exempt_paths(),
        }
    }
}

// =============================================================================
// Storage & Display Settings
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Where the cart file lives. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Label printed after amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "LE".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(write_err)?;

        info!(?path, "Config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            ConfigError::Invalid(format!("base_url {:?}: {}", self.api.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.api.csrf_cookie.is_empty() || self.api.csrf_header.is_empty() {
            return Err(ConfigError::Invalid(
                "csrf_cookie and csrf_header must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("STOREFRONT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(dir) = lookup("STOREFRONT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data dir from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(timeout) = lookup("STOREFRONT_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric STOREFRONT_TIMEOUT_SECS"),
            }
        }

        if let Some(currency) = lookup("STOREFRONT_CURRENCY") {
            self.display.currency = currency;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = StorefrontConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.csrf_exempt_paths, vec!["/api/v1/auth/login"]);
        assert_eq!(config.display.currency, "LE");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StorefrontConfig::default();

        config.api.base_url = "ftp://shop".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = "https://shop.example.com".to_string();
        assert!(config.validate().is_ok());

        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: StorefrontConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://shop.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.csrf_header, "X-XSRF-TOKEN");
        assert_eq!(config.display.currency, "LE");
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_API_URL", "https://shop.example.com"),
            ("STOREFRONT_DATA_DIR", "/tmp/storefront"),
            ("STOREFRONT_TIMEOUT_SECS", "5"),
            ("STOREFRONT_CURRENCY", "EGP"),
        ]);

        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://shop.example.com");
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/storefront")));
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.display.currency, "EGP");
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_overrides(|key| (key == "STOREFRONT_TIMEOUT_SECS").then(|| "soon".to_string()));
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = StorefrontConfig::default();
        config.display.currency = "EGP".to_string();
        config.save(Some(path.clone())).unwrap();

        let reloaded = StorefrontConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }
}
