//! User configuration, loaded once at startup.
//!
//! The file is JSON and every field is optional:
//!
//! ```json
//! {
//!   "default_provider": "zulu",
//!   "install_root": "/opt/jdks",
//!   "custom": {
//!     "endpoint": "https://artifacts.example.com/jdk/releases.json",
//!     "token": "s3cr3t"
//!   }
//! }
//! ```
//!
//! Lookup order for the file: `$JDKUP_CONFIG`, `$XDG_CONFIG_HOME/jdkup/config.json`,
//! `~/.config/jdkup/config.json`. A missing file means defaults.
//! `JDKUP_HOME` overrides the default install root and `JDKUP_CUSTOM_TOKEN`
//! overrides the custom catalog token.

use crate::catalog::Provider;
use crate::error::{JdkupError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Endpoint and credential of the user-configured catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomProvider {
    pub endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_provider: Provider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_root: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomProvider>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: Provider::Adoptium,
            install_root: None,
            custom: None,
        }
    }
}

impl Config {
    /// Load from the standard location, applying environment overrides.
    pub fn load() -> Result<Self> {
        let config = match config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                tracing::debug!("No config file at {}, using defaults", path.display());
                Self::default()
            }
            None => Self::default(),
        };

        Ok(config.with_token_override(std::env::var("JDKUP_CUSTOM_TOKEN").ok()))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            JdkupError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
            .map_err(|e| JdkupError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the custom catalog token when one is supplied.
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let (Some(custom), Some(token)) = (self.custom.as_mut(), token) {
            custom.token = Some(token);
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(custom) = &self.custom {
            if !custom.endpoint.starts_with("https://") {
                return Err(JdkupError::Config(format!(
                    "custom.endpoint must be an https:// URL, got '{}'",
                    custom.endpoint
                )));
            }
        }
        if self.default_provider == Provider::Custom && self.custom.is_none() {
            return Err(JdkupError::Config(
                "default_provider is 'custom' but no custom endpoint is configured".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory holding one subdirectory per installed release.
    pub fn install_root(&self) -> PathBuf {
        self.install_root
            .clone()
            .unwrap_or_else(default_install_root)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("JDKUP_CONFIG") {
        return Some(PathBuf::from(path));
    }
    if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(config_home).join("jdkup/config.json"));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config/jdkup/config.json"))
}

/// `$JDKUP_HOME`, else `~/.jdkup/versions`.
pub fn default_install_root() -> PathBuf {
    if let Some(root) = std::env::var_os("JDKUP_HOME") {
        PathBuf::from(root)
    } else if let Some(home) =
        std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))
    {
        PathBuf::from(home).join(".jdkup/versions")
    } else {
        PathBuf::from(".jdkup/versions")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_provider, Provider::Adoptium);
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_json(
            r#"{
                "default_provider": "custom",
                "install_root": "/opt/jdks",
                "custom": {"endpoint": "https://mirror.example.com/jdks.json", "token": "abc"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_provider, Provider::Custom);
        assert_eq!(config.install_root(), PathBuf::from("/opt/jdks"));
        assert_eq!(config.custom.unwrap().token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_custom_endpoint_must_be_https() {
        let err = Config::from_json(r#"{"custom": {"endpoint": "http://insecure.example.com"}}"#)
            .unwrap_err();
        assert!(matches!(err, JdkupError::Config(_)));
    }

    #[test]
    fn test_custom_default_requires_endpoint() {
        let err = Config::from_json(r#"{"default_provider": "custom"}"#).unwrap_err();
        assert!(err.to_string().contains("no custom endpoint"));
    }

    #[test]
    fn test_token_override() {
        let config = Config::from_json(r#"{"custom": {"endpoint": "https://x.example.com"}}"#)
            .unwrap()
            .with_token_override(Some("from-env".to_string()));
        assert_eq!(config.custom.unwrap().token.as_deref(), Some("from-env"));

        let config = Config::default().with_token_override(Some("ignored".to_string()));
        assert!(config.custom.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"default_provider": "zulu"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.default_provider, Provider::Zulu);

        std::fs::write(&path, "not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }
}
