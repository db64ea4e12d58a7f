//! Client configuration.
//!
//! Values come from an optional JSON file and are then overridden by
//! `CARDSYNC_*` environment variables. Credentials are never stored here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

pub const DEFAULT_API_BASE_URL: &str = "https://sharemycard.app/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_BASE_URL: &str = "CARDSYNC_API_BASE_URL";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "CARDSYNC_HTTP_TIMEOUT_SECS";
pub const ENV_PURGE_MISSING: &str = "CARDSYNC_PURGE_MISSING";
pub const ENV_DB_PATH: &str = "CARDSYNC_DB_PATH";

const APP_DIR: &str = "cardsync";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Delete cached rows the server no longer lists
    pub purge_missing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: format!("cardsync/{}", env!("CARGO_PKG_VERSION")),
            purge_missing: true,
        }
    }
}

impl ClientConfig {
    /// `cardsync/config.json` under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
    }

    /// Load from the default file location and the process environment.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path().as_deref(), |key| std::env::var(key).ok())
    }

    /// Load from `path` (skipped when absent) and apply overrides from `env`.
    pub fn load_from(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => Self::read_file(path)?,
            _ => Self::default(),
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("invalid config file {}: {e}", path.display())))
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let lookup = |key: &str| normalize_text_option(env(key));

        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(ENV_HTTP_TIMEOUT_SECS) {
            self.timeout_secs = raw.parse().map_err(|_| {
                Error::Config(format!("{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds"))
            })?;
        }
        if let Some(raw) = lookup(ENV_PURGE_MISSING) {
            self.purge_missing = parse_switch(&raw).ok_or_else(|| {
                Error::Config(format!("{ENV_PURGE_MISSING} must be true or false"))
            })?;
        }
        Ok(())
    }

    /// Check values and normalize the base URL in place.
    pub fn validate(&mut self) -> Result<()> {
        let url = normalize_text_option(Some(self.api_base_url.clone()))
            .ok_or_else(|| Error::Config("api_base_url must not be empty".to_string()))?;
        if !is_http_url(&url) {
            return Err(Error::Config(
                "api_base_url must include http:// or https://".to_string(),
            ));
        }
        self.api_base_url = url.trim_end_matches('/').to_string();

        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than zero".to_string()));
        }
        Ok(())
    }
}

/// `cardsync/cardsync.db` under the platform data directory.
pub fn default_db_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("cardsync.db"))
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_production_api() {
        let config = ClientConfig::load_from(None, env_from(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.purge_missing);
        assert!(config.user_agent.starts_with("cardsync/"));
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "api_base_url": "https://staging.example.test/api/", "timeout_secs": 5 }"#,
        )
        .unwrap();

        let config = ClientConfig::load_from(
            Some(&path),
            env_from(&[(ENV_HTTP_TIMEOUT_SECS, "12"), (ENV_PURGE_MISSING, "off")]),
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://staging.example.test/api");
        assert_eq!(config.timeout_secs, 12);
        assert!(!config.purge_missing);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let tmp = tempdir().unwrap();
        let config =
            ClientConfig::load_from(Some(&tmp.path().join("absent.json")), env_from(&[]))
                .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(ClientConfig::load_from(None, env_from(&[(ENV_API_BASE_URL, "ftp://x")])).is_err());
        assert!(
            ClientConfig::load_from(None, env_from(&[(ENV_HTTP_TIMEOUT_SECS, "soon")])).is_err()
        );
        assert!(ClientConfig::load_from(None, env_from(&[(ENV_HTTP_TIMEOUT_SECS, "0")])).is_err());
        assert!(ClientConfig::load_from(None, env_from(&[(ENV_PURGE_MISSING, "maybe")])).is_err());
    }

    #[test]
    fn rejects_unknown_file_fields() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{ "api_token": "do-not-store-me" }"#).unwrap();

        let error = ClientConfig::load_from(Some(&path), env_from(&[])).unwrap_err();
        assert!(matches!(error, Error::Config(_)));
    }
}
