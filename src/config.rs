// Runtime configuration: environment variables plus a small key file in
// the user's home directory so the API key doesn't have to be typed on
// every run.

use anyhow::{Context, Result};
use envconfig::Envconfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

const KEY_FILE_NAME: &str = ".imgbb_key";

#[derive(Envconfig, Debug, Clone)]
pub struct Config {
    // Must stay equal to DEFAULT_ENDPOINT; the attribute only takes a literal.
    #[envconfig(from = "IMGBB_ENDPOINT", default = "https://api.imgbb.com/1/upload")]
    pub endpoint: String,

    #[envconfig(from = "IMGBB_API_KEY", default = "")]
    pub api_key: String,

    /// `0` disables the timeout.
    #[envconfig(from = "IMGBB_TIMEOUT_SECS", default = "0")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            timeout_secs: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Config::init_from_env().context("Failed to load config from environment")
    }

    pub fn timeout(&self) -> Option<Duration> {
        match self.timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// API key from the environment, if one was set.
    pub fn env_api_key(&self) -> Option<&str> {
        let key = self.api_key.trim();
        (!key.is_empty()).then_some(key)
    }
}

/// `~/.imgbb_key`, or `./.imgbb_key` when there is no home directory.
pub fn key_file_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(KEY_FILE_NAME)
}

pub fn save_api_key(key: &str) -> Result<PathBuf> {
    let path = key_file_path();
    save_api_key_to(&path, key)?;
    Ok(path)
}

pub fn load_api_key() -> Option<String> {
    load_api_key_from(&key_file_path())
}

pub fn save_api_key_to(path: &Path, key: &str) -> Result<()> {
    std::fs::write(path, key.trim())
        .with_context(|| format!("Failed to write API key to {:?}", path))
}

/// Missing, unreadable and blank files all mean "no saved key".
pub fn load_api_key_from(path: &Path) -> Option<String> {
    let data = std::fs::read_to_string(path).ok()?;
    let key = data.trim();
    (!key.is_empty()).then(|| key.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::init_from_hashmap(&HashMap::new()).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.env_api_key(), None);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn env_default_endpoint_matches_constant() {
        let from_env = Config::init_from_hashmap(&HashMap::new()).unwrap();
        assert_eq!(from_env.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(from_env.endpoint, Config::default().endpoint);
        assert_eq!(from_env.timeout_secs, Config::default().timeout_secs);
    }

    #[test]
    fn reads_values_from_environment() {
        let mut env = HashMap::new();
        env.insert("IMGBB_ENDPOINT".to_string(), "http://127.0.0.1:9/up".to_string());
        env.insert("IMGBB_API_KEY".to_string(), " secret \n".to_string());
        env.insert("IMGBB_TIMEOUT_SECS".to_string(), "15".to_string());

        let config = Config::init_from_hashmap(&env).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9/up");
        assert_eq!(config.env_api_key(), Some("secret"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let mut env = HashMap::new();
        env.insert("IMGBB_TIMEOUT_SECS".to_string(), "soon".to_string());
        assert!(Config::init_from_hashmap(&env).is_err());
    }

    #[test]
    fn key_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(KEY_FILE_NAME);

        assert_eq!(load_api_key_from(&path), None);

        save_api_key_to(&path, "  abc123\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abc123");
        assert_eq!(load_api_key_from(&path).as_deref(), Some("abc123"));
    }

    #[test]
    fn blank_key_file_counts_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(KEY_FILE_NAME);
        std::fs::write(&path, "\n  \n").unwrap();
        assert_eq!(load_api_key_from(&path), None);
    }
}
