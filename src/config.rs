//! Service configuration, loaded from TOML.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;

pub const DEFAULT_API_URL: &str = "https://api.os.uk/search/names/v1/find";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3001";

/// Longest input still treated as a partial postcode.
pub const DEFAULT_MAX_POSTCODE_LENGTH: usize = 3;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub gazetteer: GazetteerConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
    /// Origin allowed to call the service from a browser
    pub allow_origin_url: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GazetteerConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub proxy_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_postcode_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            allow_origin_url: "*".to_string(),
        }
    }
}

impl Default for GazetteerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            proxy_url: None,
            timeout_secs: None,
            max_postcode_length: DEFAULT_MAX_POSTCODE_LENGTH,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen, DEFAULT_LISTEN);
        assert_eq!(config.gazetteer.api_url, DEFAULT_API_URL);
        assert_eq!(config.gazetteer.max_postcode_length, 3);
        assert!(config.gazetteer.api_key.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
allow_origin_url = "https://check-air-quality.example"

[gazetteer]
api_key = "abc123"
proxy_url = "http://proxy.internal:3128"
max_postcode_length = 4
"#
        )
        .unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(
            config.server.allow_origin_url,
            "https://check-air-quality.example"
        );
        assert_eq!(config.server.listen, DEFAULT_LISTEN);
        assert_eq!(config.gazetteer.api_key.as_deref(), Some("abc123"));
        assert_eq!(
            config.gazetteer.proxy_url.as_deref(),
            Some("http://proxy.internal:3128")
        );
        assert_eq!(config.gazetteer.max_postcode_length, 4);
        assert_eq!(config.gazetteer.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(crate::error::ConfigError::Read(_))));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gazetteer\napi_key = ").unwrap();
        let result = Config::load_from_file(file.path());
        assert!(matches!(result, Err(crate::error::ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = Config::load_or_default(None::<&str>).unwrap();
        assert_eq!(config.gazetteer.max_postcode_length, 3);
    }
}
