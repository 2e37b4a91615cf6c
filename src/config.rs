use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::Deserialize;
use crate::core::Result;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// API base url, e.g. `https://disk.example.com`
    pub endpoint: String,
    /// Bearer credential of the signed-in user
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Config {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Config> {
        Ok(toml::from_str(config_str)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::core::TransferError;

    #[test]
    fn test_load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://localhost:5100\"").unwrap();
        writeln!(file, "token = \"secret\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert!(config.endpoint.starts_with("http"));
        assert_eq!(config.token.as_deref(), Some("secret"));
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.user_agent.is_none());
    }

    #[test]
    fn test_overrides_and_errors() {
        let config = Config::from_toml_str(
            "endpoint = \"http://localhost\"\ntimeout_secs = 5\nuser_agent = \"disk-web\"",
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.user_agent.as_deref(), Some("disk-web"));

        assert!(matches!(Config::from_toml_str("token = \"x\""), Err(TransferError::Config(_))));
        assert!(matches!(Config::load("/nonexistent/config.toml"), Err(TransferError::Io(_))));
    }
}
