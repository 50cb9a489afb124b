use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_INPUT_LIST: &str = "input.list";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    host_url: String,
    pub username: String,
    pub password: String,
    /// Page opened during breaks, relative to the host or absolute
    #[serde(default)]
    break_url: Option<String>,
    /// The playlist to work through
    #[serde(default)]
    input_list: Option<String>,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .wrap_err(format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .wrap_err(format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse and validate config from a TOML string
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let host = self.host_url()?;
        if !matches!(host.scheme(), "http" | "https") {
            bail!("host_url must be an http(s) URL, got '{}'", self.host_url);
        }
        if self.username.trim().is_empty() {
            bail!("username must not be empty");
        }
        Ok(())
    }

    /// Parsed songbook host URL
    pub fn host_url(&self) -> Result<Url> {
        Url::parse(&self.host_url).wrap_err(format!("Invalid host_url: {}", self.host_url))
    }

    pub fn break_url(&self) -> Option<&str> {
        self.break_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get expanded input list path
    pub fn input_list_path(&self) -> PathBuf {
        self.expand_path(self.input_list.as_deref().unwrap_or(DEFAULT_INPUT_LIST))
    }
}
