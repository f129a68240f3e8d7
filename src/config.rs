use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration for gitling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// User agent presented to Smart-HTTP servers
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// HTTP timeout in seconds
    #[serde(default = "defaults::http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Identity line recorded as the commit author
    #[serde(default = "defaults::identity")]
    pub author: String,

    /// Identity line recorded as the committer
    #[serde(default = "defaults::identity")]
    pub committer: String,

    /// Branch name `init` points HEAD at
    #[serde(default = "defaults::default_branch")]
    pub default_branch: String,
}

mod defaults {
    pub(crate) fn user_agent() -> String {
        "git/gitling".to_string()
    }

    pub(crate) fn http_timeout_secs() -> u64 {
        300
    }

    pub(crate) fn identity() -> String {
        "John Doe <john@example.com> 1234567890 +0000".to_string()
    }

    pub(crate) fn default_branch() -> String {
        "main".to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: defaults::user_agent(),
            http_timeout_secs: defaults::http_timeout_secs(),
            author: defaults::identity(),
            committer: defaults::identity(),
            default_branch: defaults::default_branch(),
        }
    }
}

impl Config {
    /// Load configuration from the optional config file, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            _ => Config::default(),
        };

        if let Ok(agent) = env::var("GITLING_USER_AGENT") {
            config.user_agent = agent;
        }

        if let Ok(timeout) = env::var("GITLING_HTTP_TIMEOUT") {
            config.http_timeout_secs = timeout
                .parse()
                .context("Failed to parse GITLING_HTTP_TIMEOUT as u64")?;
        }

        if let Ok(author) = env::var("GITLING_AUTHOR") {
            config.author = author;
        }

        if let Ok(committer) = env::var("GITLING_COMMITTER") {
            config.committer = committer;
        }

        if let Ok(branch) = env::var("GITLING_DEFAULT_BRANCH") {
            config.default_branch = branch;
        }

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Get default config file path
    fn config_file_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/gitling/config.yaml"))
    }
}
