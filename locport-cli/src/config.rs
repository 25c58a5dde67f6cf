//! Run settings, layered from a TOML file, the environment and flags.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "locport.toml";
pub const ENDPOINT_ENV: &str = "LOCPORT_ENDPOINT";
pub const DEFAULT_BATCH_SIZE: usize = 50;
pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// The on-disk configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub batch_size: Option<usize>,
    pub retries: Option<u32>,
    pub timeout_secs: Option<u64>,
    pub retry_delay_ms: Option<u64>,
    pub languages: Option<Vec<String>>,
}

/// Values given on the command line; they win over everything else.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub batch_size: Option<usize>,
}

/// Fully resolved settings for a `translate` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: Option<String>,
    pub batch_size: usize,
    pub retries: u32,
    pub timeout: Duration,
    pub retry_delay: Duration,
    pub languages: Vec<String>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `explicit` when given (it must exist), else `./locport.toml`
    /// when present, else the empty configuration.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(FileConfig::default());
                }
                default
            }
        };

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        FileConfig::parse(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

impl Settings {
    /// Layers `file`, then the endpoint from the environment, then `overrides`.
    pub fn resolve(
        file: FileConfig,
        env_endpoint: Option<String>,
        overrides: Overrides,
    ) -> Result<Self> {
        let endpoint = overrides
            .endpoint
            .or(env_endpoint)
            .or(file.endpoint)
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let batch_size = overrides
            .batch_size
            .or(file.batch_size)
            .unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            bail!("batch_size must be at least 1");
        }

        Ok(Settings {
            endpoint,
            batch_size,
            retries: file.retries.unwrap_or(DEFAULT_RETRIES).max(1),
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            retry_delay: Duration::from_millis(
                file.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
            ),
            languages: file.languages.unwrap_or_default(),
        })
    }

    /// The endpoint, or an error explaining how to configure one.
    pub fn require_endpoint(&self) -> Result<&str> {
        match self.endpoint.as_deref() {
            Some(endpoint) => Ok(endpoint),
            None => bail!(
                "No translation endpoint configured. Set `endpoint` in {} or the {} environment variable",
                DEFAULT_CONFIG_FILE,
                ENDPOINT_ENV
            ),
        }
    }
}
