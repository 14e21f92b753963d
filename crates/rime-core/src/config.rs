//! RimeConfig - `rime.toml` から読み込む設定
//!
//! ファイルに無い項目はデフォルト値を使います。
//! `RIME_*` 環境変数はファイルより優先されます。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::queue::QueuePolicy;

pub const CONFIG_FILE: &str = "rime.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value:?}")]
    InvalidOverride { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RimeConfig {
    /// Worker pool size. Zero is treated as one.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Queued-but-not-started jobs allowed before submissions get `Busy`.
    /// Unset means unbounded; zero is treated as one.
    #[serde(default)]
    pub queue_capacity: Option<usize>,

    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    #[serde(default)]
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Listing lives at `{base_url}/works`, details at `{base_url}/works/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_workers() -> usize {
    4
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("static/poems.json")
}

fn default_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080/api".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for RimeConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
            queue_capacity: None,
            catalog_path: default_catalog_path(),
            remote: RemoteConfig::default(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RimeConfig {
    /// `rime.toml` in the working directory plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Like [`load`](Self::load) with an explicit file. A missing file means
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml_str(&contents)?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `RIME_*` overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(value) = get("RIME_MAX_WORKERS") {
            self.max_workers = parse_count("RIME_MAX_WORKERS", &value)?;
        }
        if let Some(value) = get("RIME_QUEUE_CAPACITY") {
            self.queue_capacity = Some(parse_count("RIME_QUEUE_CAPACITY", &value)?);
        }
        if let Some(value) = get("RIME_CATALOG_PATH") {
            self.catalog_path = PathBuf::from(value);
        }
        if let Some(value) = get("RIME_REMOTE_BASE_URL") {
            self.remote.base_url = value;
        }
        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        if self.max_workers == 0 {
            warn!("max_workers = 0 is not usable; running with 1 worker");
            return 1;
        }
        self.max_workers
    }

    pub fn queue_policy(&self) -> QueuePolicy {
        QueuePolicy::from_capacity(self.queue_capacity)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.timeout_secs)
    }
}

fn parse_count(key: &str, value: &str) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidOverride {
            key: key.to_string(),
            value: value.to_string(),
        })
}
