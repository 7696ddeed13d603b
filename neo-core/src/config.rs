use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// The upstream feed rejects windows longer than this many days.
pub const DEFAULT_MAX_SPAN_DAYS: u32 = 7;
/// Hard bound on pages fetched by one aggregation.
pub const DEFAULT_MAX_ITERATIONS: usize = 20;
pub const DEFAULT_FEED_ENDPOINT: &str = "https://api.nasa.gov/neo/rest/v1/feed";
pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const API_KEY_ENV: &str = "NEOWS_API_KEY";

const APP_DIR: &str = "neowatch";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub api_key: String,
    pub max_span_days: u32,
    pub max_iterations: usize,
    /// Unset leaves timeouts to the HTTP transport.
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    File,
    Memory,
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub kind: StoreKind,
    /// Defaults to `tracked.json` next to the config file.
    pub tracked_file: Option<PathBuf>,
    pub rest_url: Option<String>,
    pub rest_table: Option<String>,
    pub rest_key: Option<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FEED_ENDPOINT.to_owned(),
            api_key: DEFAULT_API_KEY.to_owned(),
            max_span_days: DEFAULT_MAX_SPAN_DAYS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            request_timeout_seconds: None,
        }
    }
}

impl FeedConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    /// Days added to a window start to reach the last day of one request.
    pub(crate) fn span_offset_days(&self) -> i64 {
        i64::from(self.max_span_days.max(1)) - 1
    }
}

impl FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(Self::File),
            "memory" | "mem" => Ok(Self::Memory),
            "rest" | "hosted" => Ok(Self::Rest),
            other => Err(format!("unknown store kind: {other}")),
        }
    }
}

impl AppConfig {
    /// `<config dir>/neowatch`, falling back to the working directory.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default()
            .join(APP_DIR)
    }

    pub fn config_file_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Loads the user config, or defaults when it is missing or unreadable.
    /// `NEOWS_API_KEY` always wins over the file's key.
    pub fn load() -> Self {
        let path = Self::config_file_path();
        let mut config = match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "could not load config, using defaults");
                let default_config = Self::default();
                if let Err(save_err) = default_config.save_to(&path) {
                    warn!(error = %save_err, "could not write default config");
                }
                default_config
            }
        };
        config.apply_env();
        config
    }

    pub fn load_from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.feed.api_key = key.trim().to_owned();
            }
        }
    }

    pub fn tracked_file(&self) -> PathBuf {
        self.storage
            .tracked_file
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("tracked.json"))
    }
}
