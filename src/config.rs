use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub handoff: HandoffConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// How many documents `dsh docs` shows by default.
    #[serde(default = "default_latest_count")]
    pub latest_count: usize,
    /// Summaries at or below this many characters are treated as absent
    /// and replaced with the "not yet summarized" placeholder.
    #[serde(default = "default_summary_min_chars")]
    pub summary_min_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            latest_count: default_latest_count(),
            summary_min_chars: default_summary_min_chars(),
        }
    }
}

fn default_latest_count() -> usize {
    5
}
fn default_summary_min_chars() -> usize {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct HandoffConfig {
    /// File holding at most one pending chat query, cleared on consumption.
    #[serde(default = "default_handoff_path")]
    pub path: PathBuf,
}

impl Default for HandoffConfig {
    fn default() -> Self {
        Self {
            path: default_handoff_path(),
        }
    }
}

fn default_handoff_path() -> PathBuf {
    PathBuf::from("./.docshelf/pending-query")
}

impl Config {
    /// Built-in defaults for running without a config file.
    pub fn minimal() -> Self {
        Self {
            backend: BackendConfig::default(),
            ui: UiConfig::default(),
            handoff: HandoffConfig::default(),
        }
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate backend
    if !config.backend.base_url.starts_with("http://")
        && !config.backend.base_url.starts_with("https://")
    {
        anyhow::bail!(
            "backend.base_url must start with http:// or https://, got '{}'",
            config.backend.base_url
        );
    }

    if config.backend.timeout_secs == 0 {
        anyhow::bail!("backend.timeout_secs must be > 0");
    }

    // Validate UI
    if config.ui.latest_count < 1 {
        anyhow::bail!("ui.latest_count must be >= 1");
    }

    Ok(config)
}
