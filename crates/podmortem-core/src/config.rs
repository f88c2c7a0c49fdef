//! Configuration types for podmortem.
//!
//! [`Config::load`] reads `~/.config/podmortem/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::load_from`] reads an
//! explicit file on top of the defaults. [`Config::defaults`] returns the same
//! defaults without touching the filesystem (useful in tests).

use crate::types::Severity;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[llm]
endpoint         = "https://api.openai.com/v1/chat/completions"
model            = "gpt-4o-mini"
temperature      = 0.2
api_key_env      = "OPENAI_API_KEY"
timeout_secs     = 60
max_retries      = 1
retry_backoff_ms = 500
max_log_chars    = 20000

[input]
sample_path = "data/sample_logs/k8s_sample.log"

[report]
output_dir = "."

[heuristics]
builtin = true

# Extra rules are appended after the built-in table:
#
# [[heuristics.rules]]
# pattern  = "Evicted"
# hint     = "Pod evicted (node pressure)."
# severity = "warning"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub heuristics: HeuristicsConfig,
}

/// `[llm]` section: the chat-completion endpoint used for reports.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    /// Log text forwarded to the model is cut to this many characters.
    #[serde(default = "default_max_log_chars")]
    pub max_log_chars: usize,
}

fn default_endpoint() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_model() -> String { "gpt-4o-mini".to_string() }
fn default_temperature() -> f32 { 0.2 }
fn default_api_key_env() -> String { "OPENAI_API_KEY".to_string() }
fn default_timeout_secs() -> u64 { 60 }
fn default_max_retries() -> u32 { 1 }
fn default_retry_backoff_ms() -> u64 { 500 }
fn default_max_log_chars() -> usize { 20_000 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            max_log_chars: default_max_log_chars(),
        }
    }
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_sample_path")]
    pub sample_path: PathBuf,
}

fn default_sample_path() -> PathBuf { PathBuf::from("data/sample_logs/k8s_sample.log") }

impl Default for InputConfig {
    fn default() -> Self {
        Self { sample_path: default_sample_path() }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf { PathBuf::from(".") }

impl Default for ReportConfig {
    fn default() -> Self {
        Self { output_dir: default_output_dir() }
    }
}

/// `[heuristics]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HeuristicsConfig {
    /// Include the built-in Kubernetes rule table.
    #[serde(default = "default_builtin")]
    pub builtin: bool,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

fn default_builtin() -> bool { true }

impl Default for HeuristicsConfig {
    fn default() -> Self {
        Self { builtin: default_builtin(), rules: Vec::new() }
    }
}

/// One `[[heuristics.rules]]` entry. A missing severity means `info`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub hint: String,
    #[serde(default)]
    pub severity: Option<Severity>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/podmortem/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit config file, layered on top of the built-in defaults.
    /// The file must exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).format(config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("podmortem")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
