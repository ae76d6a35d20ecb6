//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::validator::ConfigValidator;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chrome: ChromeConfig,

    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub feeds: FeedsConfig,

    #[serde(default)]
    pub lock: LockConfig,

    #[serde(default)]
    pub processor: ProcessorConfig,
}

impl Config {
    /// Validate and return the configuration, failing on the first load of a
    /// bad value instead of clamping it.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let result = ConfigValidator::validate(&self);
        if result.is_valid() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(result.errors))
        }
    }
}

/// Remote browser (DevTools) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChromeConfig {
    #[serde(default = "default_chrome_host")]
    pub host: String,

    #[serde(default = "default_chrome_port")]
    pub port: u16,

    /// Pause after the load event so client-side scripts can finish.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_secs: u64,

    /// Deadline for any single control-channel message.
    #[serde(default = "default_message_timeout")]
    pub message_timeout_secs: u64,

    /// Deadline for one whole fetch attempt.
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout_secs: u64,

    /// Total attempts, including the first.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay")]
    pub retry_delay_secs: u64,
}

impl ChromeConfig {
    /// Base URL of the DevTools HTTP API.
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    pub fn message_timeout(&self) -> Duration {
        Duration::from_secs(self.message_timeout_secs)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_secs(self.retry_delay_secs)
    }
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            host: default_chrome_host(),
            port: default_chrome_port(),
            settle_delay_secs: default_settle_delay(),
            message_timeout_secs: default_message_timeout(),
            attempt_timeout_secs: default_attempt_timeout(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay(),
        }
    }
}

fn default_chrome_host() -> String {
    "localhost".to_string()
}

fn default_chrome_port() -> u16 {
    9222
}

fn default_settle_delay() -> u64 {
    10
}

fn default_message_timeout() -> u64 {
    60
}

fn default_attempt_timeout() -> u64 {
    180
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    2
}

/// Language-model service configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub url: String,

    #[serde(default = "default_ollama_model")]
    pub model: String,

    /// Free-form model options forwarded verbatim.
    #[serde(default)]
    pub options: serde_json::Map<String, serde_json::Value>,

    #[serde(default = "default_ollama_timeout")]
    pub timeout_secs: u64,

    /// Character budget for the composed prompt.
    #[serde(default = "default_prompt_length_limit")]
    pub prompt_length_limit: usize,

    /// Model context window in tokens.
    #[serde(default = "default_context_length")]
    pub context_length: u32,

    #[serde(default = "default_prompt_template")]
    pub prompt_template: String,
}

impl OllamaConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            url: default_ollama_url(),
            model: default_ollama_model(),
            options: serde_json::Map::new(),
            timeout_secs: default_ollama_timeout(),
            prompt_length_limit: default_prompt_length_limit(),
            context_length: default_context_length(),
            prompt_template: default_prompt_template(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

fn default_ollama_timeout() -> u64 {
    600
}

fn default_prompt_length_limit() -> usize {
    8192
}

fn default_context_length() -> u32 {
    4096
}

/// Template the fetched article text is appended to.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Based on the following article content, please provide:
1. A concise summary (around 150 words)
2. 5 relevant tags (single words or short phrases)

Article content:";

fn default_prompt_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

/// Feed admission configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Feed ids whose entries are enriched on admission.
    #[serde(default)]
    pub selected: Vec<i64>,
}

impl FeedsConfig {
    /// Whether a feed id is in the admission allowlist.
    pub fn is_selected(&self, feed_id: i64) -> bool {
        self.selected.contains(&feed_id)
    }
}

/// Process lock configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockConfig {
    #[serde(default = "default_lock_path")]
    pub path: PathBuf,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            path: default_lock_path(),
        }
    }
}

fn default_lock_path() -> PathBuf {
    std::env::temp_dir().join("ollama-summarizer.lock")
}

/// Entry processor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Selector used when the feed has no override.
    #[serde(default = "default_selector")]
    pub default_selector: String,

    /// Store fetched text and model output in the `ai-debug` attribute.
    #[serde(default)]
    pub debug_attributes: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            default_selector: default_selector(),
            debug_attributes: false,
        }
    }
}

fn default_selector() -> String {
    "article".to_string()
}

/// Directory for logs and the default config file.
pub fn summarizer_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".ollama-summarizer"))
        .unwrap_or_else(|| PathBuf::from(".ollama-summarizer"))
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
