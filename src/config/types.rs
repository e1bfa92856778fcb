//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base URL of the completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model used for every stage.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

// =============================================================================
// Top-level settings
// =============================================================================

/// Everything sitewright reads from `sitewright.yaml` and the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Completion service settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Directory that project folders are created in
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Local preview server settings
    #[serde(default)]
    pub preview: PreviewConfig,
}

fn default_output() -> PathBuf {
    PathBuf::from("output")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            output: default_output(),
            preview: PreviewConfig::default(),
        }
    }
}

// =============================================================================
// Completion service
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API key; usually supplied through `OPENAI_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on generated tokens per completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
        }
    }
}

// =============================================================================
// Preview server
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// The address to bind to
    #[serde(default = "default_bind")]
    pub bind: String,
    /// First port to try
    #[serde(default = "default_port")]
    pub port: u16,
    /// Last port to try when earlier ones are taken
    #[serde(default = "default_max_port")]
    pub max_port: u16,
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_port() -> u16 {
    9000
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_port: default_max_port(),
        }
    }
}
