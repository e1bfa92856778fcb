//! Configuration loading and types for sitewright.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Layering file, environment and `OPENAI_*` values (`load`)

mod load;
mod types;

use std::path::PathBuf;

pub use load::DEFAULT_CONFIG_FILE;
pub use types::{LlmConfig, PreviewConfig, Settings};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(PathBuf),

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error(
        "OPENAI_API_KEY is not set. Set it in your .env file, the environment, or 'llm.api_key' in sitewright.yaml"
    )]
    MissingApiKey,

    #[error("{0}")]
    Validation(String),
}

// =============================================================================
// Validation
// =============================================================================

impl Settings {
    /// Check the settings needed to talk to the completion service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.llm.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => return Err(ConfigError::MissingApiKey),
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "invalid config: 'llm.model' must not be empty".to_string(),
            ));
        }

        self.validate_preview()
    }

    /// Check the preview server settings.
    pub fn validate_preview(&self) -> Result<(), ConfigError> {
        if self.preview.port > self.preview.max_port {
            return Err(ConfigError::Validation(format!(
                "invalid config: 'preview.port' ({}) is greater than 'preview.max_port' ({})",
                self.preview.port, self.preview.max_port
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_api_key() {
        let settings = Settings::default();
        assert!(matches!(settings.validate(), Err(ConfigError::MissingApiKey)));

        let mut settings = Settings::default();
        settings.llm.api_key = Some("   ".to_string());
        assert!(matches!(settings.validate(), Err(ConfigError::MissingApiKey)));

        settings.llm.api_key = Some("sk-test".to_string());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_preview_ports() {
        let mut settings = Settings::default();
        settings.llm.api_key = Some("sk-test".to_string());
        settings.preview.port = 9500;

        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("preview.port"));
    }
}
