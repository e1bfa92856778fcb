//! Configuration loading from files and the environment.
//!
//! Layers, later wins: serde defaults, `sitewright.yaml`, `SITEWRIGHT__*`
//! variables, then the `OPENAI_*` variables.

use std::path::{Path, PathBuf};

use super::{ConfigError, Settings};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "sitewright.yaml";

const ENV_PREFIX: &str = "SITEWRIGHT";
const ENV_SEPARATOR: &str = "__";

impl Settings {
    /// Load the settings from the command line argument, defaulting to `sitewright.yaml`.
    ///
    /// The file is optional; a missing file yields the defaults plus the environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        let config_file = if config_file.is_relative() {
            std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file)
        } else {
            config_file.to_path_buf()
        };

        Self::load_with_env(&config_file, std::env::vars().collect())
    }

    /// Load the settings from a file path and an explicit set of environment variables.
    pub(crate) fn load_with_env(
        path: &Path,
        env: config::Map<String, String>,
    ) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let openai = |name: &str| env.get(name).filter(|value| !value.is_empty()).cloned();
        let api_key = openai("OPENAI_API_KEY");
        let model = openai("OPENAI_MODEL");
        let base_url = openai("OPENAI_BASE_URL");

        let mut settings = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .source(Some(env)),
            )
            .set_override_option("llm.api_key", api_key)?
            .set_override_option("llm.model", model)?
            .set_override_option("llm.base_url", base_url)?
            .build()?
            .try_deserialize::<Settings>()?;

        // Relative output directories are relative to the config file, not the CWD
        if settings.output.is_relative() {
            settings.output = base_path_from_config(path).join(&settings.output);
        }

        Ok(settings)
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
