use std::path::Path;

use crate::{config::Settings, util::mask_secret};

pub fn run(config_file: Option<&Path>) -> Result<(), anyhow::Error> {
    let settings = Settings::load(config_file)?;

    let api_key = match settings.llm.api_key.as_deref() {
        Some(key) if !key.trim().is_empty() => mask_secret(key),
        _ => "not set".to_string(),
    };

    println!("Model:      {}", settings.llm.model);
    println!("Base URL:   {}", settings.llm.base_url);
    println!("API key:    {api_key}");
    println!("Timeout:    {}s", settings.llm.timeout_secs);
    if let Some(max_tokens) = settings.llm.max_tokens {
        println!("Max tokens: {max_tokens}");
    }
    println!("Output:     {}", settings.output.display());
    println!(
        "Preview:    {}:{} (up to port {})",
        settings.preview.bind, settings.preview.port, settings.preview.max_port
    );

    Ok(())
}
