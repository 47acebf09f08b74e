//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use autodoc_ops::{Config, CONFIG_KEYS};

use super::Output;

/// Show current configuration.
pub fn show(config: &Config, output: Output) -> Result<()> {
    if output.emit_json(&redacted(config))? {
        return Ok(());
    }

    println!("Autodoc Configuration");
    println!("{:-<40}", "");
    for key in CONFIG_KEYS {
        println!(
            "{:<20} {}",
            format!("{key}:"),
            config.get(key).unwrap_or_default()
        );
    }

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    if !config.resolver.api_key.is_empty() {
        config.resolver.api_key = "***".to_string();
    }
    config
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save()?;

    if key == "api-key" {
        println!("✅ Set api-key");
        println!("⚠️  Key stored in config file. For better security, use AUTODOC_API_KEY env var.");
    } else {
        println!("Set {} to: {}", key, value);
    }
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            CONFIG_KEYS.join(", ")
        ),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
