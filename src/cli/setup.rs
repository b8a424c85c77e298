use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::Path;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");
const API_KEY_PLACEHOLDER: &str = "your-access-key";

/// Example config text, with the access key filled in when one is given.
fn render_config(api_key: Option<&str>) -> Result<String> {
    match api_key {
        None => Ok(EXAMPLE_CONFIG.to_string()),
        Some("") => bail!("API access key must not be empty"),
        Some(key) => {
            // Serialize through YAML so quotes and other special characters survive
            let quoted = serde_yaml::to_string(key).context("Failed to encode API key")?;
            Ok(EXAMPLE_CONFIG.replace(
                &format!("\"{API_KEY_PLACEHOLDER}\""),
                quoted.trim_end(),
            ))
        }
    }
}

/// Writes the example configuration to the default config location.
pub fn setup(api_key: Option<&str>) -> Result<()> {
    setup_at_path(AppConfig::default_config_path()?, api_key)
}

/// Writes the example configuration to `path`, never replacing an existing file.
pub fn setup_at_path<P: AsRef<Path>>(path: P, api_key: Option<&str>) -> Result<()> {
    let path = path.as_ref();
    let contents = render_config(api_key)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            bail!("Configuration file already exists at {}", path.display())
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to create config file {}", path.display()));
        }
    };
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!(with_key = api_key.is_some(), "Created configuration at {}", path.display());
    println!("Created configuration at {}", path.display());
    if api_key.is_none() {
        println!("Set `api_key` in it before running `fxrates refresh`");
    }
    Ok(())
}
