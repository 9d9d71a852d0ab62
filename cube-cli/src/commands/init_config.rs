//! Write the default configuration file.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::Config;

/// Run the init-config command.
pub async fn run(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "Config file already exists. Delete {} to regenerate it.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .context("Failed to create config directory")?;
    }

    let contents = Config::default()
        .to_toml()
        .context("Failed to render default configuration")?;
    tokio::fs::write(path, contents)
        .await
        .context("Failed to write config file")?;

    println!("Config written to {}", path.display());
    Ok(())
}
