use anyhow::{Context, Result};
use shuls_core::ClientConfig;

use super::AppContext;

pub fn show(context: &AppContext) -> Result<()> {
    let path = context.config_service.config_path()?;
    if context.json {
        println!("{}", serde_json::to_string_pretty(&context.config)?);
        return Ok(());
    }
    let exists = if path.exists() { "" } else { " (not present, using defaults)" };
    println!("# {}{}", path.display(), exists);
    print!("{}", toml::to_string_pretty(&context.config)?);
    Ok(())
}

pub fn init(context: &AppContext) -> Result<()> {
    let path = context.config_service.config_path()?;
    if path.exists() {
        println!("Config already exists at {}", path.display());
        return Ok(());
    }
    let written = context
        .config_service
        .save(&ClientConfig::default())
        .context("Failed to write default config")?;
    println!("Wrote default config to {}", written.display());
    Ok(())
}
