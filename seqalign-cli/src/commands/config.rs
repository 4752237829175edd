//! Config command implementation - print or write an example configuration

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::Config;

pub fn execute(out: Option<PathBuf>) -> Result<()> {
    let example = Config::example_toml()?;
    match out {
        Some(path) => {
            std::fs::write(&path, example)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Example configuration written to: {}", path.display());
        }
        None => print!("{}", example),
    }
    Ok(())
}
