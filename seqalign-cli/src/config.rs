//! Configuration handling for the SeqAlign CLI
//!
//! Supports loading configuration from seqalign.toml files with CLI argument overrides.

use anyhow::{Context, Result};
use clap::ValueEnum;
use seqalign_core::{FillStrategy, ScoringScheme};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

pub const DEFAULT_CONFIG_FILE: &str = "seqalign.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringScheme,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Matrix fill strategy ("sequential" or "anti-diagonal")
    #[serde(default)]
    pub strategy: FillStrategy,

    /// Worker threads for the anti-diagonal fill; rayon's default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Three-line alignment blocks with a summary header
    #[default]
    Text,
    /// Full report for renderers
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Add a contribution intensity line under each text block
    #[serde(default)]
    pub show_levels: bool,

    /// Columns per text block, 0 disables wrapping
    #[serde(default = "default_line_width")]
    pub line_width: usize,
}

fn default_line_width() -> usize { 60 }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_levels: false,
            line_width: default_line_width(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Self::load_from_file(path)?
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    log::info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                    Self::load_from_file(&default_path)?
                } else {
                    log::info!("Using default configuration");
                    Self::default()
                }
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Err(CliError::file_not_found(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(toml::from_str(&content)?)
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")?;
        Ok(format!(
            "# SeqAlign configuration\n\
             # [scoring] match_score, mismatch_penalty and gap_penalty are added per column.\n\
             # [engine] strategy is \"sequential\" or \"anti-diagonal\".\n\
             # [output] format is \"text\" or \"json\".\n\n{}",
            body
        ))
    }
}
