//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::export::DEFAULT_CARDS_PATH;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Path prefix for card files referenced from canvases
    pub cards_path: Option<String>,

    /// Default output directory
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/cardport/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cardport")
            .join("config.toml")
    }

    /// Resolve the cards path prefix, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--cards-path` argument
    /// 2. Config file `cards_path` setting
    /// 3. `Cards/`
    ///
    /// An empty value at either level counts as unset.
    pub fn cards_path(&self, cli_cards_path: Option<&str>) -> String {
        cli_cards_path
            .filter(|p| !p.is_empty())
            .or_else(|| self.cards_path.as_deref().filter(|p| !p.is_empty()))
            .unwrap_or(DEFAULT_CARDS_PATH)
            .to_string()
    }

    /// Resolve the output directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--output` argument
    /// 2. Config file `output` setting
    /// 3. Current working directory
    pub fn output_dir(&self, cli_output: Option<&PathBuf>) -> PathBuf {
        cli_output
            .cloned()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
