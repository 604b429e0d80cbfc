//! Configuration management for the Hopfield CLI.

use anyhow::{Context, Result};
use hopfield_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the current or parent directories.
pub const CONFIG_FILE: &str = "hopfield.toml";

/// Hopfield CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub recovery: RecoverySettings,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoverySettings {
    /// Sweep cap for recovery; 0 disables the cap.
    #[serde(default = "default_max_sweeps")]
    pub max_sweeps: usize,
    /// Fixed seed for the update order. Unset draws from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_high")]
    pub high: char,
    #[serde(default = "default_low")]
    pub low: char,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

// Default value functions
fn default_width() -> usize { 5 }
fn default_height() -> usize { 5 }
fn default_max_sweeps() -> usize { DEFAULT_MAX_SWEEPS }
fn default_high() -> char { '#' }
fn default_low() -> char { '.' }
fn default_level() -> String { "warn".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for RecoverySettings {
    fn default() -> Self {
        Self {
            max_sweeps: default_max_sweeps(),
            seed: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            high: default_high(),
            low: default_low(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub max_sweeps: Option<usize>,
}

impl Config {
    /// Load config from hopfield.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Grid layout after applying overrides.
    pub fn layout(&self, overrides: &Overrides) -> Result<GridLayout> {
        let width = overrides.width.unwrap_or(self.grid.width);
        let height = overrides.height.unwrap_or(self.grid.height);
        GridLayout::new(width, height).context("Invalid grid dimensions")
    }

    /// Recovery settings after applying overrides.
    pub fn recovery(&self, overrides: &Overrides) -> RecoveryConfig {
        match overrides.max_sweeps.unwrap_or(self.recovery.max_sweeps) {
            0 => RecoveryConfig::unbounded(),
            n => RecoveryConfig::with_max_sweeps(n),
        }
    }

    pub fn seed(&self, overrides: &Overrides) -> Option<u64> {
        overrides.seed.or(self.recovery.seed)
    }

    /// A fresh, initialised network sized for `node_count`.
    pub fn build_network(&self, node_count: usize, overrides: &Overrides) -> HopfieldNetwork {
        let network = match self.seed(overrides) {
            Some(seed) => HopfieldNetwork::with_seed(node_count, seed),
            None => HopfieldNetwork::new(node_count),
        };
        let mut network = network.with_recovery(self.recovery(overrides));
        network.initialise_nodes();
        network
    }

    pub fn glyphs(&self) -> Glyphs {
        Glyphs {
            high: self.display.high,
            low: self.display.low,
        }
    }
}

/// Find hopfield.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    find_config_file_from(&std::env::current_dir().ok()?)
}

fn find_config_file_from(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
