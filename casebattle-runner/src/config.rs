//! Serializable battle configuration (TOML).

use casebattle_core::{BattleMode, PlayerConfig, SelectionRequest};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Everything needed to reproduce a battle spin.
///
/// A fixed `seed` makes repeated spins with the same catalog identical;
/// without one every spin draws fresh entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Catalog file (`.json` or `.csv`).
    pub catalog: PathBuf,

    pub seed: Option<u64>,

    pub request: SelectionRequest,

    pub mode: ModeConfig,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("cases.json"),
            seed: None,
            request: SelectionRequest::new(500.0, 5),
            mode: ModeConfig::default(),
        }
    }
}

/// How the player configuration is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeConfig {
    /// Draw the player configuration at random; `player_config` is ignored.
    pub randomize: bool,
    pub player_config: PlayerConfig,
}

impl ModeConfig {
    pub fn battle_mode(&self) -> BattleMode {
        if self.randomize {
            BattleMode::Random
        } else {
            BattleMode::Fixed(self.player_config)
        }
    }
}

impl BattleConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize the config to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
