use std::path::Path;

use crate::error::ConfigError;
use crate::game::Player;

/// Depth used when nothing else is configured.
pub const DEFAULT_DEPTH: usize = 4;

/// Hard cap on nodes dequeued by the breadth-first estimator.
pub const DEFAULT_NODE_CAP: usize = 1000;

/// Deepest search accepted from configuration.
pub const MAX_DEPTH: usize = 12;

/// Search engine parameters.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched by minimax; also the expansion limit of the
    /// breadth-first estimator.
    pub max_depth: usize,
    /// Maximum nodes the breadth-first estimator dequeues.
    pub node_cap: usize,
    /// Cut off branches once `beta <= alpha`. Disabling it only changes the
    /// number of nodes visited, never the chosen column.
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_DEPTH,
            node_cap: DEFAULT_NODE_CAP,
            alpha_beta: true,
        }
    }
}

/// Match settings for the interactive front ends.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side played by the engine. Red always moves first.
    pub engine_player: Player,
    pub engine_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            engine_player: Player::Yellow,
            engine_enabled: true,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub game: GameConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_DEPTH).contains(&self.search.max_depth) {
            return Err(ConfigError::Validation(format!(
                "search.max_depth must be in 1..={MAX_DEPTH}, got {}",
                self.search.max_depth
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
