//! Battle configuration
//!
//! Runtime settings for driving engagements. Formula constants live in
//! `combat::constants`; this holds what a caller may want to change per run.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::battle::direction::RelativeDirection;
use crate::core::error::{CombatError, Result};

/// Configuration for running battle links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds a link may run before `resolve` gives up
    pub max_rounds: u32,

    /// Side of the defender struck when the caller doesn't say
    pub default_direction: RelativeDirection,

    /// Extra unit templates merged over the stock catalog
    pub templates_path: Option<PathBuf>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: 500,
            default_direction: RelativeDirection::Front,
            templates_path: None,
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a TOML file; missing keys take defaults
    pub fn load_from_toml(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: BattleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(CombatError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// === GLOBAL CONFIG ACCESS ===

static CONFIG: OnceLock<BattleConfig> = OnceLock::new();

/// Get the global battle config (initializes with defaults if not set)
pub fn config() -> &'static BattleConfig {
    CONFIG.get_or_init(BattleConfig::default)
}

/// Set the global battle config (can only be called once)
///
/// Returns Err if config was already set.
pub fn set_config(config: BattleConfig) -> std::result::Result<(), BattleConfig> {
    CONFIG.set(config)
}
