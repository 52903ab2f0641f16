pub mod config;
pub mod error;

pub use config::{config, set_config, BattleConfig};
pub use error::{CombatError, Result};
