//! Shieldwall - turn-based combat resolution between two units

pub mod battle;
pub mod combat;
pub mod core;
pub mod units;
