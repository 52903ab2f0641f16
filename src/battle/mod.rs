//! Engagements between two units
//!
//! A `BattleLink` drives one attacker/defender pair round by round until
//! one side dies or routs.

pub mod direction;
pub mod link;

pub use direction::{Direction, RelativeDirection};
pub use link::{BattleLink, BattleMode, BattleSummary, Defeat, LinkOutcome, Side};
