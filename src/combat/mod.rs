pub mod constants;
pub mod fight;
pub mod formulas;
pub mod report;

pub use fight::{ranged_profile, resolve_melee, resolve_ranged};
pub use report::{CombatReport, UnitCombatReport};
