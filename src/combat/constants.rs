//! Combat formula constants - all tunable values in one place

// Casualties
/// Scales attack/defense ratio into expected casualties per round
pub const KILLING_POWER_RATIO: f64 = 8.0;

// Attack penalties (fraction of attack lost at an empty bar)
pub const STAMINA_ATTACK_PENALTY: f64 = 0.50;
pub const MORALE_ATTACK_PENALTY: f64 = 0.40;

// Armor wear: fraction of piercing that strips armor/shield per round
pub const ARMOR_DAMAGE_RATIO: f64 = 0.25;

// Shields count this many times over against missiles
pub const RANGED_SHIELD_MULTIPLIER: f64 = 3.0;

// Ranged defenders only bring half their melee defense
pub const RANGED_DEFENSE_RATIO: f64 = 0.5;

// Morale loss scales
pub const COMBAT_MORALE_LOSS_SCALE: f64 = 5.0;
pub const RANGED_MORALE_LOSS_SCALE: f64 = 50.0;
pub const STAMINA_MORALE_LOSS_SCALE: f64 = 5.0;
