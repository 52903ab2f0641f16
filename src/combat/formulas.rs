//! Combat formulas
//!
//! Pure functions of two units' current state. Every unit fights with its
//! primary weapon set. Nothing here mutates a unit; `fight` applies results.

use crate::battle::direction::RelativeDirection;
use crate::combat::constants::*;
use crate::units::template::RangedProfile;
use crate::units::Unit;

/// Fraction of a bar that is empty, 0.0 when the bar has no capacity
fn fraction_missing(current: f64, max: f64) -> f64 {
    if max <= 0.0 {
        return 0.0;
    }
    1.0 - current / max
}

/// Attack lost to exhaustion: 0 when rested, 0.5 when spent
pub fn stamina_attack_reduction(unit: &Unit) -> f64 {
    fraction_missing(unit.stamina(), unit.template().max_stamina) * STAMINA_ATTACK_PENALTY
}

/// Attack lost to low morale: 0 at full morale, 0.4 at none
pub fn morale_attack_reduction(unit: &Unit) -> f64 {
    fraction_missing(unit.morale(), unit.template().max_morale) * MORALE_ATTACK_PENALTY
}

/// Melee attack power, with the charge bonus when charging
pub fn attack_power(attacker: &Unit, charging: bool) -> f64 {
    let weapon = attacker.weapon();
    let mut attack = weapon.attack;
    if charging {
        attack += weapon.charge;
    }
    attack * (1.0 - stamina_attack_reduction(attacker) - morale_attack_reduction(attacker))
}

/// Ranged attack power. Morale does not affect shooting.
pub fn ranged_attack_power(attacker: &Unit, ranged: &RangedProfile) -> f64 {
    ranged.attack * (1.0 - stamina_attack_reduction(attacker))
}

/// Whether the defender's shield covers an attack from `direction`
pub fn shield_applies(defender: &Unit, direction: RelativeDirection) -> bool {
    defender.weapon().shield && direction.is_front()
}

/// Armor value against melee; the shield only counts from the front
pub fn armor_defense(defender: &Unit, direction: RelativeDirection) -> f64 {
    let mut armor = defender.armor();
    if shield_applies(defender, direction) {
        armor += defender.shield();
    }
    armor
}

/// Armor value against missiles; shields count triple from any side
pub fn ranged_armor_defense(defender: &Unit) -> f64 {
    defender.armor() + defender.shield() * RANGED_SHIELD_MULTIPLIER
}

/// Melee defense of `defender` against `attacker`
pub fn defense_power(defender: &Unit, attacker: &Unit, direction: RelativeDirection) -> f64 {
    let weapon = defender.weapon();
    let armor = (armor_defense(defender, direction) - attacker.weapon().piercing).max(0.0);
    weapon.defense + armor + weapon.discipline * defender.cohesion
}

/// Ranged defense of `defender` against a volley; discipline does not help
pub fn ranged_defense_power(defender: &Unit, ranged: &RangedProfile) -> f64 {
    let armor = (ranged_armor_defense(defender) - ranged.piercing).max(0.0);
    defender.weapon().defense * RANGED_DEFENSE_RATIO + armor
}

/// Scale an attack/defense pair into casualties.
///
/// A defenseless target loses its whole remaining population.
fn casualties(attack: f64, defense: f64, defender: &Unit) -> f64 {
    if defense <= 0.0 {
        return defender.population() as f64;
    }
    attack / defense * KILLING_POWER_RATIO
}

/// Expected melee casualties `attacker` inflicts on `defender` this round
pub fn killing_power(
    attacker: &Unit,
    defender: &Unit,
    direction: RelativeDirection,
    charging: bool,
) -> f64 {
    casualties(
        attack_power(attacker, charging),
        defense_power(defender, attacker, direction),
        defender,
    )
}

/// Expected casualties of one volley
pub fn ranged_killing_power(attacker: &Unit, defender: &Unit, ranged: &RangedProfile) -> f64 {
    casualties(
        ranged_attack_power(attacker, ranged),
        ranged_defense_power(defender, ranged),
        defender,
    )
}

/// Armor/shield wear `attacker` causes in melee this round
pub fn armor_damage(attacker: &Unit) -> f64 {
    attacker.weapon().piercing * ARMOR_DAMAGE_RATIO * (1.0 - stamina_attack_reduction(attacker))
}

/// Armor/shield wear of one volley
pub fn ranged_armor_damage(attacker: &Unit, ranged: &RangedProfile) -> f64 {
    ranged.piercing * ARMOR_DAMAGE_RATIO * (1.0 - stamina_attack_reduction(attacker))
}

/// Wear split between shield and armor
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ArmorWear {
    pub shield: f64,
    pub armor: f64,
}

/// The shield soaks wear first; the remainder goes to armor
pub fn split_armor_damage(damage: f64, shield: f64, shield_applies: bool) -> ArmorWear {
    let damage = damage.max(0.0);
    let absorbed = if shield_applies {
        shield.max(0.0).min(damage)
    } else {
        0.0
    };
    ArmorWear {
        shield: absorbed,
        armor: damage - absorbed,
    }
}

/// Morale lost in melee from the casualty exchange and the unit's own depletion.
///
/// A round in which the enemy lost nobody contributes no loss ratio.
pub fn morale_loss_from_combat(unit: &Unit, friendly_losses: f64, enemy_losses: f64) -> f64 {
    let loss_ratio = if enemy_losses > 0.0 {
        friendly_losses / enemy_losses
    } else {
        0.0
    };
    let depletion = fraction_missing(unit.population() as f64, unit.template().max_pop as f64);
    (loss_ratio + depletion) * COMBAT_MORALE_LOSS_SCALE
}

/// Morale lost to casualties from missiles
pub fn morale_loss_from_ranged_combat(unit: &Unit, friendly_losses: f64) -> f64 {
    let max_pop = unit.template().max_pop as f64;
    if max_pop <= 0.0 {
        return 0.0;
    }
    friendly_losses / max_pop * RANGED_MORALE_LOSS_SCALE
}

/// Morale lost to exhaustion
pub fn morale_loss_from_stamina(unit: &Unit) -> f64 {
    fraction_missing(unit.stamina(), unit.template().max_stamina) * STAMINA_MORALE_LOSS_SCALE
}

/// Net stamina spent in a melee round; negative means net recovery
pub fn stamina_cost(unit: &Unit) -> f64 {
    unit.weapon().fighting_stamina_usage - unit.template().stamina_regen
}

/// Net stamina spent loosing one volley
pub fn ranged_stamina_cost(unit: &Unit, ranged: &RangedProfile) -> f64 {
    ranged.stamina_usage - unit.template().stamina_regen
}
