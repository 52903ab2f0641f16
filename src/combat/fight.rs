//! Round resolution
//!
//! Melee is a mutual exchange: both sides' results are computed from the
//! state at the start of the round, then applied together. Ranged is one-way:
//! the defender bleeds, the shooter only pays stamina.

use crate::battle::direction::RelativeDirection;
use crate::battle::link::BattleMode;
use crate::combat::formulas::*;
use crate::combat::report::{CombatReport, UnitCombatReport, UnitSnapshot};
use crate::core::error::{CombatError, Result};
use crate::units::template::RangedProfile;
use crate::units::Unit;

/// Strip shield then armor
fn apply_wear(unit: &mut Unit, wear: ArmorWear) {
    unit.set_shield(unit.shield() - wear.shield);
    unit.set_armor(unit.armor() - wear.armor);
}

/// Death first; a dead unit is not also checked for rout
pub(crate) fn check_defeat(unit: &mut Unit) {
    if unit.population() == 0 {
        unit.die();
    } else if unit.morale() <= 0.0 {
        unit.flee();
    }
}

/// Resolve one melee round. `direction` is the side of the defender being hit.
///
/// The defender strikes back at the attacker's front and never charges.
pub fn resolve_melee(
    attacker: &mut Unit,
    defender: &mut Unit,
    direction: RelativeDirection,
    charging: bool,
) -> CombatReport {
    let attacker_before = UnitSnapshot::capture(attacker);
    let defender_before = UnitSnapshot::capture(defender);

    let attacker_kp = killing_power(attacker, defender, direction, charging);
    let defender_kp = killing_power(defender, attacker, RelativeDirection::Front, false);

    let wear_on_defender = split_armor_damage(
        armor_damage(attacker),
        defender.shield(),
        shield_applies(defender, direction),
    );
    let wear_on_attacker = split_armor_damage(
        armor_damage(defender),
        attacker.shield(),
        shield_applies(attacker, RelativeDirection::Front),
    );

    let attacker_stamina_cost = stamina_cost(attacker);
    let defender_stamina_cost = stamina_cost(defender);

    attacker.set_population(attacker.population() as f64 - defender_kp);
    defender.set_population(defender.population() as f64 - attacker_kp);

    attacker.set_stamina(attacker.stamina() - attacker_stamina_cost);
    defender.set_stamina(defender.stamina() - defender_stamina_cost);

    apply_wear(attacker, wear_on_attacker);
    apply_wear(defender, wear_on_defender);

    let attacker_morale_loss = morale_loss_from_combat(attacker, defender_kp, attacker_kp)
        + morale_loss_from_stamina(attacker);
    let defender_morale_loss = morale_loss_from_combat(defender, attacker_kp, defender_kp)
        + morale_loss_from_stamina(defender);
    attacker.set_morale(attacker.morale() - attacker_morale_loss);
    defender.set_morale(defender.morale() - defender_morale_loss);

    check_defeat(attacker);
    check_defeat(defender);

    tracing::debug!(
        "Melee {} vs {}: inflicted {:.2}, suffered {:.2}",
        attacker.name(),
        defender.name(),
        attacker_kp,
        defender_kp
    );

    CombatReport {
        round: 0,
        mode: BattleMode::Melee,
        attacker: UnitCombatReport::build(
            attacker,
            attacker_before,
            attacker_kp,
            RelativeDirection::Front,
            charging,
        ),
        defender: UnitCombatReport::build(defender, defender_before, defender_kp, direction, false),
    }
}

/// The unit's ranged profile, or `MissingCapability` if it has none
pub fn ranged_profile(unit: &Unit) -> Result<&RangedProfile> {
    let weapon = unit.weapon();
    weapon
        .ranged
        .as_ref()
        .ok_or_else(|| CombatError::MissingCapability {
            unit: unit.name().to_string(),
            weapon: weapon.display_name().to_string(),
            capability: "ranged",
        })
}

/// Resolve one volley from `attacker` into `defender`
pub fn resolve_ranged(
    attacker: &mut Unit,
    defender: &mut Unit,
    direction: RelativeDirection,
) -> Result<CombatReport> {
    let ranged = ranged_profile(attacker)?.clone();
    if attacker.ammunition() == 0 {
        return Err(CombatError::OutOfAmmunition {
            unit: attacker.name().to_string(),
        });
    }

    let attacker_before = UnitSnapshot::capture(attacker);
    let defender_before = UnitSnapshot::capture(defender);

    let kp = ranged_killing_power(attacker, defender, &ranged);
    let wear = split_armor_damage(
        ranged_armor_damage(attacker, &ranged),
        defender.shield(),
        true,
    );
    let stamina_cost = ranged_stamina_cost(attacker, &ranged);

    defender.set_population(defender.population() as f64 - kp);
    apply_wear(defender, wear);
    attacker.set_stamina(attacker.stamina() - stamina_cost);
    attacker.consume_ammunition();

    let attacker_morale_loss = morale_loss_from_stamina(attacker);
    let defender_morale_loss =
        morale_loss_from_ranged_combat(defender, kp) + morale_loss_from_stamina(defender);
    attacker.set_morale(attacker.morale() - attacker_morale_loss);
    defender.set_morale(defender.morale() - defender_morale_loss);

    check_defeat(attacker);
    check_defeat(defender);

    tracing::debug!(
        "Volley {} into {}: inflicted {:.2}, {} volleys left",
        attacker.name(),
        defender.name(),
        kp,
        attacker.ammunition()
    );

    Ok(CombatReport {
        round: 0,
        mode: BattleMode::Ranged,
        attacker: UnitCombatReport::build(
            attacker,
            attacker_before,
            kp,
            RelativeDirection::Front,
            false,
        ),
        defender: UnitCombatReport::build(defender, defender_before, 0.0, direction, false),
    })
}

impl Unit {
    /// Fight one melee round against `enemy`, this unit attacking
    pub fn fight(
        &mut self,
        enemy: &mut Unit,
        direction: RelativeDirection,
        charging: bool,
    ) -> CombatReport {
        resolve_melee(self, enemy, direction, charging)
    }

    /// Loose one volley at `enemy`
    pub fn ranged_fight(
        &mut self,
        enemy: &mut Unit,
        direction: RelativeDirection,
    ) -> Result<CombatReport> {
        resolve_ranged(self, enemy, direction)
    }
}
