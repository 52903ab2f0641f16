//! Per-round combat reports

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::battle::direction::RelativeDirection;
use crate::battle::link::BattleMode;
use crate::units::Unit;

/// Snapshot of one side after a round, plus what it lost
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitCombatReport {
    pub name: String,
    pub weapon: String,
    pub health_remaining: u32,
    /// Population actually lost this round
    pub health_loss: u32,
    /// Expected casualties inflicted on the enemy, rounded up
    pub killing_power: u32,
    pub morale_remaining: f64,
    pub morale_loss: f64,
    pub stamina_remaining: f64,
    /// Negative when the unit recovered stamina
    pub stamina_loss: f64,
    pub armor_remaining: f64,
    pub armor_loss: f64,
    pub shield_remaining: f64,
    pub shield_loss: f64,
    pub died: bool,
    pub fled: bool,
    /// Side this unit was struck from
    pub direction: RelativeDirection,
    pub charging: bool,
}

/// Bars of a unit captured before a round resolves
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnitSnapshot {
    population: u32,
    morale: f64,
    stamina: f64,
    armor: f64,
    shield: f64,
}

impl UnitSnapshot {
    pub(crate) fn capture(unit: &Unit) -> Self {
        Self {
            population: unit.population(),
            morale: unit.morale(),
            stamina: unit.stamina(),
            armor: unit.armor(),
            shield: unit.shield(),
        }
    }
}

impl UnitCombatReport {
    /// Compare a unit against its pre-round snapshot
    pub(crate) fn build(
        unit: &Unit,
        before: UnitSnapshot,
        inflicted: f64,
        direction: RelativeDirection,
        charging: bool,
    ) -> Self {
        Self {
            name: unit.name().to_string(),
            weapon: unit.weapon().display_name().to_string(),
            health_remaining: unit.population(),
            health_loss: before.population.saturating_sub(unit.population()),
            killing_power: inflicted.max(0.0).ceil() as u32,
            morale_remaining: unit.morale(),
            morale_loss: before.morale - unit.morale(),
            stamina_remaining: unit.stamina(),
            stamina_loss: before.stamina - unit.stamina(),
            armor_remaining: unit.armor(),
            armor_loss: before.armor - unit.armor(),
            shield_remaining: unit.shield(),
            shield_loss: before.shield - unit.shield(),
            died: !unit.is_alive(),
            fled: unit.is_fleeing(),
            direction,
            charging,
        }
    }

    /// Out of the fight, by death or rout
    pub fn defeated(&self) -> bool {
        self.died || self.fled
    }
}

impl fmt::Display for UnitCombatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): pop {} (-{})  morale {:.1} (-{:.1})  stamina {:.1} (-{:.1})  \
             armor {:.2} (-{:.2})  shield {:.2} (-{:.2})  kills {}",
            self.name,
            self.weapon,
            self.health_remaining,
            self.health_loss,
            self.morale_remaining,
            self.morale_loss,
            self.stamina_remaining,
            self.stamina_loss,
            self.armor_remaining,
            self.armor_loss,
            self.shield_remaining,
            self.shield_loss,
            self.killing_power,
        )?;
        if self.charging {
            write!(f, "  [charging]")?;
        }
        if self.died {
            write!(f, "  [DEAD]")?;
        } else if self.fled {
            write!(f, "  [FLEEING]")?;
        }
        Ok(())
    }
}

/// Outcome of one round for both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatReport {
    pub round: u32,
    pub mode: BattleMode,
    pub attacker: UnitCombatReport,
    pub defender: UnitCombatReport,
}

impl fmt::Display for CombatReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Round {} ({:?}, from {})",
            self.round, self.mode, self.defender.direction
        )?;
        writeln!(f, "  A {}", self.attacker)?;
        write!(f, "  D {}", self.defender)
    }
}
