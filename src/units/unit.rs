//! Mutable combat state for one block of soldiers
//!
//! The five resource bars (population, morale, stamina, armor, shield) are
//! private and only change through setters that clamp to `[0, template max]`.
//! Population is additionally truncated toward zero.

use std::fmt;
use std::sync::Arc;

use crate::units::template::{UnitTemplate, WeaponSet};

/// A unit of soldiers instantiated from a template
#[derive(Debug, Clone)]
pub struct Unit {
    template: Arc<UnitTemplate>,

    population: u32,
    morale: f64,
    stamina: f64,
    armor: f64,
    shield: f64,
    ammunition: u32,

    pub rank: u32,
    pub experience: u32,
    /// Scales the discipline bonus to defense
    pub cohesion: f64,

    alive: bool,
    fleeing: bool,
}

impl Unit {
    /// New unit at full strength
    pub fn new(template: Arc<UnitTemplate>) -> Self {
        let ammunition = template
            .primary_weapon()
            .ranged
            .as_ref()
            .map_or(0, |r| r.ammunition);
        Self {
            population: template.max_pop,
            morale: template.max_morale,
            stamina: template.max_stamina,
            armor: template.max_armor,
            shield: template.max_shield,
            ammunition,
            rank: 0,
            experience: 0,
            cohesion: 1.0,
            alive: template.max_pop > 0,
            fleeing: false,
            template,
        }
    }

    pub fn with_population(mut self, population: f64) -> Self {
        self.set_population(population);
        self.alive = self.population > 0;
        self
    }

    pub fn with_morale(mut self, morale: f64) -> Self {
        self.set_morale(morale);
        self
    }

    pub fn with_stamina(mut self, stamina: f64) -> Self {
        self.set_stamina(stamina);
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_experience(mut self, experience: u32) -> Self {
        self.experience = experience;
        self
    }

    pub fn with_cohesion(mut self, cohesion: f64) -> Self {
        self.cohesion = cohesion;
        self
    }

    pub fn template(&self) -> &UnitTemplate {
        &self.template
    }

    pub fn name(&self) -> &str {
        &self.template.name
    }

    /// Weapon set used in combat
    pub fn weapon(&self) -> &WeaponSet {
        self.template.primary_weapon()
    }

    // === RESOURCE BARS ===

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn morale(&self) -> f64 {
        self.morale
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn armor(&self) -> f64 {
        self.armor
    }

    pub fn shield(&self) -> f64 {
        self.shield
    }

    pub fn ammunition(&self) -> u32 {
        self.ammunition
    }

    /// Set population, clamped and truncated. Returns the stored value.
    pub fn set_population(&mut self, value: f64) -> u32 {
        self.population = clamp_bar(value, self.template.max_pop as f64).trunc() as u32;
        self.population
    }

    pub fn set_morale(&mut self, value: f64) -> f64 {
        self.morale = clamp_bar(value, self.template.max_morale);
        self.morale
    }

    pub fn set_stamina(&mut self, value: f64) -> f64 {
        self.stamina = clamp_bar(value, self.template.max_stamina);
        self.stamina
    }

    pub fn set_armor(&mut self, value: f64) -> f64 {
        self.armor = clamp_bar(value, self.template.max_armor);
        self.armor
    }

    pub fn set_shield(&mut self, value: f64) -> f64 {
        self.shield = clamp_bar(value, self.template.max_shield);
        self.shield
    }

    /// Spend one volley. Returns false if none were left.
    pub(crate) fn consume_ammunition(&mut self) -> bool {
        match self.ammunition.checked_sub(1) {
            Some(left) => {
                self.ammunition = left;
                true
            }
            None => false,
        }
    }

    // === TERMINAL STATES ===

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_fleeing(&self) -> bool {
        self.fleeing
    }

    /// Alive and holding
    pub fn can_fight(&self) -> bool {
        self.alive && !self.fleeing
    }

    /// Mark the unit destroyed. One-way.
    pub fn die(&mut self) {
        if self.alive {
            tracing::info!("{} has been destroyed", self.name());
        }
        self.alive = false;
    }

    /// Mark the unit routed. One-way.
    pub fn flee(&mut self) {
        if !self.fleeing {
            tracing::info!("{} is fleeing", self.name());
        }
        self.fleeing = true;
    }

    // === OUT OF COMBAT ===

    /// Recover stamina for one idle round
    pub fn regenerate(&mut self) -> f64 {
        let regen = self.template.stamina_regen;
        self.set_stamina(self.stamina + regen)
    }

    /// Pay the stamina cost of one round of movement
    pub fn march(&mut self) -> f64 {
        let cost = self.weapon().moving_stamina_usage - self.template.stamina_regen;
        self.set_stamina(self.stamina - cost)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: pop {}/{}  morale {:.1}/{}  stamina {:.1}/{}  armor {:.2}/{}  shield {:.2}/{}",
            self.name(),
            self.population,
            self.template.max_pop,
            self.morale,
            self.template.max_morale,
            self.stamina,
            self.template.max_stamina,
            self.armor,
            self.template.max_armor,
            self.shield,
            self.template.max_shield,
        )
    }
}

/// Clamp into `[0, max]`; NaN collapses to zero
fn clamp_bar(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max.max(0.0))
}
