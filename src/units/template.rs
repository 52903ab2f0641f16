//! Static stat sheets: weapon loadouts and unit templates
//!
//! Templates are immutable once built and shared between every unit
//! instantiated from them (`Arc<UnitTemplate>`).

use serde::{Deserialize, Serialize};

use crate::core::error::{CombatError, Result};

/// Ranged capability of a weapon set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangedProfile {
    pub attack: f64,
    /// Effective range in map cells (carried for callers; no positioning here)
    pub range: u32,
    /// Volleys available at full supply
    pub ammunition: u32,
    pub piercing: f64,
    pub stamina_usage: f64,
}

/// One loadout's combat stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponSet {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub attack: f64,
    pub defense: f64,
    /// Whether this loadout carries a shield
    #[serde(default)]
    pub shield: bool,
    pub piercing: f64,
    #[serde(default)]
    pub charge: f64,
    pub discipline: f64,
    pub fighting_stamina_usage: f64,
    #[serde(default)]
    pub moving_stamina_usage: f64,
    #[serde(default)]
    pub ranged: Option<RangedProfile>,
}

impl WeaponSet {
    /// Name shown in reports
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged.is_some()
    }

    /// Attach a ranged profile
    pub fn with_ranged(mut self, ranged: RangedProfile) -> Self {
        self.ranged = Some(ranged);
        self
    }
}

/// Immutable stat sheet shared by many units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TemplateDef")]
pub struct UnitTemplate {
    pub name: String,
    pub max_pop: u32,
    pub max_stamina: f64,
    pub stamina_regen: f64,
    pub max_armor: f64,
    pub max_shield: f64,
    pub max_morale: f64,
    weapons: Vec<WeaponSet>,
}

impl UnitTemplate {
    /// Build a template. Fails if `weapons` is empty.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        max_pop: u32,
        max_stamina: f64,
        stamina_regen: f64,
        max_armor: f64,
        max_shield: f64,
        max_morale: f64,
        weapons: Vec<WeaponSet>,
    ) -> Result<Self> {
        let name = name.into();
        if weapons.is_empty() {
            return Err(CombatError::EmptyLoadout(name));
        }
        Ok(Self {
            name,
            max_pop,
            max_stamina,
            stamina_regen,
            max_armor,
            max_shield,
            max_morale,
            weapons,
        })
    }

    /// Ordered weapon sets (never empty)
    pub fn weapons(&self) -> &[WeaponSet] {
        &self.weapons
    }

    /// The weapon set used in combat
    pub fn primary_weapon(&self) -> &WeaponSet {
        &self.weapons[0]
    }
}

/// Deserialization shape; routed through `UnitTemplate::new`
#[derive(Deserialize)]
struct TemplateDef {
    name: String,
    max_pop: u32,
    max_stamina: f64,
    stamina_regen: f64,
    #[serde(alias = "armor")]
    max_armor: f64,
    #[serde(default, alias = "shield")]
    max_shield: f64,
    max_morale: f64,
    weapons: Vec<WeaponSet>,
}

impl TryFrom<TemplateDef> for UnitTemplate {
    type Error = CombatError;

    fn try_from(def: TemplateDef) -> Result<Self> {
        UnitTemplate::new(
            def.name,
            def.max_pop,
            def.max_stamina,
            def.stamina_regen,
            def.max_armor,
            def.max_shield,
            def.max_morale,
            def.weapons,
        )
    }
}
