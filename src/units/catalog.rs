//! Catalog of unit templates
//!
//! Ships the stock templates and loads additional ones from TOML.

use std::sync::Arc;

use ahash::AHashMap;
use serde::Deserialize;

use crate::core::error::{CombatError, Result};
use crate::units::template::{RangedProfile, UnitTemplate, WeaponSet};

/// Named collection of shared templates
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Arc<UnitTemplate>>,
    by_name: AHashMap<String, usize>,
}

#[derive(Deserialize)]
struct TomlTemplates {
    #[serde(default)]
    templates: Vec<UnitTemplate>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the stock templates
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for template in stock_templates() {
            catalog.add(template);
        }
        debug_assert_eq!(catalog.len(), STOCK_TEMPLATE_NAMES.len());
        catalog
    }

    /// Add a template, replacing any with the same name
    pub fn add(&mut self, template: UnitTemplate) -> Arc<UnitTemplate> {
        let key = template.name.to_lowercase();
        let template = Arc::new(template);
        match self.by_name.get(&key) {
            Some(&idx) => self.templates[idx] = Arc::clone(&template),
            None => {
                self.by_name.insert(key, self.templates.len());
                self.templates.push(Arc::clone(&template));
            }
        }
        template
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<Arc<UnitTemplate>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&idx| Arc::clone(&self.templates[idx]))
    }

    /// Lookup that fails with `UnknownTemplate`
    pub fn require(&self, name: &str) -> Result<Arc<UnitTemplate>> {
        self.get(name)
            .ok_or_else(|| CombatError::UnknownTemplate(name.to_string()))
    }

    pub fn all(&self) -> &[Arc<UnitTemplate>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Load templates from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse templates from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self> {
        let data: TomlTemplates = toml::from_str(content)?;
        let mut catalog = Self::new();
        catalog.extend(data.templates);
        Ok(catalog)
    }

    /// Merge templates into this catalog
    pub fn extend(&mut self, templates: impl IntoIterator<Item = UnitTemplate>) {
        for template in templates {
            tracing::debug!("Registered unit template {}", template.name);
            self.add(template);
        }
    }
}

/// Melee loadout in stat-table order:
/// attack, defense, shield, piercing, charge, discipline, fighting and moving stamina
#[allow(clippy::too_many_arguments)]
fn melee(
    name: &str,
    attack: f64,
    defense: f64,
    shield: bool,
    piercing: f64,
    charge: f64,
    discipline: f64,
    fighting_stamina_usage: f64,
    moving_stamina_usage: f64,
) -> WeaponSet {
    WeaponSet {
        name: name.to_string(),
        display_name: None,
        attack,
        defense,
        shield,
        piercing,
        charge,
        discipline,
        fighting_stamina_usage,
        moving_stamina_usage,
        ranged: None,
    }
}

/// Names of the stock templates, in catalog order
pub const STOCK_TEMPLATE_NAMES: [&str; 6] = [
    "Spearmen",
    "Swordsmen",
    "Great-Shield Men",
    "Scavn Swordsmen",
    "Rendmen",
    "Freewood Archers",
];

fn stock(
    name: &str,
    stats: (u32, f64, f64, f64, f64, f64),
    weapon: WeaponSet,
) -> Option<UnitTemplate> {
    let (max_pop, max_stamina, regen, armor, shield, morale) = stats;
    match UnitTemplate::new(name, max_pop, max_stamina, regen, armor, shield, morale, vec![weapon]) {
        Ok(template) => Some(template),
        Err(e) => {
            tracing::error!("Stock template {} rejected: {}", name, e);
            None
        }
    }
}

/// The stock templates: pop, stamina, regen, armor, shield, morale
fn stock_templates() -> Vec<UnitTemplate> {
    let shortbow = melee("Shortbow", 1.0, 2.0, false, 1.0, 2.0, 1.0, 3.0, 2.0).with_ranged(
        RangedProfile {
            attack: 6.0,
            range: 5,
            ammunition: 10,
            piercing: 2.0,
            stamina_usage: 9.0,
        },
    );

    [
        stock(
            "Spearmen",
            (120, 100.0, 5.0, 1.0, 8.0, 100.0),
            melee("Spear and Shield", 4.0, 6.0, true, 3.0, 4.0, 3.0, 7.0, 3.0),
        ),
        stock(
            "Swordsmen",
            (120, 100.0, 5.0, 3.0, 5.0, 100.0),
            melee("Sword and Shield", 9.0, 5.0, true, 4.0, 5.0, 2.0, 9.0, 3.0),
        ),
        stock(
            "Great-Shield Men",
            (120, 100.0, 4.5, 4.0, 12.0, 140.0),
            melee("Sword and Great-Shield", 6.0, 6.0, true, 3.0, 6.0, 6.0, 7.0, 3.5),
        ),
        stock(
            "Scavn Swordsmen",
            (120, 100.0, 5.0, 4.0, 4.0, 80.0),
            melee("Sword and Shield", 11.0, 7.0, true, 3.0, 8.0, 2.0, 10.0, 3.0),
        ),
        stock(
            "Rendmen",
            (120, 100.0, 6.0, 2.0, 2.0, 60.0),
            melee("Axe and Shield", 16.0, 6.0, true, 6.0, 12.0, 1.0, 14.0, 2.0),
        ),
        stock("Freewood Archers", (100, 100.0, 6.0, 2.0, 0.0, 60.0), shortbow),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_stock_templates() {
        let catalog = TemplateCatalog::with_defaults();
        assert_eq!(catalog.len(), 6);
        let spearmen = catalog.get("spearmen").unwrap();
        assert_eq!(spearmen.max_pop, 120);
        assert_eq!(spearmen.primary_weapon().attack, 4.0);
        assert!(catalog.get("Freewood Archers").unwrap().primary_weapon().is_ranged());
    }

    #[test]
    fn test_every_stock_template_is_registered() {
        let catalog = TemplateCatalog::with_defaults();
        let names: Vec<&str> = catalog.all().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, STOCK_TEMPLATE_NAMES);
    }

    #[test]
    fn test_require_unknown() {
        let catalog = TemplateCatalog::with_defaults();
        assert!(matches!(
            catalog.require("Dragoons"),
            Err(CombatError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_lookup_shares_template() {
        let catalog = TemplateCatalog::with_defaults();
        let a = catalog.get("Rendmen").unwrap();
        let b = catalog.get("RENDMEN").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [[templates]]
            name = "Slingers"
            max_pop = 80
            max_stamina = 100
            stamina_regen = 6
            armor = 1
            max_morale = 50

            [[templates.weapons]]
            name = "Sling"
            attack = 1
            defense = 1
            piercing = 0
            discipline = 1
            fighting_stamina_usage = 3

            [templates.weapons.ranged]
            attack = 4
            range = 4
            ammunition = 12
            piercing = 1
            stamina_usage = 7
        "#;

        let catalog = TemplateCatalog::parse_toml(toml_str).unwrap();
        let slingers = catalog.require("slingers").unwrap();
        assert_eq!(slingers.max_armor, 1.0);
        assert_eq!(slingers.max_shield, 0.0);
        let ranged = slingers.primary_weapon().ranged.as_ref().unwrap();
        assert_eq!(ranged.ammunition, 12);
    }

    #[test]
    fn test_shipped_data_matches_defaults() {
        let shipped = TemplateCatalog::parse_toml(include_str!("../../data/templates.toml")).unwrap();
        let defaults = TemplateCatalog::with_defaults();
        assert_eq!(shipped.len(), defaults.len());
        for template in defaults.all() {
            assert_eq!(*shipped.require(&template.name).unwrap(), **template);
        }
    }

    #[test]
    fn test_parse_toml_without_weapons_fails() {
        let toml_str = r#"
            [[templates]]
            name = "Nobody"
            max_pop = 10
            max_stamina = 100
            stamina_regen = 5
            armor = 0
            max_morale = 10
            weapons = []
        "#;
        assert!(TemplateCatalog::parse_toml(toml_str).is_err());
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut catalog = TemplateCatalog::with_defaults();
        let mut spearmen = (*catalog.require("Spearmen").unwrap()).clone();
        spearmen.max_morale = 200.0;
        catalog.add(spearmen);
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.require("Spearmen").unwrap().max_morale, 200.0);
    }
}
