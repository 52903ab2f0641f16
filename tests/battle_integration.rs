//! Battle link integration tests
//!
//! Full engagements between stock templates, driven to conclusion.

use proptest::prelude::*;

use shieldwall::battle::*;
use shieldwall::core::error::CombatError;
use shieldwall::units::{TemplateCatalog, Unit};

fn unit(name: &str) -> Unit {
    Unit::new(TemplateCatalog::with_defaults().require(name).unwrap())
}

/// Spearmen attack Swordsmen head on. The swordsmen's heavier blows break
/// the spearmen's morale before either side is wiped out.
#[test]
fn test_spearmen_vs_swordsmen() {
    let mut spearmen = unit("Spearmen");
    let mut swordsmen = unit("Swordsmen");
    let mut link = BattleLink::new(&mut spearmen, &mut swordsmen, RelativeDirection::Front, false);

    while link.is_active() {
        link.battle().unwrap();
        assert!(link.round() < 50, "battle should be decided quickly");
    }

    assert_eq!(link.outcome(), Some(LinkOutcome::DefenderWon));
    assert_eq!(link.winner().unwrap().name(), "Swordsmen");
    assert_eq!(link.loser().unwrap().name(), "Spearmen");
    assert_eq!(link.round(), 9);
    assert_eq!(link.reports().len(), 9);

    let last = link.last_report().unwrap();
    assert!(last.attacker.fled);
    assert!(!last.attacker.died);
    assert_eq!(last.attacker.health_remaining, 62);
    assert_eq!(last.defender.health_remaining, 93);

    drop(link);
    assert!(spearmen.is_fleeing());
    assert!(swordsmen.can_fight());
}

#[test]
fn test_battle_is_deterministic() {
    let run = || {
        let mut a = unit("Scavn Swordsmen");
        let mut d = unit("Rendmen");
        let mut link = BattleLink::new(&mut a, &mut d, RelativeDirection::Front, true);
        link.resolve(500).unwrap();
        link.summary()
    };

    let first = run();
    let second = run();
    assert_eq!(first.rounds, second.rounds);
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.reports, second.reports);
}

/// Identical units clash head on: every round is symmetric, so both break
/// in the same round.
#[test]
fn test_mirror_match_is_a_tie() {
    let mut a = unit("Spearmen");
    let mut d = unit("Spearmen");
    let mut link = BattleLink::new(&mut a, &mut d, RelativeDirection::Front, false);

    let outcome = link.resolve(500).unwrap();

    assert_eq!(outcome, LinkOutcome::Tie);
    assert!(link.winner().is_none());
    assert!(link.loser().is_none());
    let last = link.last_report().unwrap();
    assert!(last.attacker.defeated());
    assert!(last.defender.defeated());
}

/// One unit fights two neighbours in sequence. Once it is destroyed in the
/// first link it takes no further part in the second.
#[test]
fn test_unit_destroyed_in_one_link_cannot_fight_in_another() {
    let mut spearmen = unit("Spearmen").with_population(2.0);
    let mut rendmen = unit("Rendmen");
    let mut swordsmen = unit("Swordsmen");

    let mut first = BattleLink::new(&mut rendmen, &mut spearmen, RelativeDirection::Front, false);
    first.battle().unwrap();
    assert_eq!(first.outcome(), Some(LinkOutcome::AttackerWon));
    drop(first);
    assert!(!spearmen.is_alive());

    let mut second = BattleLink::new(&mut spearmen, &mut swordsmen, RelativeDirection::Front, true);
    let outcome = second.resolve(10).unwrap();

    assert_eq!(outcome, LinkOutcome::DefenderWon);
    assert_eq!(second.round(), 0);
    assert!(second.reports().is_empty());
    drop(second);
    assert_eq!(swordsmen.population(), 120);
}

#[test]
fn test_flanking_hurts_more_than_frontal() {
    let frontal = {
        let mut a = unit("Spearmen");
        let mut d = unit("Swordsmen");
        let mut link = BattleLink::new(&mut a, &mut d, RelativeDirection::Front, false);
        link.battle().unwrap();
        link.last_report().unwrap().defender.health_loss
    };
    let rear = {
        let mut a = unit("Spearmen");
        let mut d = unit("Swordsmen");
        let mut link = BattleLink::new(&mut a, &mut d, RelativeDirection::Back, false);
        link.battle().unwrap();
        link.last_report().unwrap().defender.health_loss
    };
    assert!(rear > frontal);
}

#[test]
fn test_direction_from_facings_feeds_link() {
    // Attacker facing north runs into a defender facing west: a left-side hit
    let direction = RelativeDirection::direction_from(Direction::North, Direction::West);
    let mut a = unit("Rendmen");
    let mut d = unit("Swordsmen");
    let mut link = BattleLink::new(&mut a, &mut d, direction, false);

    link.battle().unwrap();

    let report = link.last_report().unwrap();
    assert_eq!(report.defender.direction, RelativeDirection::Left);
    // No frontal shield, so all wear lands on armor
    assert_eq!(report.defender.shield_loss, 0.0);
    assert!(report.defender.armor_loss > 0.0);
}

#[test]
fn test_ranged_link_only_hurts_the_target() {
    let mut archers = unit("Freewood Archers");
    let mut scavn = unit("Scavn Swordsmen");
    let mut link = BattleLink::ranged(&mut archers, &mut scavn, RelativeDirection::Front).unwrap();

    let outcome = link.resolve(100).unwrap();

    assert_eq!(link.mode(), BattleMode::Ranged);
    assert_eq!(outcome, LinkOutcome::Disengaged);
    for report in link.reports() {
        assert_eq!(report.attacker.health_loss, 0);
        assert_eq!(report.attacker.armor_loss, 0.0);
        assert_eq!(report.attacker.shield_loss, 0.0);
        assert!(report.attacker.stamina_loss > 0.0);
        assert_eq!(report.defender.stamina_loss, 0.0);
        assert!(report.defender.health_loss > 0);
        assert!(report.defender.morale_loss > 0.0);
    }

    drop(link);
    assert_eq!(archers.population(), 100);
    assert!(scavn.population() < 120);
    assert!(scavn.shield() < 4.0);
    assert_eq!(archers.ammunition(), 0);
}

#[test]
fn test_ranged_link_requires_bows() {
    let mut a = unit("Rendmen");
    let mut d = unit("Freewood Archers");
    let result = BattleLink::with_mode(BattleMode::Ranged, &mut a, &mut d, RelativeDirection::Front, true);
    assert!(matches!(result, Err(CombatError::MissingCapability { .. })));
}

#[test]
fn test_summary_serializes() {
    let mut a = unit("Swordsmen");
    let mut d = unit("Spearmen");
    let mut link = BattleLink::new(&mut a, &mut d, RelativeDirection::Front, true);
    link.resolve(500).unwrap();

    let json = serde_json::to_string(&link.summary()).unwrap();
    let summary: BattleSummary = serde_json::from_str(&json).unwrap();

    assert_eq!(summary.winner.as_deref(), Some("Swordsmen"));
    assert_eq!(summary.loser_state, Some(Defeat::Fleeing));
    assert_eq!(summary.rounds as usize, summary.reports.len());
    assert!(summary.reports[0].attacker.charging);
}

const MELEE_TEMPLATES: [&str; 5] = [
    "Spearmen",
    "Swordsmen",
    "Great-Shield Men",
    "Scavn Swordsmen",
    "Rendmen",
];

fn any_direction() -> impl Strategy<Value = RelativeDirection> {
    prop_oneof![
        Just(RelativeDirection::Front),
        Just(RelativeDirection::Right),
        Just(RelativeDirection::Back),
        Just(RelativeDirection::Left),
    ]
}

proptest! {
    #[test]
    fn prop_melee_links_terminate(
        attacker_idx in 0..MELEE_TEMPLATES.len(),
        defender_idx in 0..MELEE_TEMPLATES.len(),
        attacker_pop in 1.0f64..=120.0,
        defender_pop in 1.0f64..=120.0,
        attacker_morale in 1.0f64..=60.0,
        defender_morale in 1.0f64..=60.0,
        direction in any_direction(),
        charging in any::<bool>(),
    ) {
        let mut a = unit(MELEE_TEMPLATES[attacker_idx])
            .with_population(attacker_pop)
            .with_morale(attacker_morale);
        let mut d = unit(MELEE_TEMPLATES[defender_idx])
            .with_population(defender_pop)
            .with_morale(defender_morale);
        let mut link = BattleLink::new(&mut a, &mut d, direction, charging);

        // Every round costs both sides at least one soldier
        let outcome = link.resolve(121).unwrap();

        prop_assert!(!link.is_active());
        prop_assert!(link.round() >= 1);
        match outcome {
            LinkOutcome::AttackerWon => prop_assert!(link.attacker().can_fight() && !link.defender().can_fight()),
            LinkOutcome::DefenderWon => prop_assert!(link.defender().can_fight() && !link.attacker().can_fight()),
            LinkOutcome::Tie => prop_assert!(!link.attacker().can_fight() && !link.defender().can_fight()),
            LinkOutcome::Disengaged => prop_assert!(false, "melee links never disengage"),
        }
    }

    #[test]
    fn prop_reports_account_for_every_casualty(
        attacker_idx in 0..MELEE_TEMPLATES.len(),
        defender_idx in 0..MELEE_TEMPLATES.len(),
        direction in any_direction(),
    ) {
        let mut a = unit(MELEE_TEMPLATES[attacker_idx]);
        let mut d = unit(MELEE_TEMPLATES[defender_idx]);
        let mut link = BattleLink::new(&mut a, &mut d, direction, false);
        link.resolve(500).unwrap();

        let attacker_lost: u32 = link.reports().iter().map(|r| r.attacker.health_loss).sum();
        let defender_lost: u32 = link.reports().iter().map(|r| r.defender.health_loss).sum();
        prop_assert_eq!(attacker_lost, 120 - link.attacker().population());
        prop_assert_eq!(defender_lost, 120 - link.defender().population());
        for report in link.reports() {
            // Displayed kills never understate what the enemy actually lost
            prop_assert!(report.attacker.killing_power >= report.defender.health_loss);
            prop_assert!(report.defender.killing_power >= report.attacker.health_loss);
        }
    }
}
