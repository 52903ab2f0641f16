//! Battle link: the round-by-round state machine of one engagement
//!
//! A link holds exclusive borrows of its two units for the length of the
//! engagement. Each `battle()` call resolves one round. The link concludes
//! when either side dies or routs (both at once is a tie), or when a ranged
//! attacker runs out of ammunition. A side already broken before a round,
//! for example in another link, ends the link without fighting that round.

use serde::{Deserialize, Serialize};

use crate::battle::direction::RelativeDirection;
use crate::combat::fight::{check_defeat, ranged_profile, resolve_melee, resolve_ranged};
use crate::combat::report::CombatReport;
use crate::core::config::config;
use crate::core::error::{CombatError, Result};
use crate::units::Unit;

/// Which fight formula a link drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BattleMode {
    #[default]
    Melee,
    Ranged,
}

/// One side of a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(&self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

/// How a concluded link ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkOutcome {
    AttackerWon,
    DefenderWon,
    /// Both sides broke in the same round
    Tie,
    /// Ranged attacker out of ammunition with both sides standing
    Disengaged,
}

impl LinkOutcome {
    pub fn winner(&self) -> Option<Side> {
        match self {
            LinkOutcome::AttackerWon => Some(Side::Attacker),
            LinkOutcome::DefenderWon => Some(Side::Defender),
            LinkOutcome::Tie | LinkOutcome::Disengaged => None,
        }
    }

    pub fn loser(&self) -> Option<Side> {
        self.winner().map(|side| side.opponent())
    }
}

/// How a unit left the fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Defeat {
    Dead,
    Fleeing,
}

impl Defeat {
    pub fn of(unit: &Unit) -> Option<Self> {
        if !unit.is_alive() {
            Some(Defeat::Dead)
        } else if unit.is_fleeing() {
            Some(Defeat::Fleeing)
        } else {
            None
        }
    }
}

/// Serializable record of an engagement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleSummary {
    pub attacker: String,
    pub defender: String,
    pub mode: BattleMode,
    pub rounds: u32,
    pub outcome: Option<LinkOutcome>,
    pub winner: Option<String>,
    pub loser: Option<String>,
    pub loser_state: Option<Defeat>,
    pub reports: Vec<CombatReport>,
}

/// An attacker and defender locked in combat
#[derive(Debug)]
pub struct BattleLink<'a> {
    attacker: &'a mut Unit,
    defender: &'a mut Unit,
    mode: BattleMode,
    direction: RelativeDirection,
    /// Charge bonus for the next round only
    charging: bool,
    round: u32,
    reports: Vec<CombatReport>,
    outcome: Option<LinkOutcome>,
}

impl<'a> BattleLink<'a> {
    /// Melee engagement; `direction` is the side of the defender being hit
    pub fn new(
        attacker: &'a mut Unit,
        defender: &'a mut Unit,
        direction: RelativeDirection,
        charging: bool,
    ) -> Self {
        Self {
            attacker,
            defender,
            mode: BattleMode::Melee,
            direction,
            charging,
            round: 0,
            reports: Vec::new(),
            outcome: None,
        }
    }

    /// Ranged engagement. Fails if the attacker's weapon cannot shoot.
    pub fn ranged(
        attacker: &'a mut Unit,
        defender: &'a mut Unit,
        direction: RelativeDirection,
    ) -> Result<Self> {
        ranged_profile(attacker)?;
        let mut link = Self::new(attacker, defender, direction, false);
        link.mode = BattleMode::Ranged;
        Ok(link)
    }

    /// Engagement in either mode. Charging is ignored for ranged links.
    pub fn with_mode(
        mode: BattleMode,
        attacker: &'a mut Unit,
        defender: &'a mut Unit,
        direction: RelativeDirection,
        charging: bool,
    ) -> Result<Self> {
        match mode {
            BattleMode::Melee => Ok(Self::new(attacker, defender, direction, charging)),
            BattleMode::Ranged => Self::ranged(attacker, defender, direction),
        }
    }

    /// Resolve one round. A concluded link ignores further calls.
    pub fn battle(&mut self) -> Result<()> {
        if !self.is_active() {
            tracing::warn!(
                "Battle between {} and {} already concluded",
                self.attacker.name(),
                self.defender.name()
            );
            return Ok(());
        }

        // Either side may have been broken elsewhere since the last round
        check_defeat(&mut *self.attacker);
        check_defeat(&mut *self.defender);
        if let Some(outcome) = self.evaluate() {
            self.conclude(outcome);
            return Ok(());
        }

        let mut report = match self.mode {
            BattleMode::Melee => resolve_melee(
                &mut *self.attacker,
                &mut *self.defender,
                self.direction,
                self.charging,
            ),
            BattleMode::Ranged => {
                resolve_ranged(&mut *self.attacker, &mut *self.defender, self.direction)?
            }
        };

        self.round += 1;
        report.round = self.round;
        self.reports.push(report);
        self.charging = false;

        if let Some(outcome) = self.evaluate() {
            self.conclude(outcome);
        }
        Ok(())
    }

    /// Run rounds until the link concludes
    pub fn resolve(&mut self, max_rounds: u32) -> Result<LinkOutcome> {
        self.resolve_with(max_rounds, |_| {})
    }

    /// Run rounds until the link concludes, capped by the global config
    pub fn resolve_default(&mut self) -> Result<LinkOutcome> {
        self.resolve(config().max_rounds)
    }

    /// Run rounds until the link concludes, calling `on_round` after each
    /// round that produced a report
    pub fn resolve_with<F>(&mut self, max_rounds: u32, mut on_round: F) -> Result<LinkOutcome>
    where
        F: FnMut(&Self),
    {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            if self.round >= max_rounds {
                return Err(CombatError::RoundLimitExceeded { rounds: self.round });
            }
            let reported = self.reports.len();
            self.battle()?;
            if self.reports.len() > reported {
                on_round(&*self);
            }
        }
    }

    fn evaluate(&self) -> Option<LinkOutcome> {
        let attacker_out = !self.attacker.can_fight();
        let defender_out = !self.defender.can_fight();
        match (attacker_out, defender_out) {
            (true, true) => Some(LinkOutcome::Tie),
            (true, false) => Some(LinkOutcome::DefenderWon),
            (false, true) => Some(LinkOutcome::AttackerWon),
            (false, false)
                if self.mode == BattleMode::Ranged && self.attacker.ammunition() == 0 =>
            {
                Some(LinkOutcome::Disengaged)
            }
            (false, false) => None,
        }
    }

    fn conclude(&mut self, outcome: LinkOutcome) {
        self.outcome = Some(outcome);
        match (self.winner(), self.loser()) {
            (Some(winner), Some(loser)) => tracing::info!(
                "{} defeated {} after {} rounds",
                winner.name(),
                loser.name(),
                self.round
            ),
            _ => tracing::info!(
                "{} vs {} ended without a victor ({:?}) after {} rounds",
                self.attacker.name(),
                self.defender.name(),
                outcome,
                self.round
            ),
        }
    }

    fn unit(&self, side: Side) -> &Unit {
        match side {
            Side::Attacker => &*self.attacker,
            Side::Defender => &*self.defender,
        }
    }

    // === QUERIES ===

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn mode(&self) -> BattleMode {
        self.mode
    }

    pub fn direction(&self) -> RelativeDirection {
        self.direction
    }

    /// Whether the next round gets the charge bonus
    pub fn is_charging(&self) -> bool {
        self.charging
    }

    pub fn outcome(&self) -> Option<LinkOutcome> {
        self.outcome
    }

    pub fn winner_side(&self) -> Option<Side> {
        self.outcome.and_then(|o| o.winner())
    }

    pub fn loser_side(&self) -> Option<Side> {
        self.outcome.and_then(|o| o.loser())
    }

    pub fn winner(&self) -> Option<&Unit> {
        self.winner_side().map(|side| self.unit(side))
    }

    pub fn loser(&self) -> Option<&Unit> {
        self.loser_side().map(|side| self.unit(side))
    }

    pub fn attacker(&self) -> &Unit {
        &*self.attacker
    }

    pub fn defender(&self) -> &Unit {
        &*self.defender
    }

    /// Reports in round order
    pub fn reports(&self) -> &[CombatReport] {
        &self.reports
    }

    pub fn last_report(&self) -> Option<&CombatReport> {
        self.reports.last()
    }

    pub fn summary(&self) -> BattleSummary {
        BattleSummary {
            attacker: self.attacker.name().to_string(),
            defender: self.defender.name().to_string(),
            mode: self.mode,
            rounds: self.round,
            outcome: self.outcome,
            winner: self.winner().map(|u| u.name().to_string()),
            loser: self.loser().map(|u| u.name().to_string()),
            loser_state: self.loser().and_then(Defeat::of),
            reports: self.reports.clone(),
        }
    }
}
