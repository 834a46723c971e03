//! Session — one shoe's roster of bettors and its hand history.
//!
//! Every hand is fanned out to each bettor in roster order. Bettors never
//! see each other, so order only matters to overlays reading the snapshot
//! (the meta advisor breaks ties by it).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

use super::input::format_outcomes;
use crate::strategy::{Bettor, BettorView, ProgressionConfig};
use crate::types::{BakuraError, Outcome, PatternKind};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// One roster slot. The display name defaults to the pattern's label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(default)]
    pub name: Option<String>,
    pub pattern: PatternKind,
}

impl RosterEntry {
    pub fn new(pattern: PatternKind) -> Self {
        Self { name: None, pattern }
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.pattern.to_string())
    }
}

/// Full catalogue, one bettor per pattern kind.
pub fn default_roster() -> Vec<RosterEntry> {
    PatternKind::ALL.iter().copied().map(RosterEntry::new).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub unit: Decimal,
    pub roster: Vec<RosterEntry>,
    pub progression: ProgressionConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            unit: Decimal::TEN,
            roster: default_roster(),
            progression: ProgressionConfig::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    shoe: u32,
    unit: Decimal,
    roster: Vec<RosterEntry>,
    progression: ProgressionConfig,
    history: Vec<Outcome>,
    bettors: Vec<Bettor>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, BakuraError> {
        validate_unit(config.unit)?;
        if config.roster.is_empty() {
            return Err(BakuraError::EmptyRoster);
        }

        let bettors = build_bettors(&config.roster, &config.progression);
        let session = Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            shoe: 1,
            unit: config.unit,
            roster: config.roster,
            progression: config.progression,
            history: Vec::new(),
            bettors,
        };

        info!(
            session = %session.id,
            unit = %session.unit,
            bettors = session.bettors.len(),
            ladder_rungs = session.progression.ladder.len(),
            "Session created"
        );
        Ok(session)
    }

    /// Record one hand for every bettor.
    pub fn add_hand(&mut self, outcome: Outcome) {
        self.history.push(outcome);
        let unit = self.unit;
        for bettor in &mut self.bettors {
            bettor.record_hand(outcome, unit);
        }
        info!(
            shoe = self.shoe,
            hand = self.history.len(),
            outcome = %outcome,
            "Hand recorded"
        );
    }

    pub fn add_hands(&mut self, outcomes: &[Outcome]) {
        for outcome in outcomes {
            self.add_hand(*outcome);
        }
    }

    /// New shoe: fresh bettors for the same roster, empty history.
    pub fn reset(&mut self) {
        self.bettors = build_bettors(&self.roster, &self.progression);
        self.history.clear();
        self.shoe += 1;
        self.started_at = Utc::now();
        info!(session = %self.id, shoe = self.shoe, "New shoe");
    }

    pub fn unit(&self) -> Decimal {
        self.unit
    }

    /// Change the base stake. Takes effect from the next hand.
    pub fn set_unit(&mut self, unit: Decimal) -> Result<(), BakuraError> {
        validate_unit(unit)?;
        info!(from = %self.unit, to = %unit, "Unit changed");
        self.unit = unit;
        Ok(())
    }

    pub fn history(&self) -> &[Outcome] {
        &self.history
    }

    pub fn bettors(&self) -> &[Bettor] {
        &self.bettors
    }

    pub fn shoe(&self) -> u32 {
        self.shoe
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Read-only projection of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let count = |o: Outcome| self.history.iter().filter(|h| **h == o).count();
        SessionSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            shoe: self.shoe,
            unit: self.unit,
            hands: self.history.len(),
            banker_count: count(Outcome::Banker),
            player_count: count(Outcome::Player),
            tie_count: count(Outcome::Tie),
            board: format_outcomes(&self.history),
            history: self.history.clone(),
            bettors: self.bettors.iter().map(|b| b.view(self.unit)).collect(),
        }
    }
}

fn validate_unit(unit: Decimal) -> Result<(), BakuraError> {
    if unit <= Decimal::ZERO {
        return Err(BakuraError::InvalidUnit(unit));
    }
    Ok(())
}

fn build_bettors(roster: &[RosterEntry], progression: &ProgressionConfig) -> Vec<Bettor> {
    roster
        .iter()
        .map(|entry| Bettor::new(entry.display_name(), entry.pattern, progression.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub shoe: u32,
    pub unit: Decimal,
    pub hands: usize,
    pub banker_count: usize,
    pub player_count: usize,
    pub tie_count: usize,
    /// History as board letters, e.g. "BPPT".
    pub board: String,
    pub history: Vec<Outcome>,
    pub bettors: Vec<BettorView>,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Shoe #{} | unit=${:.2} | hands={} (B{} P{} T{}) | {}",
            self.shoe,
            self.unit,
            self.hands,
            self.banker_count,
            self.player_count,
            self.tie_count,
            self.board,
        )?;
        for bettor in &self.bettors {
            writeln!(f, "  {bettor}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
