//! Bettor — one pattern plus its Star 2.0 progression.
//!
//! Every bettor sees every hand. A hand is either judged (hit / miss, with a
//! committed stake) or free (no prediction, no stake, no progression change).
//! Two consecutive hits knock the ladder back to the first rung; each
//! counted miss climbs one rung.

use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::ladder::StakeLadder;
use super::pattern::Pattern;
use crate::types::{BetChoice, HandMark, Outcome, PatternKind, Side};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Progression rules shared by every bettor in a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionConfig {
    pub ladder: StakeLadder,
    /// Whether a miss on the very first real bet climbs the ladder.
    pub count_first_miss: bool,
    /// Whether a tie moves already-seeded sequences and alternators forward.
    pub tie_advances_sequence: bool,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            ladder: StakeLadder::canonical(),
            count_first_miss: false,
            tie_advances_sequence: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Bettor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Bettor {
    name: String,
    kind: PatternKind,
    pattern: Pattern,
    progression: ProgressionConfig,
    miss_streak: u32,
    rung: usize,
    win_streak: u32,
    double_next_stake: bool,
    last_stake: Decimal,
    first_real_bet: bool,
    total_hits: u32,
    total_misses: u32,
    log: Vec<HandMark>,
}

impl Bettor {
    pub fn new(name: impl Into<String>, kind: PatternKind, progression: ProgressionConfig) -> Self {
        Self {
            name: name.into(),
            kind,
            pattern: Pattern::for_kind(kind),
            progression,
            miss_streak: 0,
            rung: 0,
            win_streak: 0,
            double_next_stake: false,
            last_stake: Decimal::ZERO,
            first_real_bet: true,
            total_hits: 0,
            total_misses: 0,
            log: Vec::new(),
        }
    }

    // -- Prediction ---------------------------------------------------------

    pub fn next_bet_choice(&self) -> BetChoice {
        self.pattern.choice()
    }

    /// Stake for the next bet, without committing it.
    pub fn preview_stake(&self, unit: Decimal) -> Decimal {
        if self.double_next_stake {
            self.last_stake * Decimal::TWO
        } else {
            self.progression.ladder.stake(unit, self.rung)
        }
    }

    /// Commit the next stake: consumes a pending doubling and remembers the
    /// amount for the next one.
    pub fn consume_stake(&mut self, unit: Decimal) -> Decimal {
        let stake = self.preview_stake(unit);
        self.double_next_stake = false;
        self.last_stake = stake;
        stake
    }

    // -- Transition ---------------------------------------------------------

    /// Apply one hand outcome. Total for any input; returns the log marker.
    pub fn record_hand(&mut self, outcome: Outcome, unit: Decimal) -> HandMark {
        let mark = self.resolve(outcome, unit);
        self.log.push(mark);
        mark
    }

    fn resolve(&mut self, outcome: Outcome, unit: Decimal) -> HandMark {
        let Some(side) = outcome.side() else {
            if self.pattern.is_seeded() && self.progression.tie_advances_sequence {
                self.pattern.step_forward();
            }
            return HandMark::Free;
        };

        if !self.pattern.is_seeded() {
            self.pattern.seed(side);
            debug!(bettor = %self.name, seed = %side, "Pattern seeded");
            return HandMark::Free;
        }

        let predicted = match self.next_bet_choice() {
            BetChoice::Bet(predicted) => predicted,
            BetChoice::FreeHand => {
                self.pattern.step_forward();
                return HandMark::Free;
            }
        };

        let stake = self.consume_stake(unit);
        let hit = side == predicted;

        if self.first_real_bet {
            self.first_real_bet = false;
            self.settle_first_bet(hit);
        } else if hit {
            self.register_hit(stake, unit);
        } else {
            self.register_miss();
        }

        self.pattern.observe(side);

        debug!(
            bettor = %self.name,
            predicted = %predicted,
            outcome = %side,
            stake = %stake,
            hit,
            miss_streak = self.miss_streak,
            rung = self.rung,
            "Hand judged"
        );

        if hit {
            HandMark::Hit
        } else {
            HandMark::Miss
        }
    }

    /// The first real bet only moves the totals and the win streak, unless
    /// first misses are configured to count.
    fn settle_first_bet(&mut self, hit: bool) {
        if hit {
            self.total_hits += 1;
            self.win_streak += 1;
        } else if self.progression.count_first_miss {
            self.register_miss();
        } else {
            self.total_misses += 1;
            self.win_streak = 0;
        }
    }

    fn register_hit(&mut self, stake: Decimal, unit: Decimal) {
        self.total_hits += 1;
        self.win_streak += 1;

        if self.win_streak == 1 && stake != unit {
            self.double_next_stake = true;
        }

        if self.win_streak >= 2 {
            self.reset_progression();
        }
    }

    fn register_miss(&mut self) {
        self.total_misses += 1;
        self.win_streak = 0;
        self.miss_streak += 1;
        self.rung = self.progression.ladder.rung_for(self.miss_streak);
    }

    fn reset_progression(&mut self) {
        debug!(bettor = %self.name, "Two hits in a row, ladder reset");
        self.miss_streak = 0;
        self.rung = 0;
        self.win_streak = 0;
        self.double_next_stake = false;
    }

    // -- Accessors ----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn miss_streak(&self) -> u32 {
        self.miss_streak
    }

    pub fn rung(&self) -> usize {
        self.rung
    }

    pub fn win_streak(&self) -> u32 {
        self.win_streak
    }

    pub fn double_pending(&self) -> bool {
        self.double_next_stake
    }

    pub fn last_stake(&self) -> Decimal {
        self.last_stake
    }

    pub fn is_first_real_bet(&self) -> bool {
        self.first_real_bet
    }

    pub fn total_hits(&self) -> u32 {
        self.total_hits
    }

    pub fn total_misses(&self) -> u32 {
        self.total_misses
    }

    pub fn log(&self) -> &[HandMark] {
        &self.log
    }

    /// Read-only projection for display. Never mutates.
    pub fn view(&self, unit: Decimal) -> BettorView {
        let next_side = self.next_bet_choice().side();
        BettorView {
            name: self.name.clone(),
            pattern: self.kind,
            last_result: self.log.last().copied(),
            miss_streak: self.miss_streak,
            rung: self.rung,
            win_streak: self.win_streak,
            double_pending: self.double_next_stake,
            next_side,
            next_stake: next_side.map(|_| self.preview_stake(unit)),
            total_hits: self.total_hits,
            total_misses: self.total_misses,
            log: self.log.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot view
// ---------------------------------------------------------------------------

/// Display record for one bettor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BettorView {
    pub name: String,
    pub pattern: PatternKind,
    pub last_result: Option<HandMark>,
    pub miss_streak: u32,
    pub rung: usize,
    pub win_streak: u32,
    pub double_pending: bool,
    /// `None` while the bettor is on a free hand.
    pub next_side: Option<Side>,
    pub next_stake: Option<Decimal>,
    pub total_hits: u32,
    pub total_misses: u32,
    pub log: Vec<HandMark>,
}

impl fmt::Display for BettorView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let next = match (self.next_side, self.next_stake) {
            (Some(side), Some(stake)) => format!("{side} ${stake:.2}"),
            _ => "free".to_string(),
        };
        let log: String = self.log.iter().map(|m| m.to_string()).collect();
        write!(
            f,
            "{:<22} next={:<16} misses={:<2} H{}/M{} {}",
            self.name, next, self.miss_streak, self.total_hits, self.total_misses, log,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
