//! D'Alembert progression.
//!
//! Standalone even-money tracker: raise the bet one unit after a loss,
//! lower it one unit after a win (never below the base unit), hold on a
//! push.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::types::{BakuraError, BetResult};

/// One recorded hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DAlembertEntry {
    pub hand: u32,
    pub result: BetResult,
    pub bet: Decimal,
    pub profit_change: Decimal,
    pub total_profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DAlembertProgression {
    base_unit: Decimal,
    current_bet: Decimal,
    profit: Decimal,
    history: Vec<DAlembertEntry>,
}

impl DAlembertProgression {
    pub fn new(base_unit: Decimal) -> Result<Self, BakuraError> {
        if base_unit <= Decimal::ZERO {
            return Err(BakuraError::InvalidUnit(base_unit));
        }
        Ok(Self {
            base_unit,
            current_bet: base_unit,
            profit: Decimal::ZERO,
            history: Vec::new(),
        })
    }

    /// Start over with the same base unit.
    pub fn reset(&mut self) {
        self.current_bet = self.base_unit;
        self.profit = Decimal::ZERO;
        self.history.clear();
    }

    pub fn record(&mut self, result: BetResult) -> &DAlembertEntry {
        let bet = self.current_bet;
        let profit_change = match result {
            BetResult::Win => {
                self.current_bet = (self.current_bet - self.base_unit).max(self.base_unit);
                bet
            }
            BetResult::Loss => {
                self.current_bet += self.base_unit;
                -bet
            }
            BetResult::Push => Decimal::ZERO,
        };
        self.profit += profit_change;

        let entry = DAlembertEntry {
            hand: self.history.len() as u32 + 1,
            result,
            bet,
            profit_change,
            total_profit: self.profit,
        };
        debug!(
            hand = entry.hand,
            result = %result,
            bet = %bet,
            next_bet = %self.current_bet,
            profit = %self.profit,
            "D'Alembert hand recorded"
        );
        self.history.push(entry);
        &self.history[self.history.len() - 1]
    }

    pub fn base_unit(&self) -> Decimal {
        self.base_unit
    }

    pub fn current_bet(&self) -> Decimal {
        self.current_bet
    }

    pub fn profit(&self) -> Decimal {
        self.profit
    }

    pub fn history(&self) -> &[DAlembertEntry] {
        &self.history
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
