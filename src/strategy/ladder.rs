//! Star 2.0 stake ladder.
//!
//! A table of unit multipliers indexed by rung. A bettor climbs one rung per
//! counted miss and stays on the top rung once it gets there.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::types::BakuraError;

/// The canonical 12-rung table.
pub const CANONICAL_MULTIPLIERS: [Decimal; 12] = [
    dec!(1),
    dec!(1.5),
    dec!(2.5),
    dec!(2.5),
    dec!(5),
    dec!(5),
    dec!(7.5),
    dec!(10),
    dec!(12.5),
    dec!(17.5),
    dec!(22.5),
    dec!(30),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeLadder {
    multipliers: Vec<Decimal>,
}

impl Default for StakeLadder {
    fn default() -> Self {
        Self::canonical()
    }
}

impl StakeLadder {
    pub fn canonical() -> Self {
        Self {
            multipliers: CANONICAL_MULTIPLIERS.to_vec(),
        }
    }

    /// Build a custom ladder. Must be non-empty with every multiplier > 0.
    pub fn new(multipliers: Vec<Decimal>) -> Result<Self, BakuraError> {
        if multipliers.is_empty() {
            return Err(BakuraError::InvalidLadder("no rungs".into()));
        }
        if let Some(bad) = multipliers.iter().find(|m| **m <= Decimal::ZERO) {
            return Err(BakuraError::InvalidLadder(format!(
                "multiplier {bad} is not positive"
            )));
        }
        Ok(Self { multipliers })
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }

    /// Highest valid rung index.
    pub fn top_rung(&self) -> usize {
        self.multipliers.len() - 1
    }

    /// Rung reached after `miss_streak` counted misses.
    pub fn rung_for(&self, miss_streak: u32) -> usize {
        (miss_streak as usize).min(self.top_rung())
    }

    /// Multiplier at `rung`, clamped to the top rung.
    pub fn multiplier(&self, rung: usize) -> Decimal {
        self.multipliers[rung.min(self.top_rung())]
    }

    pub fn stake(&self, unit: Decimal, rung: usize) -> Decimal {
        unit * self.multiplier(rung)
    }

    pub fn multipliers(&self) -> &[Decimal] {
        &self.multipliers
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
