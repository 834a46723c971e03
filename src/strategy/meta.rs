//! Meta advisor — which bettor to fade.
//!
//! Looks at every bettor's pending prediction and suggests betting the
//! opposite side at that bettor's stake, picking the candidate with the best
//! single-hand expected value. Purely advisory: it only reads snapshots.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use super::bettor::BettorView;
use crate::types::Side;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Single-hand odds used for the expected-value estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaConfig {
    pub banker_win_prob: Decimal,
    pub player_win_prob: Decimal,
    /// Net payout per unit on a winning Banker bet (after commission).
    pub banker_payout: Decimal,
}

impl Default for MetaConfig {
    fn default() -> Self {
        Self {
            banker_win_prob: dec!(0.4586),
            player_win_prob: dec!(0.4462),
            banker_payout: dec!(0.95),
        }
    }
}

// ---------------------------------------------------------------------------
// Advisor
// ---------------------------------------------------------------------------

/// A suggested bet against one bettor's prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Name of the bettor being faded.
    pub against: String,
    /// The bettor's own prediction.
    pub their_side: Side,
    /// The side to bet (opposite of theirs).
    pub side: Side,
    pub stake: Decimal,
    pub expected_value: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct MetaAdvisor {
    config: MetaConfig,
}

impl MetaAdvisor {
    pub fn new(config: MetaConfig) -> Self {
        Self { config }
    }

    /// Expected value of betting `stake` on `side` for one hand. Ties push.
    pub fn expected_value(&self, side: Side, stake: Decimal) -> Decimal {
        let c = &self.config;
        let per_unit = match side {
            Side::Banker => c.banker_win_prob * c.banker_payout - c.player_win_prob,
            Side::Player => c.player_win_prob - c.banker_win_prob,
        };
        stake * per_unit
    }

    /// Best candidate by expected value; equal values keep roster order.
    pub fn suggest(&self, bettors: &[BettorView]) -> Option<Suggestion> {
        let mut best: Option<Suggestion> = None;

        for view in bettors {
            let (Some(their_side), Some(stake)) = (view.next_side, view.next_stake) else {
                continue;
            };
            let side = their_side.opposite();
            let candidate = Suggestion {
                against: view.name.clone(),
                their_side,
                side,
                stake,
                expected_value: self.expected_value(side, stake),
            };

            let better = best
                .as_ref()
                .map_or(true, |b| candidate.expected_value > b.expected_value);
            if better {
                best = Some(candidate);
            }
        }

        if let Some(s) = &best {
            debug!(
                against = %s.against,
                side = %s.side,
                stake = %s.stake,
                ev = %s.expected_value.round_dp(4),
                "Meta suggestion"
            );
        }

        best
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
