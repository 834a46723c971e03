//! Prediction patterns.
//!
//! Each variant carries only the state its rule needs. Seed-dependent
//! variants stay unseeded until the first non-tie outcome, which fixes their
//! "base" side (the outcome) and "alt" side (its opposite).

use serde::Serialize;

use crate::types::{BetChoice, PatternKind, Side};

// ---------------------------------------------------------------------------
// Sequence templates
// ---------------------------------------------------------------------------

/// Cyclic step templates, expressed against a base side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SequenceTemplate {
    TerrificTwos,
    ThreePattern,
    OneTwoOne,
    TwoThreeTwo,
    Pattern1313,
}

impl SequenceTemplate {
    /// Expand the template into concrete sides. `true` marks a base step.
    fn shape(&self) -> &'static [bool] {
        const B: bool = true;
        const A: bool = false;
        match self {
            SequenceTemplate::TerrificTwos => &[B, B, A, A, B, B, A, A, B, B],
            SequenceTemplate::ThreePattern => &[B, B, A, A, A, B, B, B, A, A, A],
            SequenceTemplate::OneTwoOne => &[A, A, B, A, A, B, A, A, B],
            SequenceTemplate::TwoThreeTwo => &[B, A, A, A, B, B, A, A, A, B, B],
            SequenceTemplate::Pattern1313 => &[A, A, A, B],
        }
    }

    pub fn materialize(&self, base: Side) -> Vec<Side> {
        let alt = base.opposite();
        self.shape()
            .iter()
            .map(|is_base| if *is_base { base } else { alt })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Pattern state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Always the same side.
    Fixed(Side),
    /// Two-step cycle that ignores outcomes.
    Alternator { cycle: [Side; 2], position: usize },
    /// Bets against the seed outcome.
    Chop { reference: Option<Side> },
    /// Bets on the most recent non-tie outcome.
    FollowLast { last: Option<Side> },
    /// Materialised cyclic sequence.
    Sequence {
        template: SequenceTemplate,
        steps: Option<Vec<Side>>,
        position: usize,
    },
}

impl Pattern {
    pub fn for_kind(kind: PatternKind) -> Self {
        let sequence = |template| Pattern::Sequence {
            template,
            steps: None,
            position: 0,
        };
        match kind {
            PatternKind::BankerOnly => Pattern::Fixed(Side::Banker),
            PatternKind::PlayerOnly => Pattern::Fixed(Side::Player),
            PatternKind::AlternatorStartBanker => Pattern::Alternator {
                cycle: [Side::Banker, Side::Player],
                position: 0,
            },
            PatternKind::AlternatorStartPlayer => Pattern::Alternator {
                cycle: [Side::Player, Side::Banker],
                position: 0,
            },
            PatternKind::Chop => Pattern::Chop { reference: None },
            PatternKind::FollowLast => Pattern::FollowLast { last: None },
            PatternKind::TerrificTwos => sequence(SequenceTemplate::TerrificTwos),
            PatternKind::ThreePattern => sequence(SequenceTemplate::ThreePattern),
            PatternKind::OneTwoOne => sequence(SequenceTemplate::OneTwoOne),
            PatternKind::TwoThreeTwo => sequence(SequenceTemplate::TwoThreeTwo),
            PatternKind::Pattern1313 => sequence(SequenceTemplate::Pattern1313),
        }
    }

    /// Whether the pattern can predict. Fixed and alternator patterns always
    /// can.
    pub fn is_seeded(&self) -> bool {
        match self {
            Pattern::Fixed(_) | Pattern::Alternator { .. } => true,
            Pattern::Chop { reference } => reference.is_some(),
            Pattern::FollowLast { last } => last.is_some(),
            Pattern::Sequence { steps, .. } => steps.is_some(),
        }
    }

    /// Fix the pattern against its first real outcome. No-op once seeded.
    pub fn seed(&mut self, base: Side) {
        match self {
            Pattern::Fixed(_) | Pattern::Alternator { .. } => {}
            Pattern::Chop { reference } => {
                reference.get_or_insert(base);
            }
            Pattern::FollowLast { last } => {
                last.get_or_insert(base);
            }
            Pattern::Sequence {
                template,
                steps,
                position,
            } => {
                if steps.is_none() {
                    *steps = Some(template.materialize(base));
                    *position = 0;
                }
            }
        }
    }

    /// The side this pattern would bet next.
    pub fn choice(&self) -> BetChoice {
        match self {
            Pattern::Fixed(side) => BetChoice::Bet(*side),
            Pattern::Alternator { cycle, position } => BetChoice::Bet(cycle[*position]),
            Pattern::Chop { reference } => match reference {
                Some(side) => BetChoice::Bet(side.opposite()),
                None => BetChoice::FreeHand,
            },
            Pattern::FollowLast { last } => match last {
                Some(side) => BetChoice::Bet(*side),
                None => BetChoice::FreeHand,
            },
            Pattern::Sequence {
                steps, position, ..
            } => match steps {
                Some(steps) => BetChoice::Bet(steps[*position]),
                None => BetChoice::FreeHand,
            },
        }
    }

    /// Move the cyclic pointer one step, if the pattern has one.
    pub fn step_forward(&mut self) {
        match self {
            Pattern::Alternator { cycle, position } => {
                *position = (*position + 1) % cycle.len();
            }
            Pattern::Sequence {
                steps: Some(steps),
                position,
                ..
            } => {
                *position = (*position + 1) % steps.len();
            }
            _ => {}
        }
    }

    /// Post-judgement update after a real hand won by `side`.
    pub fn observe(&mut self, side: Side) {
        self.step_forward();
        if let Pattern::FollowLast { last } = self {
            *last = Some(side);
        }
    }

    /// Current cyclic pointer, for patterns that have one.
    pub fn position(&self) -> Option<usize> {
        match self {
            Pattern::Alternator { position, .. } => Some(*position),
            Pattern::Sequence {
                steps: Some(_),
                position,
                ..
            } => Some(*position),
            _ => None,
        }
    }

    /// Materialised sequence, once seeded.
    pub fn steps(&self) -> Option<&[Side]> {
        match self {
            Pattern::Sequence {
                steps: Some(steps), ..
            } => Some(steps.as_slice()),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
