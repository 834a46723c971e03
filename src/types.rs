//! Shared types for the BAKURA tracker.
//!
//! Outcomes, sides, pattern identifiers and the per-hand markers used by
//! the strategy, engine and dashboard modules. Kept free of behaviour so
//! every other module can depend on them without circular references.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Sides & outcomes
// ---------------------------------------------------------------------------

/// A side that can be bet on. Ties are never predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Banker,
    Player,
}

impl Side {
    /// The opposite side.
    pub fn opposite(&self) -> Self {
        match self {
            Side::Banker => Side::Player,
            Side::Player => Side::Banker,
        }
    }

    /// Single-letter code used on the board ("B" / "P").
    pub fn code(&self) -> char {
        match self {
            Side::Banker => 'B',
            Side::Player => 'P',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Banker => write!(f, "Banker"),
            Side::Player => write!(f, "Player"),
        }
    }
}

/// Result of a single baccarat hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Banker,
    Player,
    Tie,
}

impl Outcome {
    /// The winning side, or `None` for a tie.
    pub fn side(&self) -> Option<Side> {
        match self {
            Outcome::Banker => Some(Side::Banker),
            Outcome::Player => Some(Side::Player),
            Outcome::Tie => None,
        }
    }

    /// Board letter: the side's code, or 'T' for a tie.
    pub fn code(&self) -> char {
        self.side().map_or('T', |side| side.code())
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Banker => write!(f, "Banker"),
            Outcome::Player => write!(f, "Player"),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}

/// Parse an outcome from a button token or word (case-insensitive).
impl std::str::FromStr for Outcome {
    type Err = BakuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "b" | "banker" => Ok(Outcome::Banker),
            "p" | "player" => Ok(Outcome::Player),
            "t" | "tie" => Ok(Outcome::Tie),
            _ => Err(BakuraError::InvalidOutcome {
                token: s.trim().to_string(),
                position: None,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-hand bookkeeping
// ---------------------------------------------------------------------------

/// What a bettor did on one hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandMark {
    Hit,
    Miss,
    /// No prediction and no stake (pre-seed, tie, or no choice).
    Free,
}

impl fmt::Display for HandMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandMark::Hit => write!(f, "✓"),
            HandMark::Miss => write!(f, "✗"),
            HandMark::Free => write!(f, "·"),
        }
    }
}

/// A bettor's decision for the upcoming hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetChoice {
    Bet(Side),
    FreeHand,
}

impl BetChoice {
    pub fn side(&self) -> Option<Side> {
        match self {
            BetChoice::Bet(side) => Some(*side),
            BetChoice::FreeHand => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern catalogue
// ---------------------------------------------------------------------------

/// The fixed catalogue of bettor behaviours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    BankerOnly,
    PlayerOnly,
    AlternatorStartBanker,
    AlternatorStartPlayer,
    Chop,
    FollowLast,
    TerrificTwos,
    ThreePattern,
    OneTwoOne,
    TwoThreeTwo,
    #[serde(rename = "pattern_1313")]
    Pattern1313,
}

impl PatternKind {
    /// Every kind, in default roster order.
    pub const ALL: &'static [PatternKind] = &[
        PatternKind::BankerOnly,
        PatternKind::PlayerOnly,
        PatternKind::AlternatorStartBanker,
        PatternKind::AlternatorStartPlayer,
        PatternKind::Chop,
        PatternKind::FollowLast,
        PatternKind::TerrificTwos,
        PatternKind::ThreePattern,
        PatternKind::OneTwoOne,
        PatternKind::TwoThreeTwo,
        PatternKind::Pattern1313,
    ];

    /// Whether the kind waits for a first non-tie outcome before betting.
    pub fn needs_seed(&self) -> bool {
        !matches!(
            self,
            PatternKind::BankerOnly
                | PatternKind::PlayerOnly
                | PatternKind::AlternatorStartBanker
                | PatternKind::AlternatorStartPlayer
        )
    }

    /// Stable snake_case identifier (the config / API spelling).
    pub fn id(&self) -> &'static str {
        match self {
            PatternKind::BankerOnly => "banker_only",
            PatternKind::PlayerOnly => "player_only",
            PatternKind::AlternatorStartBanker => "alternator_start_banker",
            PatternKind::AlternatorStartPlayer => "alternator_start_player",
            PatternKind::Chop => "chop",
            PatternKind::FollowLast => "follow_last",
            PatternKind::TerrificTwos => "terrific_twos",
            PatternKind::ThreePattern => "three_pattern",
            PatternKind::OneTwoOne => "one_two_one",
            PatternKind::TwoThreeTwo => "two_three_two",
            PatternKind::Pattern1313 => "pattern_1313",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PatternKind::BankerOnly => "Banker Only",
            PatternKind::PlayerOnly => "Player Only",
            PatternKind::AlternatorStartBanker => "Alternator (B first)",
            PatternKind::AlternatorStartPlayer => "Alternator (P first)",
            PatternKind::Chop => "Chop",
            PatternKind::FollowLast => "Follow Last",
            PatternKind::TerrificTwos => "Terrific Twos",
            PatternKind::ThreePattern => "Three Pattern",
            PatternKind::OneTwoOne => "1-2-1",
            PatternKind::TwoThreeTwo => "2-3-2",
            PatternKind::Pattern1313 => "1-3-1-3",
        };
        write!(f, "{label}")
    }
}

/// Look up a pattern kind by identifier. Unknown names are a configuration
/// error.
impl std::str::FromStr for PatternKind {
    type Err = BakuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        PatternKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| BakuraError::UnknownPattern(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// D'Alembert results
// ---------------------------------------------------------------------------

/// Result of a single even-money bet, for the D'Alembert tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetResult {
    Win,
    Loss,
    Push,
}

impl fmt::Display for BetResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetResult::Win => write!(f, "W"),
            BetResult::Loss => write!(f, "L"),
            BetResult::Push => write!(f, "T"),
        }
    }
}

impl std::str::FromStr for BetResult {
    type Err = BakuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "w" | "win" => Ok(BetResult::Win),
            "l" | "loss" | "lose" => Ok(BetResult::Loss),
            "t" | "tie" | "push" => Ok(BetResult::Push),
            _ => Err(BakuraError::InvalidResult(s.trim().to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for BAKURA.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BakuraError {
    #[error("Unknown pattern kind: {0}")]
    UnknownPattern(String),

    #[error("Invalid outcome token '{token}'{}", .position.map(|p| format!(" at position {p}")).unwrap_or_default())]
    InvalidOutcome {
        token: String,
        /// 1-based character position inside pasted text, if any.
        position: Option<usize>,
    },

    #[error("Invalid bet result: {0} (expected W, L or T)")]
    InvalidResult(String),

    #[error("Unit must be positive, got {0}")]
    InvalidUnit(Decimal),

    #[error("Invalid stake ladder: {0}")]
    InvalidLadder(String),

    #[error("Roster must contain at least one bettor")]
    EmptyRoster,

    #[error("Configuration error: {0}")]
    Config(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
