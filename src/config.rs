//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs. Every
//! section and key is optional; missing values fall back to the canonical
//! defaults (full pattern catalogue, 12-rung ladder, unit 10).

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;

use crate::engine::{default_roster, RosterEntry, SessionConfig};
use crate::strategy::{MetaConfig, ProgressionConfig, StakeLadder};
use crate::types::BakuraError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionSection,
    pub progression: ProgressionSection,
    pub meta: MetaSection,
    pub dalembert: DAlembertSection,
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionSection {
    pub unit: Decimal,
    /// Roster in display order. Defaults to one bettor per pattern kind.
    pub roster: Vec<RosterEntry>,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            unit: dec!(10),
            roster: default_roster(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ProgressionSection {
    /// Custom multiplier table. `None` keeps the canonical ladder.
    pub ladder: Option<Vec<Decimal>>,
    pub count_first_miss: bool,
    pub tie_advances_sequence: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MetaSection {
    pub banker_win_prob: Decimal,
    pub player_win_prob: Decimal,
    pub banker_payout: Decimal,
}

impl Default for MetaSection {
    fn default() -> Self {
        let defaults = MetaConfig::default();
        Self {
            banker_win_prob: defaults.banker_win_prob,
            player_win_prob: defaults.player_win_prob,
            banker_payout: defaults.banker_payout,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DAlembertSection {
    pub unit: Decimal,
}

impl Default for DAlembertSection {
    fn default() -> Self {
        Self { unit: dec!(10) }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8501,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {path}"))?;
        Ok(config)
    }

    /// Check everything a session would reject, so a bad file fails at
    /// startup rather than on first use.
    pub fn validate(&self) -> Result<(), BakuraError> {
        self.session_config()?;
        if self.dalembert.unit <= Decimal::ZERO {
            return Err(BakuraError::InvalidUnit(self.dalembert.unit));
        }
        let probs = self.meta.banker_win_prob + self.meta.player_win_prob;
        if self.meta.banker_win_prob < Decimal::ZERO
            || self.meta.player_win_prob < Decimal::ZERO
            || probs > Decimal::ONE
        {
            return Err(BakuraError::Config(format!(
                "win probabilities must be non-negative and sum to at most 1 (got {probs})"
            )));
        }
        Ok(())
    }

    pub fn progression_config(&self) -> Result<ProgressionConfig, BakuraError> {
        let ladder = match &self.progression.ladder {
            Some(multipliers) => StakeLadder::new(multipliers.clone())?,
            None => StakeLadder::canonical(),
        };
        Ok(ProgressionConfig {
            ladder,
            count_first_miss: self.progression.count_first_miss,
            tie_advances_sequence: self.progression.tie_advances_sequence,
        })
    }

    pub fn session_config(&self) -> Result<SessionConfig, BakuraError> {
        if self.session.unit <= Decimal::ZERO {
            return Err(BakuraError::InvalidUnit(self.session.unit));
        }
        if self.session.roster.is_empty() {
            return Err(BakuraError::EmptyRoster);
        }
        Ok(SessionConfig {
            unit: self.session.unit,
            roster: self.session.roster.clone(),
            progression: self.progression_config()?,
        })
    }

    pub fn meta_config(&self) -> MetaConfig {
        MetaConfig {
            banker_win_prob: self.meta.banker_win_prob,
            player_win_prob: self.meta.player_win_prob,
            banker_payout: self.meta.banker_payout,
        }
    }
}
