//! Strategy engine — prediction patterns, the Star 2.0 stake ladder, the
//! per-bettor progression, and the advisory overlays built on top of it.

pub mod bettor;
pub mod dalembert;
pub mod ladder;
pub mod meta;
pub mod pattern;

pub use bettor::{Bettor, BettorView, ProgressionConfig};
pub use dalembert::{DAlembertEntry, DAlembertProgression};
pub use ladder::StakeLadder;
pub use meta::{MetaAdvisor, MetaConfig, Suggestion};
pub use pattern::{Pattern, SequenceTemplate};
