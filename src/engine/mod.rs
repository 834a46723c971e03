//! Core engine — the session orchestrator and its input boundary.

pub mod input;
pub mod session;

pub use input::{format_outcomes, parse_outcomes};
pub use session::{default_roster, RosterEntry, Session, SessionConfig, SessionSnapshot};
