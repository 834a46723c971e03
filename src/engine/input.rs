//! Outcome input parsing.
//!
//! Turns pasted board text into outcomes before anything reaches the
//! session. Validation is all-or-nothing: one bad character rejects the
//! whole input.

use crate::types::{BakuraError, Outcome};

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | ';' | '-' | '|')
}

/// Parse single-character tokens (`B`, `P`, `T`, any case).
pub fn parse_outcomes(text: &str) -> Result<Vec<Outcome>, BakuraError> {
    let mut outcomes = Vec::new();

    for (idx, c) in text.chars().enumerate() {
        if is_separator(c) {
            continue;
        }
        let outcome = match c.to_ascii_uppercase() {
            'B' => Outcome::Banker,
            'P' => Outcome::Player,
            'T' => Outcome::Tie,
            _ => {
                return Err(BakuraError::InvalidOutcome {
                    token: c.to_string(),
                    position: Some(idx + 1),
                })
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Render outcomes back into board letters.
pub fn format_outcomes(outcomes: &[Outcome]) -> String {
    outcomes.iter().map(|o| o.code()).collect()
}
