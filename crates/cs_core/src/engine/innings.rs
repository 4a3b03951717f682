use std::fmt;

use serde::{Deserialize, Serialize};

/// Match-level state machine. Deliveries are accepted only in the two live
/// phases; `AwaitingSecondInnings` blocks until the chasing lineup is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    FirstInnings,
    AwaitingSecondInnings,
    SecondInnings,
    Complete,
}

impl MatchPhase {
    pub fn is_live(&self) -> bool {
        matches!(self, MatchPhase::FirstInnings | MatchPhase::SecondInnings)
    }

    pub fn innings_number(&self) -> u8 {
        match self {
            MatchPhase::FirstInnings => 1,
            _ => 2,
        }
    }
}

/// A follow-up choice the scorer must resolve before the next delivery is
/// accepted. Undo rolls the flag back together with the rest of the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingInput {
    NextBowler,
    SecondInningsLineup,
}

impl fmt::Display for PendingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingInput::NextBowler => write!(f, "a new bowler must be selected"),
            PendingInput::SecondInningsLineup => {
                write!(f, "the second-innings lineup must be set")
            }
        }
    }
}

/// Final outcome. `winner` is `None` for a tie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: Option<String>,
    pub text: String,
}

impl MatchResult {
    pub fn win(team: &str, total_runs: i64, wickets: u8) -> Self {
        Self {
            winner: Some(team.to_string()),
            text: format!("{} wins! ({} / {})", team, total_runs, wickets),
        }
    }

    pub fn win_on_overs(team: &str) -> Self {
        Self { winner: Some(team.to_string()), text: format!("{} wins!", team) }
    }

    pub fn tie() -> Self {
        Self { winner: None, text: "MATCH TIED".to_string() }
    }

    pub fn is_tie(&self) -> bool {
        self.winner.is_none()
    }
}
