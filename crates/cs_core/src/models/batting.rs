use serde::{Deserialize, Serialize};

/// Availability of a batsman within one innings.
///
/// `Out` carries the dismissal label shown on the scorecard
/// (e.g. "Caught", "Run Out").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatterStatus {
    Batting,
    Out(String),
    Retired,
}

impl BatterStatus {
    pub fn is_batting(&self) -> bool {
        matches!(self, BatterStatus::Batting)
    }

    /// Scorecard text: "batting", "out (Caught)", "retired".
    pub fn display(&self) -> String {
        match self {
            BatterStatus::Batting => "batting".to_string(),
            BatterStatus::Out(method) => format!("out ({})", method),
            BatterStatus::Retired => "retired".to_string(),
        }
    }
}

/// Per-batsman aggregates for one innings. Created on first appearance
/// (opening pair, or incoming after a wicket/retirement) and never deleted;
/// dismissed batsmen stay on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatsmanRecord {
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub status: BatterStatus,
}

impl BatsmanRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            status: BatterStatus::Batting,
        }
    }

    /// Runs per 100 balls; `None` before the first ball faced.
    pub fn strike_rate(&self) -> Option<f64> {
        if self.balls == 0 {
            None
        } else {
            Some(self.runs as f64 / self.balls as f64 * 100.0)
        }
    }
}
