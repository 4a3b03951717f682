use serde::{Deserialize, Serialize};

use super::batting::BatsmanRecord;
use super::bowling::BowlerRecord;
use super::extras::ExtrasBreakdown;
use super::over::format_overs;

/// One bowler's line on the scorecard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerFigures {
    pub name: String,
    pub overs: String,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economy: Option<f64>,
}

impl BowlerFigures {
    pub fn from_record(name: impl Into<String>, record: &BowlerRecord) -> Self {
        Self {
            name: name.into(),
            overs: record.overs(),
            balls: record.balls,
            runs: record.runs,
            wickets: record.wickets,
            economy: record.economy(),
        }
    }
}

/// Read-only projection of one innings for display and export. Batsmen are
/// listed crease-first (striker, non-striker, other not-out, then dismissed
/// and retired in order of appearance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsSummary {
    pub batting_team: String,
    pub total_runs: i64,
    pub wickets: u8,
    pub balls: u32,
    pub overs: String,
    pub run_rate: f64,
    pub batsmen: Vec<BatsmanRecord>,
    pub bowlers: Vec<BowlerFigures>,
    pub extras: ExtrasBreakdown,
    pub extras_total: u32,
}

impl InningsSummary {
    /// Score line, e.g. "148/6 (19.4 ov)".
    pub fn score_line(&self) -> String {
        format!("{}/{} ({} ov)", self.total_runs, self.wickets, format_overs(self.balls))
    }
}

/// Both innings plus the result, ready for the (external) report generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub team1: String,
    pub team2: String,
    pub first_innings: InningsSummary,
    pub second_innings: InningsSummary,
    pub result: String,
}
