use serde::{Deserialize, Serialize};

use super::scoreboard::Scoreboard;

/// Transient notification raised after a delivery. Detection is an equality
/// check on the post-delivery records, so a batter substituted in already
/// past fifty produces nothing. Side effect only; never alters scoring
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Milestone {
    HalfCentury { batsman: String, runs: u32 },
    Century { batsman: String, runs: u32 },
    FiveWicketHaul { bowler: String },
}

impl Milestone {
    pub fn label(&self) -> &'static str {
        match self {
            Milestone::HalfCentury { .. } => "Half Century",
            Milestone::Century { .. } => "Century",
            Milestone::FiveWicketHaul { .. } => "Five Wicket Haul",
        }
    }
}

/// Check the batter who faced this delivery and the bowler who bowled it.
pub fn detect(board: &Scoreboard, faced_by: &str, bowler: &str) -> Vec<Milestone> {
    let mut milestones = Vec::new();

    if let Some(batsman) = board.batsmen.get(faced_by) {
        if batsman.runs == 50 {
            milestones.push(Milestone::HalfCentury { batsman: faced_by.to_string(), runs: 50 });
        } else if batsman.runs == 100 {
            milestones.push(Milestone::Century { batsman: faced_by.to_string(), runs: 100 });
        }
    }

    if let Some(record) = board.bowlers.get(bowler) {
        if record.wickets == 5 {
            milestones.push(Milestone::FiveWicketHaul { bowler: bowler.to_string() });
        }
    }

    milestones
}
