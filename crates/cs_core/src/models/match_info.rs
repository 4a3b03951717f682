use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Batting,
    Bowling,
}

/// Fixed match metadata entered at setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub team1: String,
    pub team2: String,
    #[serde(default)]
    pub toss_winner: Option<String>,
    #[serde(default)]
    pub toss_decision: Option<TossDecision>,
    #[serde(default)]
    pub ground: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Overs per innings; `None` means unlimited.
    #[serde(default)]
    pub overs_limit: Option<u32>,
}

impl MatchInfo {
    /// Side batting first: the toss winner if they chose to bat, the other
    /// side if they chose to bowl, team1 when no toss was recorded.
    pub fn first_batting(&self) -> &str {
        match (&self.toss_winner, self.toss_decision) {
            (Some(winner), Some(TossDecision::Batting)) => winner,
            (Some(winner), Some(TossDecision::Bowling)) => {
                if winner == &self.team1 {
                    &self.team2
                } else {
                    &self.team1
                }
            }
            _ => &self.team1,
        }
    }

    pub fn other_team(&self, team: &str) -> &str {
        if team == self.team1 {
            &self.team2
        } else {
            &self.team1
        }
    }
}
