use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{
    format_overs, BatsmanRecord, BowlerRecord, BowlerFigures, DeliveryRecord, ExtrasBreakdown,
    InningsSummary, OverBall, Partnership,
};

/// Full mutable state of one innings. Owned and mutated exclusively by the
/// delivery processor; everything else reads it for presentation.
///
/// Batsman and bowler records are keyed by name, with separate order lists
/// preserving first appearance for scorecard display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub batting_team: String,
    pub total_runs: i64,
    pub total_wickets: u8,
    /// Legal deliveries only; wides and no-balls excluded.
    pub legal_balls: u32,
    pub batsmen: HashMap<String, BatsmanRecord>,
    pub batting_order: Vec<String>,
    pub bowlers: HashMap<String, BowlerRecord>,
    pub bowling_order: Vec<String>,
    pub striker: String,
    pub non_striker: String,
    pub current_bowler: Option<String>,
    pub extras: ExtrasBreakdown,
    /// Entries for the over in progress; cleared at over completion.
    pub over_balls: Vec<OverBall>,
    /// Per-over delivery journal; cleared together with `over_balls`.
    pub delivery_log: Vec<DeliveryRecord>,
    pub partnership: Partnership,
}

impl Scoreboard {
    pub fn new(batting_team: &str, striker: &str, non_striker: &str, bowler: &str) -> Self {
        let mut board = Self {
            batting_team: batting_team.to_string(),
            total_runs: 0,
            total_wickets: 0,
            legal_balls: 0,
            batsmen: HashMap::new(),
            batting_order: Vec::new(),
            bowlers: HashMap::new(),
            bowling_order: Vec::new(),
            striker: striker.to_string(),
            non_striker: non_striker.to_string(),
            current_bowler: Some(bowler.to_string()),
            extras: ExtrasBreakdown::default(),
            over_balls: Vec::new(),
            delivery_log: Vec::new(),
            partnership: Partnership::new(striker, non_striker, 0),
        };
        board.install_batsman(striker);
        board.install_batsman(non_striker);
        board.bowler_mut(bowler);
        board
    }

    /// Record for `name`, created on first appearance.
    pub fn batsman_mut(&mut self, name: &str) -> &mut BatsmanRecord {
        if !self.batsmen.contains_key(name) {
            self.batting_order.push(name.to_string());
        }
        self.batsmen.entry(name.to_string()).or_insert_with(|| BatsmanRecord::new(name))
    }

    /// Install a fresh record for an incoming batsman.
    pub fn install_batsman(&mut self, name: &str) {
        if !self.batsmen.contains_key(name) {
            self.batting_order.push(name.to_string());
        }
        self.batsmen.insert(name.to_string(), BatsmanRecord::new(name));
    }

    pub fn bowler_mut(&mut self, name: &str) -> &mut BowlerRecord {
        if !self.bowlers.contains_key(name) {
            self.bowling_order.push(name.to_string());
        }
        self.bowlers.entry(name.to_string()).or_default()
    }

    pub fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    /// Runs per over so far; 0 before the first legal ball.
    pub fn run_rate(&self) -> f64 {
        if self.legal_balls == 0 {
            0.0
        } else {
            self.total_runs as f64 / (self.legal_balls as f64 / 6.0)
        }
    }

    /// Batsmen in scorecard order: striker, non-striker, any other not-out
    /// batter, then dismissed/retired in order of appearance.
    pub fn ordered_batsmen(&self) -> Vec<&BatsmanRecord> {
        fn listed(result: &[&BatsmanRecord], name: &str) -> bool {
            result.iter().any(|b| b.name == name)
        }

        let mut result: Vec<&BatsmanRecord> = Vec::with_capacity(self.batting_order.len());
        if let Some(rec) = self.batsmen.get(&self.striker) {
            result.push(rec);
        }
        if self.non_striker != self.striker {
            if let Some(rec) = self.batsmen.get(&self.non_striker) {
                result.push(rec);
            }
        }
        for name in &self.batting_order {
            if let Some(rec) = self.batsmen.get(name) {
                if rec.status.is_batting() && !listed(&result, name) {
                    result.push(rec);
                }
            }
        }
        for name in &self.batting_order {
            if let Some(rec) = self.batsmen.get(name) {
                if !listed(&result, name) {
                    result.push(rec);
                }
            }
        }
        result
    }

    pub fn to_summary(&self) -> InningsSummary {
        InningsSummary {
            batting_team: self.batting_team.clone(),
            total_runs: self.total_runs,
            wickets: self.total_wickets,
            balls: self.legal_balls,
            overs: format_overs(self.legal_balls),
            run_rate: self.run_rate(),
            batsmen: self.ordered_batsmen().into_iter().cloned().collect(),
            bowlers: self
                .bowling_order
                .iter()
                .filter_map(|name| {
                    self.bowlers.get(name).map(|rec| BowlerFigures::from_record(name, rec))
                })
                .collect(),
            extras: self.extras.clone(),
            extras_total: self.extras.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BatterStatus;

    #[test]
    fn test_new_board_has_openers_and_bowler() {
        let board = Scoreboard::new("LIONS", "A", "B", "X");
        assert_eq!(board.batting_order, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(board.bowling_order, vec!["X".to_string()]);
        assert_eq!(board.current_bowler.as_deref(), Some("X"));
        assert!(board.partnership.is_pair("A", "B"));
    }

    #[test]
    fn test_ordered_batsmen_puts_crease_first_and_out_last() {
        let mut board = Scoreboard::new("LIONS", "A", "B", "X");
        board.batsman_mut("C").status = BatterStatus::Out("Bowled".into());
        board.install_batsman("D");
        board.striker = "D".to_string();

        let names: Vec<&str> = board.ordered_batsmen().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_run_rate() {
        let mut board = Scoreboard::new("LIONS", "A", "B", "X");
        assert_eq!(board.run_rate(), 0.0);
        board.total_runs = 48;
        board.legal_balls = 24;
        assert_eq!(board.run_rate(), 12.0);
    }
}
