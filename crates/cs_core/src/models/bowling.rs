use serde::{Deserialize, Serialize};

use super::over::format_overs;

/// Per-bowler aggregates for one innings. Second-innings records start
/// empty and are independent of first-innings figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BowlerRecord {
    /// Legal deliveries bowled (wides and no-balls excluded).
    pub balls: u32,
    /// Runs conceded, including wides and no-balls but never penalty
    /// deductions.
    pub runs: u32,
    pub wickets: u32,
}

impl BowlerRecord {
    /// Overs-and-balls display, e.g. "4.3".
    pub fn overs(&self) -> String {
        format_overs(self.balls)
    }

    /// Runs per over; `None` before the first legal ball.
    pub fn economy(&self) -> Option<f64> {
        if self.balls == 0 {
            None
        } else {
            Some(self.runs as f64 / (self.balls as f64 / 6.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overs_and_economy() {
        let rec = BowlerRecord { balls: 27, runs: 36, wickets: 2 };
        assert_eq!(rec.overs(), "4.3");
        assert_eq!(rec.economy(), Some(8.0));

        assert_eq!(BowlerRecord::default().economy(), None);
    }
}
