use serde::{Deserialize, Serialize};

/// Running totals of runs credited to the batting side without a batsman
/// scoring them. `negative` holds the magnitude of penalty deductions
/// applied through the negative-runs wicket action; it is displayed as part
/// of the extras line but subtracts from the team total and never touches
/// any bowler's figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrasBreakdown {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
    pub negative: u32,
}

impl ExtrasBreakdown {
    /// Scorecard extras total: the sum of every breakdown field, with the
    /// penalty magnitude counted as-is.
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes + self.negative
    }

    /// Signed contribution of extras to the team total.
    pub fn net_runs(&self) -> i64 {
        (self.wides + self.no_balls + self.byes + self.leg_byes) as i64 - self.negative as i64
    }
}
