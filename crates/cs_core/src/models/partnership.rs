use serde::{Deserialize, Serialize};

/// Runs and balls accrued by the current pair of batsmen. Reset whenever
/// the pair identity changes (wicket, retirement, innings start); the swap
/// of ends at over completion does not change identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partnership {
    pub batsman_a: String,
    pub batsman_b: String,
    pub runs: u32,
    pub balls: u32,
    pub start_over: u32,
    pub start_ball: u32,
}

impl Partnership {
    /// Start a fresh partnership at the current innings position.
    pub fn new(batsman_a: impl Into<String>, batsman_b: impl Into<String>, legal_balls: u32) -> Self {
        Self {
            batsman_a: batsman_a.into(),
            batsman_b: batsman_b.into(),
            runs: 0,
            balls: 0,
            start_over: legal_balls / 6,
            start_ball: legal_balls % 6,
        }
    }

    /// Identity check as an unordered pair, so strike rotation alone never
    /// resets the partnership.
    pub fn is_pair(&self, striker: &str, non_striker: &str) -> bool {
        (self.batsman_a == striker && self.batsman_b == non_striker)
            || (self.batsman_a == non_striker && self.batsman_b == striker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_identity_is_unordered() {
        let p = Partnership::new("A", "B", 14);
        assert_eq!(p.start_over, 2);
        assert_eq!(p.start_ball, 2);
        assert!(p.is_pair("A", "B"));
        assert!(p.is_pair("B", "A"));
        assert!(!p.is_pair("A", "C"));
    }
}
