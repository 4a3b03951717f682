use serde::{Deserialize, Serialize};

/// One entry of the current-over ledger. Every delivery gets an entry,
/// legal or not; the ledger is cleared only when the over completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverBall {
    /// Display token, e.g. "4", "W", "WD+2", "NB+3", "B", "LB".
    pub text: String,
    /// Whether this delivery counted toward the six legal balls.
    pub legal: bool,
}

/// "O.B" overs display from a legal-ball count, e.g. 27 -> "4.3".
pub fn format_overs(legal_balls: u32) -> String {
    format!("{}.{}", legal_balls / 6, legal_balls % 6)
}
