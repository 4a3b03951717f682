use serde::{Deserialize, Serialize};

/// Which batter was dismissed in a run-out, as of delivery start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DismissedBatter {
    Striker,
    NonStriker,
}

/// Which end the wicket was broken at in a run-out. Also used to name a
/// crease slot when retiring a batter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchEnd {
    StrikerEnd,
    NonStrikerEnd,
}

/// Run-out specifics attached to a wicket event.
///
/// The dismissed batter is resolved from `who` when given; otherwise it is
/// inferred positionally from `end`. Providing neither is rejected as
/// invalid input rather than guessed at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutDetails {
    #[serde(default)]
    pub who: Option<DismissedBatter>,
    #[serde(default)]
    pub end: Option<PitchEnd>,
    /// Completed runs before the wicket fell; credited to the striker and
    /// bowler like a normal run, with the usual odd-run strike swap.
    #[serde(default)]
    pub runs_before: u32,
}

/// How the batter was out. `NegativeRuns` is the penalty action: a wicket
/// with full wicket bookkeeping plus a run deduction that lands in
/// `ExtrasBreakdown::negative` and never in any bowler's figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WicketMethod {
    Bowled,
    Caught,
    RunOut,
    Lbw,
    Stumped,
    HitWicket,
    HandledTheBall,
    ObstructingTheField,
    NegativeRuns { deduction: u32 },
}

impl WicketMethod {
    /// Scorecard label for the dismissal.
    pub fn label(&self) -> &'static str {
        match self {
            WicketMethod::Bowled => "Bowled",
            WicketMethod::Caught => "Caught",
            WicketMethod::RunOut => "Run Out",
            WicketMethod::Lbw => "LBW",
            WicketMethod::Stumped => "Stumped",
            WicketMethod::HitWicket => "Hit Wicket",
            WicketMethod::HandledTheBall => "Handled the ball",
            WicketMethod::ObstructingTheField => "Obstructing the field",
            WicketMethod::NegativeRuns { .. } => "Negative Runs",
        }
    }

    /// Run-outs are never credited to the bowler.
    pub fn credits_bowler(&self) -> bool {
        !matches!(self, WicketMethod::RunOut)
    }
}

/// One delivery as entered by the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum DeliveryEvent {
    /// Runs off the bat: 0..6 from the quick buttons.
    Run { runs: u32 },
    /// Manually entered batted runs; negative values are rejected.
    Manual { runs: i64 },
    /// Wide: all runs to extras and the bowler, no legal ball.
    Wide { runs: u32 },
    /// No-ball: one run to extras, the remainder batted; no legal ball.
    NoBall { runs: u32 },
    Bye { runs: u32 },
    LegBye { runs: u32 },
    Wicket {
        method: WicketMethod,
        /// Fielder/catcher credit, informational only.
        #[serde(default)]
        helper: Option<String>,
        /// Out batter when not the striker (non-run-out dismissals).
        #[serde(default)]
        out_name: Option<String>,
        /// Replacement batsman; mandatory.
        new_batsman: String,
        #[serde(default)]
        run_out: Option<RunOutDetails>,
    },
}

impl DeliveryEvent {
    /// Whether this delivery counts toward the six legal balls of an over.
    pub fn is_legal(&self) -> bool {
        !matches!(self, DeliveryEvent::Wide { .. } | DeliveryEvent::NoBall { .. })
    }

    /// Over-ledger display token.
    pub fn token(&self) -> String {
        match self {
            DeliveryEvent::Run { runs } => runs.to_string(),
            DeliveryEvent::Manual { runs } => runs.to_string(),
            DeliveryEvent::Wicket { .. } => "W".to_string(),
            DeliveryEvent::Wide { runs } => {
                if *runs == 1 {
                    "WD".to_string()
                } else {
                    format!("WD+{}", runs)
                }
            }
            DeliveryEvent::NoBall { runs } => {
                let batted = runs.saturating_sub(1);
                if batted == 0 {
                    "NB".to_string()
                } else {
                    format!("NB+{}", batted)
                }
            }
            DeliveryEvent::Bye { runs } => {
                if *runs == 1 {
                    "B".to_string()
                } else {
                    format!("B+{}", runs)
                }
            }
            DeliveryEvent::LegBye { runs } => {
                if *runs == 1 {
                    "LB".to_string()
                } else {
                    format!("LB+{}", runs)
                }
            }
        }
    }
}

/// Journal entry for one applied delivery within the current over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub event: DeliveryEvent,
    /// Legal-ball index within the over at delivery start (0..5).
    pub ball_index: u32,
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
}
