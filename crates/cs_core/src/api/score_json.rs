//! JSON API for scoring a match through the global session.
//!
//! Every entry point takes a JSON request string and returns a JSON
//! response string, so host UIs only ever exchange strings with the core.
//! Requests carry a `schema_version` field checked against
//! [`crate::SCHEMA_VERSION`].

use serde::{Deserialize, Serialize};
use serde_json;

use crate::engine::{DeliveryOutcome, Lineup, MatchPhase, PendingInput, ScoringEngine};
use crate::models::{DeliveryEvent, MatchInfo, PitchEnd};
use crate::state;

#[derive(Debug, Deserialize)]
pub struct StartMatchRequest {
    pub schema_version: u8,
    pub info: MatchInfo,
    pub lineup: Lineup,
}

#[derive(Debug, Deserialize)]
pub struct DeliveryRequest {
    pub schema_version: u8,
    pub event: DeliveryEvent,
}

#[derive(Debug, Deserialize)]
pub struct BowlerRequest {
    pub schema_version: u8,
    pub bowler: String,
}

#[derive(Debug, Deserialize)]
pub struct SecondInningsRequest {
    pub schema_version: u8,
    pub lineup: Lineup,
}

#[derive(Debug, Deserialize)]
pub struct RetireRequest {
    pub schema_version: u8,
    pub end: PitchEnd,
    pub replacement: String,
}

#[derive(Debug, Deserialize)]
pub struct InningsSummaryRequest {
    pub schema_version: u8,
    pub innings: u8,
}

/// Snapshot of the match for display after any action.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub phase: MatchPhase,
    pub pending: Option<PendingInput>,
    pub batting_team: String,
    pub score_line: String,
    pub striker: String,
    pub non_striker: String,
    pub current_bowler: Option<String>,
    pub over_balls: Vec<String>,
    pub known_bowlers: Vec<String>,
    pub target: Option<i64>,
    pub current_run_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balls_remaining: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_run_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl StateView {
    fn from_engine(engine: &ScoringEngine) -> Self {
        let board = engine.board();
        let (required_runs, balls_remaining) = match engine.required_runs_and_balls() {
            Some((runs, balls)) => (Some(runs), Some(balls)),
            None => (None, None),
        };
        Self {
            phase: engine.phase(),
            pending: engine.pending(),
            batting_team: board.batting_team.clone(),
            score_line: board.to_summary().score_line(),
            striker: board.striker.clone(),
            non_striker: board.non_striker.clone(),
            current_bowler: board.current_bowler.clone(),
            over_balls: board.over_balls.iter().map(|b| b.text.clone()).collect(),
            known_bowlers: engine.known_bowlers().to_vec(),
            target: engine.target(),
            current_run_rate: engine.current_run_rate(),
            required_runs,
            balls_remaining,
            required_run_rate: engine.required_run_rate(),
            result: engine.result().map(|r| r.text.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeliveryResponse {
    pub outcome: DeliveryOutcome,
    pub state: StateView,
}

fn check_schema(version: u8) -> Result<(), String> {
    if version != crate::SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", version));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Failed to serialize response: {}", e))
}

/// Start a new match, replacing any session in progress.
pub fn start_match_json(request_json: &str) -> Result<String, String> {
    let request: StartMatchRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let engine = ScoringEngine::new(request.info, request.lineup).map_err(|e| e.to_string())?;
    let view = StateView::from_engine(&engine);
    state::get_state_mut().engine = Some(engine);
    to_json(&view)
}

/// Score one delivery against the session match.
pub fn score_delivery_json(request_json: &str) -> Result<String, String> {
    let request: DeliveryRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    let outcome = engine.process(request.event).map_err(|e| e.to_string())?;
    to_json(&DeliveryResponse { outcome, state: StateView::from_engine(engine) })
}

/// Roll back the most recent undoable action.
pub fn undo_json() -> Result<String, String> {
    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    engine.undo().map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Set the bowler for the next delivery.
pub fn select_bowler_json(request_json: &str) -> Result<String, String> {
    let request: BowlerRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    engine.select_bowler(&request.bowler).map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Install the chasing side's lineup and open the second innings.
pub fn start_second_innings_json(request_json: &str) -> Result<String, String> {
    let request: SecondInningsRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    engine.start_second_innings(request.lineup).map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Swap which batter is on strike.
pub fn swap_batsmen_json() -> Result<String, String> {
    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    engine.swap_batsmen().map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Retire the batter at the given end.
pub fn retire_batsman_json(request_json: &str) -> Result<String, String> {
    let request: RetireRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let mut session = state::get_state_mut();
    let engine = session.engine_mut().map_err(|e| e.to_string())?;
    engine.retire(request.end, &request.replacement).map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Scorecard for one innings, live or stored.
pub fn innings_summary_json(request_json: &str) -> Result<String, String> {
    let request: InningsSummaryRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    check_schema(request.schema_version)?;

    let session = state::get_state();
    let engine = session.engine().map_err(|e| e.to_string())?;
    let summary = engine.innings_summary(request.innings).map_err(|e| e.to_string())?;
    to_json(&summary)
}

/// Current display state of the session match.
pub fn match_state_json() -> Result<String, String> {
    let session = state::get_state();
    let engine = session.engine().map_err(|e| e.to_string())?;
    to_json(&StateView::from_engine(engine))
}

/// Full-match report once a result is in.
pub fn match_summary_json() -> Result<String, String> {
    let session = state::get_state();
    let engine = session.engine().map_err(|e| e.to_string())?;
    let summary = engine.match_summary().map_err(|e| e.to_string())?;
    to_json(&summary)
}
