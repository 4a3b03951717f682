//! Match engine: owns the scoreboard, the innings state machine and the
//! undo history, and turns delivery events into scoreboard transitions.
//!
//! Every mutating action validates first, snapshots second, mutates third,
//! so a popped snapshot always restores the exact pre-action state.

pub mod history;
pub mod innings;
pub mod milestones;
mod processor;
pub mod scoreboard;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoringError};
use crate::models::{
    BatterStatus, DeliveryEvent, InningsSummary, MatchInfo, MatchSummary, Partnership, PitchEnd,
};

pub use history::SnapshotHistory;
pub use innings::{MatchPhase, MatchResult, PendingInput};
pub use milestones::Milestone;
pub use scoreboard::Scoreboard;

/// Everything that undo rolls back as one unit: the live scoreboard plus
/// the match-level phase, pending flag, target and stored summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCore {
    pub board: Scoreboard,
    pub phase: MatchPhase,
    pub pending: Option<PendingInput>,
    pub first_innings_score: Option<i64>,
    /// First-innings score plus one; set when the first innings closes.
    pub target: Option<i64>,
    pub first_innings: Option<InningsSummary>,
    pub second_innings: Option<InningsSummary>,
    pub result: Option<MatchResult>,
}

/// Opening lineup for an innings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub striker: String,
    pub non_striker: String,
    pub bowler: String,
}

impl Lineup {
    fn validated(&self) -> Result<(String, String, String)> {
        let striker = self.striker.trim();
        let non_striker = self.non_striker.trim();
        let bowler = self.bowler.trim();
        if striker.is_empty() || non_striker.is_empty() {
            return Err(ScoringError::IncompleteLineup(
                "both opening batsmen are required".to_string(),
            ));
        }
        if bowler.is_empty() {
            return Err(ScoringError::IncompleteLineup("an opening bowler is required".to_string()));
        }
        if striker == non_striker {
            return Err(ScoringError::IncompleteLineup(
                "the two batsmen must be different".to_string(),
            ));
        }
        Ok((striker.to_string(), non_striker.to_string(), bowler.to_string()))
    }
}

/// What one accepted delivery did at the match level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOutcome {
    pub over_completed: bool,
    /// The next delivery is blocked until `select_bowler` is called.
    pub needs_new_bowler: bool,
    pub innings_closed: bool,
    pub result: Option<MatchResult>,
    pub milestones: Vec<Milestone>,
}

/// The scoring engine for one match.
///
/// Construction starts the first innings directly; the second innings
/// starts explicitly via [`ScoringEngine::start_second_innings`] once the
/// first closes. All state needed to resume a match serializes with the
/// engine except the undo history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringEngine {
    info: MatchInfo,
    core: MatchCore,
    #[serde(skip)]
    history: SnapshotHistory,
    /// Bowlers seen so far, for next-bowler prompts.
    known_bowlers: Vec<String>,
}

impl ScoringEngine {
    pub fn new(info: MatchInfo, lineup: Lineup) -> Result<Self> {
        let (striker, non_striker, bowler) = lineup.validated()?;
        let batting = info.first_batting().to_string();
        let board = Scoreboard::new(&batting, &striker, &non_striker, &bowler);
        let mut engine = Self {
            info,
            core: MatchCore {
                board,
                phase: MatchPhase::FirstInnings,
                pending: None,
                first_innings_score: None,
                target: None,
                first_innings: None,
                second_innings: None,
                result: None,
            },
            history: SnapshotHistory::new(),
            known_bowlers: Vec::new(),
        };
        engine.remember_bowler(&bowler);
        log::info!("match started: {} v {}, {} batting", engine.info.team1, engine.info.team2, engine.core.board.batting_team);
        Ok(engine)
    }

    pub fn info(&self) -> &MatchInfo {
        &self.info
    }

    pub fn board(&self) -> &Scoreboard {
        &self.core.board
    }

    pub fn phase(&self) -> MatchPhase {
        self.core.phase
    }

    pub fn pending(&self) -> Option<PendingInput> {
        self.core.pending
    }

    pub fn target(&self) -> Option<i64> {
        self.core.target
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.core.result.as_ref()
    }

    pub fn known_bowlers(&self) -> &[String] {
        &self.known_bowlers
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Score one delivery. Rejected without any state change while the
    /// match is complete, an innings break is open, or a pending input is
    /// unresolved.
    pub fn process(&mut self, event: DeliveryEvent) -> Result<DeliveryOutcome> {
        self.ensure_live()?;
        self.ensure_no_pending()?;
        let bowler =
            self.core.board.current_bowler.clone().ok_or(ScoringError::NoActiveBowler)?;
        processor::validate(&self.core.board, &event)?;

        self.history.push(self.core.clone());
        let applied = processor::apply(&mut self.core.board, &event, &bowler);

        self.track_partnership(applied.batted_runs, applied.legal);

        let milestones = milestones::detect(&self.core.board, &applied.faced_by, &bowler);
        for milestone in &milestones {
            log::info!("{}: {:?}", milestone.label(), milestone);
        }

        let mut outcome = DeliveryOutcome {
            over_completed: applied.over_completed,
            needs_new_bowler: false,
            innings_closed: false,
            result: None,
            milestones,
        };

        match self.core.phase {
            MatchPhase::FirstInnings => {
                if self.innings_exhausted() {
                    self.close_first_innings();
                    outcome.innings_closed = true;
                    return Ok(outcome);
                }
            }
            MatchPhase::SecondInnings => {
                if let Some(result) = self.second_innings_result() {
                    self.complete_match(result.clone());
                    outcome.innings_closed = true;
                    outcome.result = Some(result);
                    return Ok(outcome);
                }
            }
            _ => {}
        }

        if applied.over_completed {
            self.core.pending = Some(PendingInput::NextBowler);
            outcome.needs_new_bowler = true;
        }
        Ok(outcome)
    }

    /// Set the bowler for the next delivery. Fulfilling an end-of-over
    /// prompt is part of the previous delivery's action and adds no
    /// snapshot; a mid-over change is its own undoable action.
    pub fn select_bowler(&mut self, name: &str) -> Result<()> {
        self.ensure_live()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ScoringError::InvalidInput("bowler name cannot be empty".to_string()));
        }
        match self.core.pending {
            Some(PendingInput::NextBowler) => {
                self.core.board.current_bowler = Some(name.to_string());
                self.core.board.bowler_mut(name);
                self.core.pending = None;
            }
            _ => {
                self.history.push(self.core.clone());
                self.core.board.current_bowler = Some(name.to_string());
                self.core.board.bowler_mut(name);
            }
        }
        self.remember_bowler(name);
        Ok(())
    }

    /// Close the innings break by installing the chasing side's lineup.
    pub fn start_second_innings(&mut self, lineup: Lineup) -> Result<()> {
        if self.core.phase != MatchPhase::AwaitingSecondInnings {
            return Err(ScoringError::InvalidInput(
                "the second innings can only start after the first closes".to_string(),
            ));
        }
        let (striker, non_striker, bowler) = lineup.validated()?;
        let first_team = self.core.board.batting_team.clone();
        let chasing = self.info.other_team(&first_team).to_string();
        self.core.board = Scoreboard::new(&chasing, &striker, &non_striker, &bowler);
        self.core.phase = MatchPhase::SecondInnings;
        self.core.pending = None;
        self.history.clear();
        self.remember_bowler(&bowler);
        log::info!("second innings: {} chasing {}", chasing, self.core.target.unwrap_or(0));
        Ok(())
    }

    /// Roll back the most recent undoable action, whatever it was. Works
    /// across over boundaries, innings closes and the final result.
    pub fn undo(&mut self) -> Result<()> {
        match self.history.pop() {
            Some(core) => {
                self.core = core;
                Ok(())
            }
            None => Err(ScoringError::NothingToUndo),
        }
    }

    /// Swap which batter is on strike without scoring anything.
    pub fn swap_batsmen(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.ensure_no_pending()?;
        self.history.push(self.core.clone());
        self.core.board.swap_strike();
        Ok(())
    }

    /// Retire the batter at `end`. No wicket is recorded and no ball is
    /// counted; the replacement takes over the vacated crease slot.
    pub fn retire(&mut self, end: PitchEnd, replacement: &str) -> Result<()> {
        self.ensure_live()?;
        self.ensure_no_pending()?;
        let replacement = replacement.trim();
        if replacement.is_empty() {
            return Err(ScoringError::MissingReplacement);
        }
        self.history.push(self.core.clone());
        let board = &mut self.core.board;
        let retiring = match end {
            PitchEnd::StrikerEnd => board.striker.clone(),
            PitchEnd::NonStrikerEnd => board.non_striker.clone(),
        };
        board.batsman_mut(&retiring).status = BatterStatus::Retired;
        match end {
            PitchEnd::StrikerEnd => board.striker = replacement.to_string(),
            PitchEnd::NonStrikerEnd => board.non_striker = replacement.to_string(),
        }
        board.install_batsman(replacement);
        board.partnership =
            Partnership::new(&board.striker, &board.non_striker, board.legal_balls);
        Ok(())
    }

    /// Runs per over scored so far in the innings in progress.
    pub fn current_run_rate(&self) -> f64 {
        self.core.board.run_rate()
    }

    /// Runs still needed and balls left in the chase; `None` outside a
    /// limited-overs second innings.
    pub fn required_runs_and_balls(&self) -> Option<(i64, u32)> {
        if self.core.phase != MatchPhase::SecondInnings {
            return None;
        }
        let target = self.core.target?;
        let limit = self.info.overs_limit?;
        let needed = (target - self.core.board.total_runs).max(0);
        let balls_left = (limit * 6).saturating_sub(self.core.board.legal_balls);
        Some((needed, balls_left))
    }

    pub fn required_run_rate(&self) -> Option<f64> {
        let (needed, balls_left) = self.required_runs_and_balls()?;
        if balls_left == 0 {
            return None;
        }
        Some(needed as f64 / (balls_left as f64 / 6.0))
    }

    /// Scorecard for innings 1 or 2: the stored summary once that innings
    /// has closed, a live projection while it is in progress.
    pub fn innings_summary(&self, number: u8) -> Result<InningsSummary> {
        match number {
            1 => match &self.core.first_innings {
                Some(summary) => Ok(summary.clone()),
                None => Ok(self.core.board.to_summary()),
            },
            2 => match &self.core.second_innings {
                Some(summary) => Ok(summary.clone()),
                None if self.core.phase == MatchPhase::SecondInnings => {
                    Ok(self.core.board.to_summary())
                }
                None => Err(ScoringError::InvalidInput(
                    "the second innings has not started".to_string(),
                )),
            },
            n => Err(ScoringError::InvalidInput(format!("no innings {}", n))),
        }
    }

    /// Full-match report, available once a result is in.
    pub fn match_summary(&self) -> Result<MatchSummary> {
        match (&self.core.first_innings, &self.core.second_innings, &self.core.result) {
            (Some(first), Some(second), Some(result)) => Ok(MatchSummary {
                team1: self.info.team1.clone(),
                team2: self.info.team2.clone(),
                first_innings: first.clone(),
                second_innings: second.clone(),
                result: result.text.clone(),
            }),
            _ => Err(ScoringError::InvalidInput("the match is not complete".to_string())),
        }
    }

    fn ensure_live(&self) -> Result<()> {
        match self.core.phase {
            MatchPhase::Complete => Err(ScoringError::MatchComplete),
            MatchPhase::AwaitingSecondInnings => {
                Err(ScoringError::AwaitingInput(PendingInput::SecondInningsLineup))
            }
            _ => Ok(()),
        }
    }

    // Only undo and the bowler prompt itself may run while a follow-up
    // choice is unresolved.
    fn ensure_no_pending(&self) -> Result<()> {
        match self.core.pending {
            Some(pending) => Err(ScoringError::AwaitingInput(pending)),
            None => Ok(()),
        }
    }

    fn remember_bowler(&mut self, name: &str) {
        if !self.known_bowlers.iter().any(|b| b == name) {
            self.known_bowlers.push(name.to_string());
        }
    }

    /// Accrue onto the current partnership, or start a fresh one when the
    /// pair at the crease changed. Only batted runs count, so extras-only
    /// deliveries contribute nothing. Identity is unordered, so strike
    /// rotation alone never resets it.
    fn track_partnership(&mut self, batted_runs: u32, legal: bool) {
        let board = &mut self.core.board;
        if board.partnership.is_pair(&board.striker, &board.non_striker) {
            board.partnership.runs += batted_runs;
            if legal {
                board.partnership.balls += 1;
            }
        } else {
            board.partnership =
                Partnership::new(&board.striker, &board.non_striker, board.legal_balls);
        }
    }

    fn innings_exhausted(&self) -> bool {
        let board = &self.core.board;
        if board.total_wickets >= 10 {
            return true;
        }
        match self.info.overs_limit {
            Some(limit) => board.legal_balls >= limit * 6,
            None => false,
        }
    }

    fn close_first_innings(&mut self) {
        let summary = self.core.board.to_summary();
        log::info!("first innings closed: {}", summary.score_line());
        self.core.first_innings_score = Some(summary.total_runs);
        self.core.target = Some(summary.total_runs + 1);
        self.core.first_innings = Some(summary);
        self.core.phase = MatchPhase::AwaitingSecondInnings;
        self.core.pending = None;
    }

    /// A result, if the chase is decided. Target reached wins immediately,
    /// mid-over included; otherwise the innings must be exhausted, and the
    /// totals decide between a tie and a defenders' win.
    fn second_innings_result(&self) -> Option<MatchResult> {
        let board = &self.core.board;
        let target = self.core.target?;
        if board.total_runs >= target {
            return Some(MatchResult::win(
                &board.batting_team,
                board.total_runs,
                board.total_wickets,
            ));
        }
        if self.innings_exhausted() {
            let first_score = self.core.first_innings_score?;
            if board.total_runs == first_score {
                return Some(MatchResult::tie());
            }
            return Some(MatchResult::win_on_overs(self.info.other_team(&board.batting_team)));
        }
        None
    }

    fn complete_match(&mut self, result: MatchResult) {
        self.core.second_innings = Some(self.core.board.to_summary());
        log::info!("match complete: {}", result.text);
        self.core.result = Some(result);
        self.core.phase = MatchPhase::Complete;
        self.core.pending = None;
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use crate::models::ExtrasBreakdown;
    use proptest::prelude::*;

    fn simple_event() -> impl Strategy<Value = DeliveryEvent> {
        prop_oneof![
            (0u32..=6).prop_map(|runs| DeliveryEvent::Run { runs }),
            (1u32..=3).prop_map(|runs| DeliveryEvent::Wide { runs }),
            (1u32..=5).prop_map(|runs| DeliveryEvent::NoBall { runs }),
            (1u32..=2).prop_map(|runs| DeliveryEvent::Bye { runs }),
            (1u32..=2).prop_map(|runs| DeliveryEvent::LegBye { runs }),
        ]
    }

    fn fresh_engine() -> ScoringEngine {
        let info = crate::models::MatchInfo {
            team1: "LIONS".to_string(),
            team2: "TIGERS".to_string(),
            toss_winner: None,
            toss_decision: None,
            ground: None,
            date: None,
            overs_limit: Some(50),
        };
        let lineup = Lineup {
            striker: "A".to_string(),
            non_striker: "B".to_string(),
            bowler: "X".to_string(),
        };
        ScoringEngine::new(info, lineup).expect("valid setup")
    }

    fn extras_net(extras: &ExtrasBreakdown) -> i64 {
        extras.net_runs()
    }

    proptest! {
        #[test]
        fn prop_runs_and_balls_are_conserved(events in proptest::collection::vec(simple_event(), 1..40)) {
            let mut e = fresh_engine();
            for event in events {
                if e.pending().is_some() {
                    e.select_bowler("X").unwrap();
                }
                e.process(event).unwrap();
            }
            let board = e.board();
            let batted: i64 = board.batsmen.values().map(|b| b.runs as i64).sum();
            prop_assert_eq!(board.total_runs, batted + extras_net(&board.extras));

            let faced: u32 = board.batsmen.values().map(|b| b.balls).sum();
            prop_assert_eq!(board.legal_balls, faced);

            let bowled: u32 = board.bowlers.values().map(|b| b.balls).sum();
            prop_assert_eq!(board.legal_balls, bowled);
        }

        #[test]
        fn prop_undo_restores_previous_state(events in proptest::collection::vec(simple_event(), 1..20), last in simple_event()) {
            let mut e = fresh_engine();
            for event in events {
                if e.pending().is_some() {
                    e.select_bowler("X").unwrap();
                }
                e.process(event).unwrap();
            }
            if e.pending().is_some() {
                e.select_bowler("X").unwrap();
            }
            let before = e.board().clone();
            let pending_before = e.pending();
            e.process(last).unwrap();
            e.undo().unwrap();
            prop_assert_eq!(e.board(), &before);
            prop_assert_eq!(e.pending(), pending_before);
        }
    }
}
