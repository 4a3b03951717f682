//! The delivery-processing core: consumes one delivery event and derives
//! the next scoreboard state. Validation is strictly separated from
//! mutation so the caller can snapshot between the two and keep every
//! event all-or-nothing.

use crate::error::{Result, ScoringError};
use crate::models::{
    BatterStatus, DeliveryEvent, DeliveryRecord, DismissedBatter, OverBall, PitchEnd,
    RunOutDetails, WicketMethod,
};

use super::scoreboard::Scoreboard;

/// What a successfully applied delivery did, for the caller's follow-up
/// bookkeeping (partnership, milestones, over/innings transitions).
#[derive(Debug, Clone)]
pub(crate) struct Applied {
    pub legal: bool,
    pub over_completed: bool,
    /// Runs credited off the bat (0 for extras-only deliveries).
    pub batted_runs: u32,
    /// The batter on strike when the ball was bowled.
    pub faced_by: String,
    pub wicket_fell: bool,
}

/// Reject malformed events before any state is touched.
pub(crate) fn validate(board: &Scoreboard, event: &DeliveryEvent) -> Result<()> {
    match event {
        DeliveryEvent::Run { .. } => Ok(()),
        DeliveryEvent::Manual { runs } => {
            if *runs < 0 {
                Err(ScoringError::InvalidInput(
                    "manual runs cannot be negative; use the negative-runs wicket action"
                        .to_string(),
                ))
            } else if u32::try_from(*runs).is_err() {
                Err(ScoringError::InvalidInput(format!("manual runs out of range: {}", runs)))
            } else {
                Ok(())
            }
        }
        DeliveryEvent::Wide { runs }
        | DeliveryEvent::NoBall { runs }
        | DeliveryEvent::Bye { runs }
        | DeliveryEvent::LegBye { runs } => {
            if *runs == 0 {
                Err(ScoringError::InvalidInput(
                    "extras deliveries carry at least one run".to_string(),
                ))
            } else {
                Ok(())
            }
        }
        DeliveryEvent::Wicket { method, new_batsman, run_out, .. } => {
            if board.total_wickets >= 10 {
                return Err(ScoringError::InvalidInput(
                    "all ten wickets have already fallen".to_string(),
                ));
            }
            if new_batsman.trim().is_empty() {
                return Err(ScoringError::MissingReplacement);
            }
            if let WicketMethod::NegativeRuns { deduction } = method {
                if *deduction == 0 {
                    return Err(ScoringError::InvalidInput(
                        "penalty deduction must be positive".to_string(),
                    ));
                }
            }
            if let Some(ro) = run_out {
                if ro.who.is_none() && ro.end.is_none() {
                    return Err(ScoringError::InvalidInput(
                        "run-out needs the dismissed batter or the end where the wicket fell"
                            .to_string(),
                    ));
                }
            }
            Ok(())
        }
    }
}

/// Apply a validated event. Infallible by construction; `validate` must
/// have passed for the same board and event.
pub(crate) fn apply(board: &mut Scoreboard, event: &DeliveryEvent, bowler: &str) -> Applied {
    let start_striker = board.striker.clone();
    let start_non = board.non_striker.clone();
    let legal = event.is_legal();

    board.bowler_mut(bowler);
    board.delivery_log.push(DeliveryRecord {
        event: event.clone(),
        ball_index: board.legal_balls % 6,
        striker: start_striker.clone(),
        non_striker: start_non.clone(),
        bowler: bowler.to_string(),
    });

    let mut batted_runs = 0u32;
    let mut wicket_fell = false;

    match event {
        DeliveryEvent::Run { runs } => {
            batted_runs = *runs;
            apply_batted(board, bowler, *runs);
        }
        DeliveryEvent::Manual { runs } => {
            let r = *runs as u32;
            batted_runs = r;
            apply_batted(board, bowler, r);
        }
        DeliveryEvent::Wide { runs } => {
            board.total_runs += *runs as i64;
            board.extras.wides += *runs;
            board.bowler_mut(bowler).runs += *runs;
            // Quirk kept from the reference scorer: even wide runs rotate
            // ends, odd ones do not.
            if *runs % 2 == 0 {
                board.swap_strike();
            }
        }
        DeliveryEvent::NoBall { runs } => {
            let batted = *runs - 1;
            board.total_runs += 1;
            board.extras.no_balls += 1;
            if batted > 0 {
                let striker = board.striker.clone();
                let rec = board.batsman_mut(&striker);
                rec.runs += batted;
                if batted == 4 {
                    rec.fours += 1;
                }
                if batted == 6 {
                    rec.sixes += 1;
                }
                board.total_runs += batted as i64;
                if batted % 2 == 1 {
                    board.swap_strike();
                }
            }
            board.bowler_mut(bowler).runs += *runs;
            batted_runs = batted;
        }
        DeliveryEvent::Bye { runs } | DeliveryEvent::LegBye { runs } => {
            board.total_runs += *runs as i64;
            if matches!(event, DeliveryEvent::Bye { .. }) {
                board.extras.byes += *runs;
            } else {
                board.extras.leg_byes += *runs;
            }
            let rec = board.bowler_mut(bowler);
            rec.runs += *runs;
            rec.balls += 1;
            let striker = board.striker.clone();
            board.batsman_mut(&striker).balls += 1;
            board.legal_balls += 1;
            if *runs % 2 == 1 {
                board.swap_strike();
            }
        }
        DeliveryEvent::Wicket { method, out_name, new_batsman, run_out, .. } => {
            wicket_fell = true;
            let replacement = new_batsman.trim().to_string();

            // Penalty deduction lands on the team total and the extras
            // ledger only; bowler figures stay untouched.
            if let WicketMethod::NegativeRuns { deduction } = method {
                board.total_runs -= *deduction as i64;
                board.extras.negative += *deduction;
            }

            match run_out {
                Some(ro) => {
                    // Resolution must follow the runs-before strike swap so
                    // that end-based inference sees the post-run positions.
                    let out;
                    if ro.runs_before > 0 {
                        let rb = ro.runs_before;
                        batted_runs = rb;
                        let striker = board.striker.clone();
                        let rec = board.batsman_mut(&striker);
                        rec.runs += rb;
                        rec.balls += 1;
                        board.total_runs += rb as i64;
                        let bw = board.bowler_mut(bowler);
                        bw.runs += rb;
                        bw.balls += 1;
                        board.legal_balls += 1;
                        if rb % 2 == 1 {
                            board.swap_strike();
                        }
                        out = resolve_out_batter(ro, &start_striker, &start_non, board);
                    } else {
                        board.legal_balls += 1;
                        board.bowler_mut(bowler).balls += 1;
                        out = resolve_out_batter(ro, &start_striker, &start_non, board);
                        // The dismissed batter's ball counts except when the
                        // wicket fell at the non-striker's end with the
                        // non-striker named out.
                        let exempt = ro.end == Some(PitchEnd::NonStrikerEnd)
                            && ro.who == Some(DismissedBatter::NonStriker);
                        if !exempt {
                            board.batsman_mut(&out).balls += 1;
                        }
                    }

                    board.batsman_mut(&out).status = BatterStatus::Out("Run Out".to_string());

                    let survivor = if out == start_striker {
                        start_non.clone()
                    } else {
                        start_striker.clone()
                    };
                    let end = effective_end(ro);
                    // On the over's final ball the end-of-over swap still
                    // runs below, so the assignment is pre-inverted here to
                    // leave the right batter facing the next over.
                    let is_last_ball = legal && board.legal_balls % 6 == 0;
                    match (is_last_ball, end) {
                        (true, PitchEnd::StrikerEnd) => {
                            board.striker = survivor;
                            board.non_striker = replacement.clone();
                        }
                        (true, PitchEnd::NonStrikerEnd) => {
                            board.striker = replacement.clone();
                            board.non_striker = survivor;
                        }
                        (false, PitchEnd::StrikerEnd) => {
                            board.striker = replacement.clone();
                            board.non_striker = survivor;
                        }
                        (false, PitchEnd::NonStrikerEnd) => {
                            board.non_striker = replacement.clone();
                            board.striker = survivor;
                        }
                    }
                    board.install_batsman(&replacement);
                    board.total_wickets += 1;
                }
                None => {
                    board.legal_balls += 1;
                    board.bowler_mut(bowler).balls += 1;
                    let current_striker = board.striker.clone();
                    let out = out_name
                        .as_deref()
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .unwrap_or(current_striker);
                    let rec = board.batsman_mut(&out);
                    rec.balls += 1;
                    rec.status = BatterStatus::Out(method.label().to_string());
                    if method.credits_bowler() {
                        board.bowler_mut(bowler).wickets += 1;
                    }
                    if out == board.striker {
                        board.striker = replacement.clone();
                    } else if out == board.non_striker {
                        board.non_striker = replacement.clone();
                    } else {
                        board.striker = replacement.clone();
                    }
                    board.install_batsman(&replacement);
                    board.total_wickets += 1;
                }
            }
        }
    }

    board.over_balls.push(OverBall { text: event.token(), legal });

    let over_completed = legal && board.legal_balls > 0 && board.legal_balls % 6 == 0;
    if over_completed {
        board.swap_strike();
        board.over_balls.clear();
        board.delivery_log.clear();
    }

    Applied { legal, over_completed, batted_runs, faced_by: start_striker, wicket_fell }
}

/// Runs off the bat: ball counted for striker, bowler and the over;
/// boundary flags at exactly four and six; ends swap on odd runs.
fn apply_batted(board: &mut Scoreboard, bowler: &str, runs: u32) {
    board.total_runs += runs as i64;
    let striker = board.striker.clone();
    let rec = board.batsman_mut(&striker);
    rec.balls += 1;
    if runs > 0 {
        rec.runs += runs;
        if runs == 4 {
            rec.fours += 1;
        }
        if runs == 6 {
            rec.sixes += 1;
        }
    }
    let bw = board.bowler_mut(bowler);
    bw.balls += 1;
    bw.runs += runs;
    board.legal_balls += 1;
    if runs % 2 == 1 {
        board.swap_strike();
    }
}

/// `who` wins over positional inference from `end`; identities are as of
/// delivery start for `who`, as of the post-run state for `end`.
fn resolve_out_batter(
    ro: &RunOutDetails,
    start_striker: &str,
    start_non: &str,
    board: &Scoreboard,
) -> String {
    match (ro.who, ro.end) {
        (Some(DismissedBatter::Striker), _) => start_striker.to_string(),
        (Some(DismissedBatter::NonStriker), _) => start_non.to_string(),
        (None, Some(PitchEnd::NonStrikerEnd)) => board.non_striker.clone(),
        _ => board.striker.clone(),
    }
}

fn effective_end(ro: &RunOutDetails) -> PitchEnd {
    match (ro.end, ro.who) {
        (Some(end), _) => end,
        (None, Some(DismissedBatter::NonStriker)) => PitchEnd::NonStrikerEnd,
        _ => PitchEnd::StrikerEnd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunOutDetails;

    fn board() -> Scoreboard {
        Scoreboard::new("LIONS", "A", "B", "X")
    }

    fn run_event(board: &mut Scoreboard, event: DeliveryEvent) -> Applied {
        validate(board, &event).expect("event should validate");
        apply(board, &event, "X")
    }

    fn wicket(method: WicketMethod, run_out: Option<RunOutDetails>) -> DeliveryEvent {
        DeliveryEvent::Wicket {
            method,
            helper: None,
            out_name: None,
            new_batsman: "C".to_string(),
            run_out,
        }
    }

    #[test]
    fn test_boundary_then_wide_worked_example() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Run { runs: 4 });
        assert_eq!(b.batsmen["A"].runs, 4);
        assert_eq!(b.batsmen["A"].fours, 1);
        assert_eq!(b.total_runs, 4);
        assert_eq!(b.legal_balls, 1);
        assert_eq!(b.striker, "A");

        run_event(&mut b, DeliveryEvent::Wide { runs: 1 });
        assert_eq!(b.total_runs, 5);
        assert_eq!(b.extras.wides, 1);
        assert_eq!(b.legal_balls, 1);
        assert_eq!(b.batsmen["A"].balls, 1);
        assert_eq!(b.striker, "A");
    }

    #[test]
    fn test_odd_runs_swap_strike() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Run { runs: 3 });
        assert_eq!(b.striker, "B");
        assert_eq!(b.non_striker, "A");

        run_event(&mut b, DeliveryEvent::Run { runs: 2 });
        assert_eq!(b.striker, "B");
    }

    #[test]
    fn test_wide_swaps_on_even_runs_only() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Wide { runs: 1 });
        assert_eq!(b.striker, "A", "odd wide runs must not rotate ends");

        run_event(&mut b, DeliveryEvent::Wide { runs: 2 });
        assert_eq!(b.striker, "B", "even wide runs rotate ends");
        assert_eq!(b.extras.wides, 3);
        assert_eq!(b.bowlers["X"].runs, 3);
        assert_eq!(b.bowlers["X"].balls, 0);
    }

    #[test]
    fn test_no_ball_splits_extras_and_batted_runs() {
        let mut b = board();
        let applied = run_event(&mut b, DeliveryEvent::NoBall { runs: 5 });
        assert_eq!(b.total_runs, 5);
        assert_eq!(b.extras.no_balls, 1);
        assert_eq!(b.batsmen["A"].runs, 4);
        assert_eq!(b.batsmen["A"].fours, 1);
        assert_eq!(b.batsmen["A"].balls, 0);
        assert_eq!(b.bowlers["X"].runs, 5);
        assert_eq!(b.legal_balls, 0);
        assert_eq!(b.striker, "A", "batted portion of 4 is even");
        assert_eq!(applied.batted_runs, 4);

        run_event(&mut b, DeliveryEvent::NoBall { runs: 2 });
        assert_eq!(b.striker, "B", "batted portion of 1 swaps strike");
    }

    #[test]
    fn test_byes_count_ball_for_striker_and_bowler() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Bye { runs: 1 });
        assert_eq!(b.total_runs, 1);
        assert_eq!(b.extras.byes, 1);
        assert_eq!(b.legal_balls, 1);
        assert_eq!(b.batsmen["A"].balls, 1);
        assert_eq!(b.batsmen["A"].runs, 0);
        assert_eq!(b.bowlers["X"].balls, 1);
        assert_eq!(b.bowlers["X"].runs, 1);
        assert_eq!(b.striker, "B");

        run_event(&mut b, DeliveryEvent::LegBye { runs: 2 });
        assert_eq!(b.extras.leg_byes, 2);
        assert_eq!(b.striker, "B");
    }

    #[test]
    fn test_bowled_wicket_installs_replacement_on_strike() {
        let mut b = board();
        run_event(&mut b, wicket(WicketMethod::Bowled, None));
        assert_eq!(b.total_wickets, 1);
        assert_eq!(b.legal_balls, 1);
        assert_eq!(b.batsmen["A"].balls, 1);
        assert_eq!(b.batsmen["A"].status, BatterStatus::Out("Bowled".to_string()));
        assert_eq!(b.bowlers["X"].wickets, 1);
        assert_eq!(b.striker, "C");
        assert_eq!(b.non_striker, "B");
    }

    #[test]
    fn test_run_out_not_credited_to_bowler() {
        let mut b = board();
        let ro = RunOutDetails {
            who: Some(DismissedBatter::Striker),
            end: Some(PitchEnd::StrikerEnd),
            runs_before: 0,
        };
        run_event(&mut b, wicket(WicketMethod::RunOut, Some(ro)));
        assert_eq!(b.total_wickets, 1);
        assert_eq!(b.bowlers["X"].wickets, 0);
        assert_eq!(b.batsmen["A"].status, BatterStatus::Out("Run Out".to_string()));
        assert_eq!(b.striker, "C");
        assert_eq!(b.non_striker, "B");
    }

    #[test]
    fn test_run_out_runs_before_credited_then_dismissal() {
        let mut b = board();
        let ro = RunOutDetails {
            who: Some(DismissedBatter::Striker),
            end: Some(PitchEnd::NonStrikerEnd),
            runs_before: 1,
        };
        run_event(&mut b, wicket(WicketMethod::RunOut, Some(ro)));
        // A completed the single (credited, ball faced, strike swapped)
        // before being run out at the non-striker's end.
        assert_eq!(b.batsmen["A"].runs, 1);
        assert_eq!(b.batsmen["A"].balls, 1);
        assert_eq!(b.batsmen["A"].status, BatterStatus::Out("Run Out".to_string()));
        assert_eq!(b.total_runs, 1);
        assert_eq!(b.bowlers["X"].runs, 1);
        assert_eq!(b.legal_balls, 1);
        // Survivor B keeps the striker's end, replacement fills the other.
        assert_eq!(b.striker, "B");
        assert_eq!(b.non_striker, "C");
    }

    #[test]
    fn test_run_out_non_striker_end_exempts_ball_faced() {
        let mut b = board();
        let ro = RunOutDetails {
            who: Some(DismissedBatter::NonStriker),
            end: Some(PitchEnd::NonStrikerEnd),
            runs_before: 0,
        };
        run_event(&mut b, wicket(WicketMethod::RunOut, Some(ro)));
        assert_eq!(b.batsmen["B"].balls, 0, "non-striker run out backing up faces no ball");
        assert_eq!(b.batsmen["B"].status, BatterStatus::Out("Run Out".to_string()));
        assert_eq!(b.legal_balls, 1);
        assert_eq!(b.striker, "A");
        assert_eq!(b.non_striker, "C");
    }

    #[test]
    fn test_run_out_on_final_ball_pre_applies_over_swap() {
        let mut b = board();
        for _ in 0..5 {
            run_event(&mut b, DeliveryEvent::Run { runs: 0 });
        }
        let ro = RunOutDetails {
            who: Some(DismissedBatter::Striker),
            end: Some(PitchEnd::StrikerEnd),
            runs_before: 0,
        };
        run_event(&mut b, wicket(WicketMethod::RunOut, Some(ro)));
        assert_eq!(b.legal_balls, 6);
        // After the end-of-over swap, the replacement is on strike for the
        // new over and the survivor is at the non-striker's end.
        assert_eq!(b.striker, "C");
        assert_eq!(b.non_striker, "B");
        assert!(b.over_balls.is_empty());
    }

    #[test]
    fn test_penalty_wicket_deducts_without_touching_bowler() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Run { runs: 4 });
        let bowler_runs = b.bowlers["X"].runs;

        run_event(&mut b, wicket(WicketMethod::NegativeRuns { deduction: 3 }, None));
        assert_eq!(b.total_runs, 1);
        assert_eq!(b.extras.negative, 3);
        assert_eq!(b.bowlers["X"].runs, bowler_runs);
        assert_eq!(b.total_wickets, 1);
        assert_eq!(b.batsmen["A"].status, BatterStatus::Out("Negative Runs".to_string()));
    }

    #[test]
    fn test_named_non_striker_out() {
        let mut b = board();
        let event = DeliveryEvent::Wicket {
            method: WicketMethod::ObstructingTheField,
            helper: None,
            out_name: Some("B".to_string()),
            new_batsman: "C".to_string(),
            run_out: None,
        };
        run_event(&mut b, event);
        assert_eq!(b.batsmen["B"].status.display(), "out (Obstructing the field)");
        assert_eq!(b.striker, "A");
        assert_eq!(b.non_striker, "C");
    }

    #[test]
    fn test_validation_rejects_bad_events() {
        let b = board();
        assert_eq!(
            validate(&b, &DeliveryEvent::Wide { runs: 0 }),
            Err(ScoringError::InvalidInput("extras deliveries carry at least one run".to_string()))
        );
        assert!(matches!(
            validate(&b, &DeliveryEvent::Manual { runs: -2 }),
            Err(ScoringError::InvalidInput(_))
        ));
        assert_eq!(
            validate(&b, &wicket(WicketMethod::Bowled, None).clone_with_blank_replacement()),
            Err(ScoringError::MissingReplacement)
        );
        let ambiguous = wicket(
            WicketMethod::RunOut,
            Some(RunOutDetails { who: None, end: None, runs_before: 0 }),
        );
        assert!(matches!(validate(&b, &ambiguous), Err(ScoringError::InvalidInput(_))));
        let no_penalty = wicket(WicketMethod::NegativeRuns { deduction: 0 }, None);
        assert!(matches!(validate(&b, &no_penalty), Err(ScoringError::InvalidInput(_))));
    }

    #[test]
    fn test_over_ledger_tokens_and_reset() {
        let mut b = board();
        run_event(&mut b, DeliveryEvent::Run { runs: 4 });
        run_event(&mut b, DeliveryEvent::Wide { runs: 2 });
        run_event(&mut b, DeliveryEvent::NoBall { runs: 4 });
        let texts: Vec<&str> = b.over_balls.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["4", "WD+2", "NB+3"]);

        for _ in 0..5 {
            run_event(&mut b, DeliveryEvent::Run { runs: 0 });
        }
        assert_eq!(b.legal_balls, 6);
        assert!(b.over_balls.is_empty());
        assert!(b.delivery_log.is_empty());
    }

    impl DeliveryEvent {
        fn clone_with_blank_replacement(&self) -> DeliveryEvent {
            match self.clone() {
                DeliveryEvent::Wicket { method, helper, out_name, run_out, .. } => {
                    DeliveryEvent::Wicket {
                        method,
                        helper,
                        out_name,
                        new_batsman: "  ".to_string(),
                        run_out,
                    }
                }
                other => other,
            }
        }
    }
}
