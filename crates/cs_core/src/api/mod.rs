pub mod score_json;

pub use score_json::{
    innings_summary_json, match_state_json, match_summary_json, retire_batsman_json,
    score_delivery_json, select_bowler_json, start_match_json, start_second_innings_json,
    swap_batsmen_json, undo_json, BowlerRequest, DeliveryRequest, DeliveryResponse,
    InningsSummaryRequest, RetireRequest, SecondInningsRequest, StartMatchRequest, StateView,
};
