pub mod batting;
pub mod bowling;
pub mod delivery;
pub mod extras;
pub mod match_info;
pub mod over;
pub mod partnership;
pub mod summary;

pub use batting::{BatsmanRecord, BatterStatus};
pub use bowling::BowlerRecord;
pub use delivery::{
    DeliveryEvent, DeliveryRecord, DismissedBatter, PitchEnd, RunOutDetails, WicketMethod,
};
pub use extras::ExtrasBreakdown;
pub use match_info::{MatchInfo, TossDecision};
pub use over::{format_overs, OverBall};
pub use partnership::Partnership;
pub use summary::{BowlerFigures, InningsSummary, MatchSummary};
