mod day;
mod engine;
mod milestone;

pub use day::{DayContext, DayStamp};
pub use engine::{evaluate_on_launch, record_today, reset, LaunchEvaluation, RecordOutcome, StreakState};
pub use milestone::{milestone_for, Milestone};
