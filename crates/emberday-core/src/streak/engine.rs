//! Streak continuity engine.
//!
//! The engine is a pure decision core: it consumes `(today,
//! last_recorded, count)` and returns the next state plus a
//! classification of what happened. No clocks, no I/O -- the caller
//! captures a [`DayContext`] and passes it in.
//!
//! ## State Transitions
//!
//! ```text
//! Fresh(0) -> Active(N, last=today) -> Active(N, last=yesterday) -> ...
//!                                  \-> Fresh(0)   (lapse on launch)
//! ```
//!
//! `record_today` advances Active(last=yesterday) by one and rejects a
//! second recording on the same day. `evaluate_on_launch` sends any
//! state whose last day is neither today nor yesterday back to zero.
//! There is no terminal state; the machine cycles across days.

use serde::{Deserialize, Serialize};

use super::day::{DayContext, DayStamp};
use super::milestone::{milestone_for, Milestone};

/// The persisted streak value: a count and the day it was last advanced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakState {
    pub count: u32,
    pub last_recorded: Option<DayStamp>,
}

impl StreakState {
    /// The empty state: count zero, never recorded.
    pub fn empty() -> Self {
        Self {
            count: 0,
            last_recorded: None,
        }
    }

    pub fn recorded_on(&self, day: &DayStamp) -> bool {
        self.last_recorded.as_ref() == Some(day)
    }
}

impl Default for StreakState {
    fn default() -> Self {
        Self::empty()
    }
}

/// Result of the launch-time continuity check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchEvaluation {
    /// State to display and persist. On a lapse the count is zeroed;
    /// the stale last day is kept (it can never equal today, so the
    /// next recording starts a fresh streak at 1).
    pub state: StreakState,
    pub lapsed: bool,
}

/// Outcome of a record action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Today was already recorded; nothing changed. At most one
    /// increment per calendar day, however often the action fires.
    AlreadyRecordedToday,
    Recorded {
        state: StreakState,
        milestone: Option<Milestone>,
    },
}

/// Decide whether a stored streak is still intact at launch.
///
/// Must run before any render of the count, so a stale lapsed streak
/// is never shown. A missing last day means nothing to evaluate; a day
/// equal to today or yesterday keeps the streak; anything else --
/// a gap of two or more days, an older day, or a malformed value --
/// is a lapse and zeroes the count.
pub fn evaluate_on_launch(state: &StreakState, days: &DayContext) -> LaunchEvaluation {
    let intact = match &state.last_recorded {
        None => true,
        Some(last) => *last == days.today || *last == days.yesterday,
    };

    if intact {
        LaunchEvaluation {
            state: state.clone(),
            lapsed: false,
        }
    } else {
        LaunchEvaluation {
            state: StreakState {
                count: 0,
                last_recorded: state.last_recorded.clone(),
            },
            lapsed: true,
        }
    }
}

/// Record today's activity.
///
/// Idempotent per calendar day: a repeat on the same day is rejected
/// with [`RecordOutcome::AlreadyRecordedToday`] and no state change.
/// Otherwise the count advances by one and the milestone table is
/// consulted for the new count.
pub fn record_today(state: &StreakState, days: &DayContext) -> RecordOutcome {
    if state.recorded_on(&days.today) {
        return RecordOutcome::AlreadyRecordedToday;
    }

    let count = state.count + 1;
    RecordOutcome::Recorded {
        state: StreakState {
            count,
            last_recorded: Some(days.today.clone()),
        },
        milestone: milestone_for(count),
    }
}

/// Unconditionally return the empty state. Always succeeds.
pub fn reset() -> StreakState {
    StreakState::empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn day(s: &str) -> DayStamp {
        DayStamp::from_raw(s)
    }

    fn ctx(today: &str) -> DayContext {
        DayContext::for_day(today.parse::<NaiveDate>().unwrap())
    }

    fn state(count: u32, last: Option<&str>) -> StreakState {
        StreakState {
            count,
            last_recorded: last.map(day),
        }
    }

    #[test]
    fn fresh_install_first_record_starts_at_one() {
        let outcome = record_today(&state(0, None), &ctx("2024-01-10"));
        match outcome {
            RecordOutcome::Recorded { state, milestone } => {
                assert_eq!(state.count, 1);
                assert_eq!(state.last_recorded, Some(day("2024-01-10")));
                assert!(milestone.is_none());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn yesterday_keeps_streak_on_launch() {
        let eval = evaluate_on_launch(&state(5, Some("2024-01-10")), &ctx("2024-01-11"));
        assert_eq!(eval.state.count, 5);
        assert!(!eval.lapsed);
    }

    #[test]
    fn multi_day_gap_lapses_on_launch() {
        let eval = evaluate_on_launch(&state(20, Some("2024-01-05")), &ctx("2024-01-10"));
        assert_eq!(eval.state.count, 0);
        assert!(eval.lapsed);
    }

    #[test]
    fn same_day_repeat_is_rejected() {
        let before = state(6, Some("2024-01-10"));
        let outcome = record_today(&before, &ctx("2024-01-10"));
        assert_eq!(outcome, RecordOutcome::AlreadyRecordedToday);
        assert_eq!(before.count, 6);
    }

    #[test]
    fn seventh_day_hits_the_milestone() {
        let outcome = record_today(&state(6, Some("2024-01-09")), &ctx("2024-01-10"));
        match outcome {
            RecordOutcome::Recorded { state, milestone } => {
                assert_eq!(state.count, 7);
                assert_eq!(milestone.unwrap().tier(), "7-day");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn same_day_launch_keeps_streak() {
        let eval = evaluate_on_launch(&state(3, Some("2024-01-10")), &ctx("2024-01-10"));
        assert_eq!(eval.state.count, 3);
        assert!(!eval.lapsed);
    }

    #[test]
    fn absent_last_day_is_not_a_lapse() {
        let eval = evaluate_on_launch(&state(0, None), &ctx("2024-01-10"));
        assert_eq!(eval.state.count, 0);
        assert!(!eval.lapsed);
    }

    #[test]
    fn malformed_last_day_lapses_instead_of_panicking() {
        let eval = evaluate_on_launch(&state(12, Some("garbage")), &ctx("2024-01-10"));
        assert_eq!(eval.state.count, 0);
        assert!(eval.lapsed);
    }

    #[test]
    fn future_last_day_lapses() {
        // A clock that jumped backwards leaves a "future" stamp; it is
        // neither today nor yesterday, so it lapses like any other gap.
        let eval = evaluate_on_launch(&state(4, Some("2024-02-01")), &ctx("2024-01-10"));
        assert_eq!(eval.state.count, 0);
        assert!(eval.lapsed);
    }

    #[test]
    fn lapse_keeps_stale_day_so_next_record_restarts_at_one() {
        let days = ctx("2024-01-10");
        let eval = evaluate_on_launch(&state(20, Some("2024-01-05")), &days);
        let outcome = record_today(&eval.state, &days);
        match outcome {
            RecordOutcome::Recorded { state, .. } => assert_eq!(state.count, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn second_record_never_increments() {
        let days = ctx("2024-01-10");
        let first = record_today(&state(4, Some("2024-01-09")), &days);
        let after = match first {
            RecordOutcome::Recorded { state, .. } => state,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(after.count, 5);
        assert_eq!(record_today(&after, &days), RecordOutcome::AlreadyRecordedToday);
    }

    proptest! {
        #[test]
        fn reset_discards_any_prior_state(count in 0u32..1_000_000, recorded in any::<bool>()) {
            // whatever the prior state held, reset lands on empty
            let before = state(count, recorded.then_some("2024-01-10"));
            prop_assert!(before.count == count);
            let after = reset();
            prop_assert_eq!(after.count, 0);
            prop_assert!(after.last_recorded.is_none());
        }

        #[test]
        fn gap_lapses_regardless_of_count(count in 1u32..1_000_000) {
            let eval = evaluate_on_launch(&state(count, Some("2024-01-05")), &ctx("2024-01-10"));
            prop_assert_eq!(eval.state.count, 0);
            prop_assert!(eval.lapsed);
        }

        #[test]
        fn recording_advances_by_exactly_one(count in 0u32..1_000_000) {
            let outcome = record_today(&state(count, Some("2024-01-09")), &ctx("2024-01-10"));
            match outcome {
                RecordOutcome::Recorded { state, .. } => prop_assert_eq!(state.count, count + 1),
                other => prop_assert!(false, "unexpected outcome: {:?}", other),
            }
        }
    }
}
