//! The streak tracker shell.
//!
//! `StreakTracker` mediates between the pure engine and the injected
//! store. It owns a single [`StreakState`] value and reassigns it after
//! each engine call; no in-place mutation from multiple code paths.
//! Store failures never escape as errors -- they are converted to
//! user-visible notifications here, and the in-memory state is left
//! as it was (the operation is treated as not committed).
//!
//! Each public action has an `*_at` variant taking an explicit
//! [`DayContext`], used by tests and replay; the plain variants capture
//! the current wall-clock day.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::notify::Notification;
use crate::store::{StreakStore, KEY_LAST_DATE, KEY_STREAK};
use crate::streak::{
    evaluate_on_launch, record_today, reset, DayContext, DayStamp, RecordOutcome, StreakState,
};

/// Result of the launch sequence: the state to display plus anything
/// the user should be told about it.
#[derive(Debug, Clone)]
pub struct LaunchReport {
    pub state: StreakState,
    pub lapsed: bool,
    pub notifications: Vec<Notification>,
    pub events: Vec<Event>,
}

/// Result of a user action (record or reset).
#[derive(Debug, Clone)]
pub struct ActionReport {
    pub state: StreakState,
    pub event: Option<Event>,
    pub notification: Notification,
}

/// Snapshot of the current streak for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusView {
    pub count: u32,
    pub last_recorded: Option<DayStamp>,
    /// Whether today's action has already been taken. Drives the
    /// "Recorded Today!" vs "Record Day" presentation.
    pub recorded_today: bool,
}

pub struct StreakTracker<S: StreakStore> {
    store: S,
    state: StreakState,
}

impl<S: StreakStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: StreakState::empty(),
        }
    }

    pub fn state(&self) -> &StreakState {
        &self.state
    }

    /// Load persisted values and run the launch-time continuity check.
    ///
    /// Runs before anything renders the count. A detected lapse is
    /// persisted immediately. A read failure keeps the empty state and
    /// surfaces a load-error notification instead of aborting.
    pub fn launch(&mut self) -> LaunchReport {
        self.launch_at(&DayContext::now())
    }

    pub fn launch_at(&mut self, days: &DayContext) -> LaunchReport {
        let loaded = match self.load_state() {
            Ok(state) => state,
            Err(_) => {
                return LaunchReport {
                    state: self.state.clone(),
                    lapsed: false,
                    notifications: vec![Notification::load_failed()],
                    events: Vec::new(),
                };
            }
        };

        let previous_count = loaded.count;
        let eval = evaluate_on_launch(&loaded, days);
        let mut notifications = Vec::new();
        let mut events = Vec::new();

        if eval.lapsed {
            events.push(Event::StreakLapsed {
                previous_count,
                at: Utc::now(),
            });
            notifications.push(Notification::streak_lapsed());
            if self.store.set(KEY_STREAK, "0").is_err() {
                notifications.push(Notification::save_failed());
            }
        }

        self.state = eval.state.clone();
        LaunchReport {
            state: eval.state,
            lapsed: eval.lapsed,
            notifications,
            events,
        }
    }

    /// Perform the "Record Day" action.
    ///
    /// Writes the `streak` / `lastDate` pair together; on a write
    /// failure the in-memory state is left untouched so the user can
    /// retry.
    pub fn record(&mut self) -> ActionReport {
        self.record_at(&DayContext::now())
    }

    pub fn record_at(&mut self, days: &DayContext) -> ActionReport {
        match record_today(&self.state, days) {
            RecordOutcome::AlreadyRecordedToday => ActionReport {
                state: self.state.clone(),
                event: Some(Event::AlreadyRecorded {
                    count: self.state.count,
                    at: Utc::now(),
                }),
                notification: Notification::already_recorded(),
            },
            RecordOutcome::Recorded { state, milestone } => {
                let written = self
                    .store
                    .set(KEY_STREAK, &state.count.to_string())
                    .and_then(|()| self.store.set(KEY_LAST_DATE, days.today.as_str()));
                if written.is_err() {
                    return ActionReport {
                        state: self.state.clone(),
                        event: None,
                        notification: Notification::record_failed(),
                    };
                }

                let (event, notification) = match &milestone {
                    Some(m) => (
                        Event::MilestoneReached {
                            count: state.count,
                            message: m.message.clone(),
                            at: Utc::now(),
                        },
                        Notification::milestone(m),
                    ),
                    None => (
                        Event::StreakRecorded {
                            count: state.count,
                            at: Utc::now(),
                        },
                        Notification::recorded(state.count),
                    ),
                };

                self.state = state.clone();
                ActionReport {
                    state,
                    event: Some(event),
                    notification,
                }
            }
        }
    }

    /// Perform the "Reset Streak" action: clear both keys and return to
    /// the empty state. The engine-side reset has no precondition; only
    /// the store write can fail.
    pub fn reset(&mut self) -> ActionReport {
        let removed = self
            .store
            .remove(KEY_STREAK)
            .and_then(|()| self.store.remove(KEY_LAST_DATE));
        if removed.is_err() {
            return ActionReport {
                state: self.state.clone(),
                event: None,
                notification: Notification::reset_failed(),
            };
        }

        self.state = reset();
        ActionReport {
            state: self.state.clone(),
            event: Some(Event::StreakReset { at: Utc::now() }),
            notification: Notification::streak_reset(),
        }
    }

    pub fn status(&self) -> StatusView {
        self.status_at(&DayContext::now())
    }

    pub fn status_at(&self, days: &DayContext) -> StatusView {
        StatusView {
            count: self.state.count,
            last_recorded: self.state.last_recorded.clone(),
            recorded_today: self.state.recorded_on(&days.today),
        }
    }

    /// Read both keys and rebuild the persisted state. A malformed
    /// count loads as zero; a malformed date is carried verbatim and
    /// resolved by the lapse check.
    fn load_state(&self) -> Result<StreakState, crate::error::StorageError> {
        let count = self
            .store
            .get(KEY_STREAK)?
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(0);
        let last_recorded = self.store.get(KEY_LAST_DATE)?.map(DayStamp::from_raw);
        Ok(StreakState {
            count,
            last_recorded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::notify::NotificationKind;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn ctx(today: &str) -> DayContext {
        DayContext::for_day(today.parse::<NaiveDate>().unwrap())
    }

    fn seeded(count: &str, last: &str) -> MemoryStore {
        let store = MemoryStore::new();
        store.set(KEY_STREAK, count).unwrap();
        store.set(KEY_LAST_DATE, last).unwrap();
        store
    }

    #[test]
    fn launch_on_fresh_store_is_quiet() {
        let mut tracker = StreakTracker::new(MemoryStore::new());
        let report = tracker.launch_at(&ctx("2024-01-10"));
        assert_eq!(report.state.count, 0);
        assert!(!report.lapsed);
        assert!(report.notifications.is_empty());
    }

    #[test]
    fn launch_after_yesterday_keeps_count() {
        let mut tracker = StreakTracker::new(seeded("5", "2024-01-10"));
        let report = tracker.launch_at(&ctx("2024-01-11"));
        assert_eq!(report.state.count, 5);
        assert!(!report.lapsed);
    }

    #[test]
    fn launch_after_gap_lapses_and_persists_zero() {
        let mut tracker = StreakTracker::new(seeded("20", "2024-01-05"));
        let report = tracker.launch_at(&ctx("2024-01-10"));
        assert!(report.lapsed);
        assert_eq!(report.state.count, 0);
        assert_eq!(
            report.notifications,
            vec![Notification::streak_lapsed()]
        );
        assert!(matches!(
            report.events.as_slice(),
            [Event::StreakLapsed { previous_count: 20, .. }]
        ));
        assert_eq!(tracker.store.get(KEY_STREAK).unwrap().as_deref(), Some("0"));
    }

    #[test]
    fn record_persists_the_pair_together() {
        let mut tracker = StreakTracker::new(MemoryStore::new());
        tracker.launch_at(&ctx("2024-01-10"));
        let report = tracker.record_at(&ctx("2024-01-10"));
        assert_eq!(report.state.count, 1);
        assert_eq!(tracker.store.get(KEY_STREAK).unwrap().as_deref(), Some("1"));
        assert_eq!(
            tracker.store.get(KEY_LAST_DATE).unwrap().as_deref(),
            Some("2024-01-10")
        );
    }

    #[test]
    fn second_record_on_same_day_changes_nothing() {
        let mut tracker = StreakTracker::new(MemoryStore::new());
        let days = ctx("2024-01-10");
        tracker.launch_at(&days);
        tracker.record_at(&days);
        let report = tracker.record_at(&days);
        assert_eq!(report.notification, Notification::already_recorded());
        assert_eq!(report.state.count, 1);
        assert_eq!(tracker.store.get(KEY_STREAK).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn seventh_record_celebrates() {
        let mut tracker = StreakTracker::new(seeded("6", "2024-01-09"));
        tracker.launch_at(&ctx("2024-01-10"));
        let report = tracker.record_at(&ctx("2024-01-10"));
        assert_eq!(report.state.count, 7);
        assert!(matches!(
            report.event,
            Some(Event::MilestoneReached { count: 7, .. })
        ));
        assert_eq!(report.notification.kind, NotificationKind::Success);
        assert!(report.notification.body.contains("Day 7"));
    }

    #[test]
    fn reset_clears_both_keys() {
        let mut tracker = StreakTracker::new(seeded("9", "2024-01-10"));
        tracker.launch_at(&ctx("2024-01-10"));
        let report = tracker.reset();
        assert_eq!(report.state, StreakState::empty());
        assert!(tracker.store.get(KEY_STREAK).unwrap().is_none());
        assert!(tracker.store.get(KEY_LAST_DATE).unwrap().is_none());
    }

    #[test]
    fn status_distinguishes_recorded_today() {
        let mut tracker = StreakTracker::new(seeded("3", "2024-01-10"));
        tracker.launch_at(&ctx("2024-01-10"));
        assert!(tracker.status_at(&ctx("2024-01-10")).recorded_today);
        assert!(!tracker.status_at(&ctx("2024-01-11")).recorded_today);
    }

    #[test]
    fn malformed_count_loads_as_zero() {
        let mut tracker = StreakTracker::new(seeded("not-a-number", "2024-01-10"));
        let report = tracker.launch_at(&ctx("2024-01-10"));
        assert_eq!(report.state.count, 0);
        assert!(!report.lapsed);
    }

    #[test]
    fn malformed_date_lapses_without_panic() {
        let mut tracker = StreakTracker::new(seeded("8", "garbage"));
        let report = tracker.launch_at(&ctx("2024-01-10"));
        assert!(report.lapsed);
        assert_eq!(report.state.count, 0);
    }

    /// Store that accepts reads but rejects every write.
    struct ReadOnlyStore {
        inner: MemoryStore,
    }

    impl StreakStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                source: rusqlite::Error::InvalidQuery,
            })
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            Err(StorageError::WriteFailed {
                key: key.to_string(),
                source: rusqlite::Error::InvalidQuery,
            })
        }
    }

    #[test]
    fn failed_record_write_is_not_committed() {
        let mut tracker = StreakTracker::new(ReadOnlyStore {
            inner: MemoryStore::new(),
        });
        tracker.launch_at(&ctx("2024-01-10"));
        let report = tracker.record_at(&ctx("2024-01-10"));
        assert_eq!(report.notification, Notification::record_failed());
        assert!(report.event.is_none());
        assert_eq!(tracker.state().count, 0);
    }

    #[test]
    fn failed_reset_keeps_state() {
        let inner = seeded("4", "2024-01-10");
        let mut tracker = StreakTracker::new(ReadOnlyStore { inner });
        tracker.launch_at(&ctx("2024-01-10"));
        let report = tracker.reset();
        assert_eq!(report.notification, Notification::reset_failed());
        assert_eq!(tracker.state().count, 4);
    }

    #[test]
    fn failed_lapse_persist_still_zeroes_in_memory() {
        let inner = seeded("20", "2024-01-05");
        let mut tracker = StreakTracker::new(ReadOnlyStore { inner });
        let report = tracker.launch_at(&ctx("2024-01-10"));
        assert!(report.lapsed);
        assert_eq!(report.state.count, 0);
        assert!(report
            .notifications
            .contains(&Notification::save_failed()));
    }
}
