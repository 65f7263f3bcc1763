//! Transient user-facing notifications.
//!
//! The tracker emits these for every outcome the user should see:
//! recording success (with milestone text), already-recorded rejection,
//! auto-reset after a missed day, reset confirmation, and storage
//! failures. They are dismissible status messages, not errors -- the
//! presentation layer decides how long to show them.

use serde::{Deserialize, Serialize};

use crate::streak::Milestone;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

/// A transient, dismissible status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    /// How long a visual shell should keep the message on screen.
    pub visibility_ms: u64,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, body: &str, visibility_ms: u64) -> Self {
        Self {
            kind,
            title: title.to_string(),
            body: body.to_string(),
            visibility_ms,
        }
    }

    pub fn recorded(count: u32) -> Self {
        Self::new(
            NotificationKind::Success,
            &format!("Day {count} Recorded!"),
            "Keep up the great work!",
            2000,
        )
    }

    pub fn milestone(milestone: &Milestone) -> Self {
        Self::new(
            NotificationKind::Success,
            "🎉 Milestone Reached!",
            &milestone.message,
            4000,
        )
    }

    pub fn already_recorded() -> Self {
        Self::new(
            NotificationKind::Info,
            "Already Recorded!",
            "You can only record once per day.",
            3000,
        )
    }

    pub fn streak_lapsed() -> Self {
        Self::new(
            NotificationKind::Info,
            "Streak Reset!",
            "You missed a day. Starting fresh!",
            4000,
        )
    }

    pub fn streak_reset() -> Self {
        Self::new(
            NotificationKind::Info,
            "Streak Reset",
            "Your streak has been reset.",
            3000,
        )
    }

    pub fn load_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Error loading data",
            "Please try restarting the app.",
            4000,
        )
    }

    pub fn save_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Error saving data",
            "Your streak will be re-checked on next launch.",
            4000,
        )
    }

    pub fn record_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Error recording streak",
            "Please try again.",
            4000,
        )
    }

    pub fn reset_failed() -> Self {
        Self::new(
            NotificationKind::Error,
            "Error resetting streak",
            "Please try again.",
            4000,
        )
    }
}
