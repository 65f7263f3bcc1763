use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI shell would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    StreakRecorded {
        count: u32,
        at: DateTime<Utc>,
    },
    /// Recorded and a designated milestone count was reached.
    MilestoneReached {
        count: u32,
        message: String,
        at: DateTime<Utc>,
    },
    /// Record action rejected: today is already counted.
    AlreadyRecorded {
        count: u32,
        at: DateTime<Utc>,
    },
    /// Launch check found a missed day and zeroed the count.
    StreakLapsed {
        previous_count: u32,
        at: DateTime<Utc>,
    },
    StreakReset {
        at: DateTime<Utc>,
    },
}
