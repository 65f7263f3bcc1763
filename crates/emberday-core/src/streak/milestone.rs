//! Milestone celebration tiers.
//!
//! A fixed lookup table from streak count to celebration message.
//! Lookups are exact-match only: day 7 is a milestone, day 8 is not.

use serde::{Deserialize, Serialize};

/// Count -> message table. Extending the milestone set means adding a row.
const MILESTONES: &[(u32, &str)] = &[
    (3, "🔥 Day 3! You're on fire!"),
    (7, "💪 Day 7! Strong streak!"),
    (10, "🥇 10 days! You legend!"),
    (30, "🚀 30-day beast mode!"),
    (60, "💎 60 days! Unstoppable!"),
    (100, "💯 Century Streak! Amazing!"),
];

/// A milestone hit by reaching a designated streak count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub count: u32,
    pub message: String,
}

impl Milestone {
    /// Short tag for the tier, e.g. `7-day`.
    pub fn tier(&self) -> String {
        format!("{}-day", self.count)
    }
}

/// Look up the milestone for a streak count, if the count is in the table.
pub fn milestone_for(count: u32) -> Option<Milestone> {
    MILESTONES
        .iter()
        .find(|(c, _)| *c == count)
        .map(|(c, message)| Milestone {
            count: *c,
            message: (*message).to_string(),
        })
}
