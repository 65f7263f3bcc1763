//! Calendar-day stamps.
//!
//! A streak only cares about which calendar day an action happened on,
//! never the time of day. Days are carried in their `YYYY-MM-DD` string
//! form and compared by plain string equality, so a corrupt persisted
//! value can never panic -- it just fails every comparison.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in `YYYY-MM-DD` form.
///
/// Equality is string equality. Values loaded from storage are wrapped
/// as-is; only stamps produced by this module are guaranteed well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayStamp(String);

impl DayStamp {
    /// Wrap a raw stored string without validation.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format(DAY_FORMAT).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Today and its derived yesterday, captured once per evaluation.
///
/// Yesterday is computed by subtracting a fixed 24 hours from the
/// current instant and truncating to a date. This ignores DST and
/// timezone shifts; it is the reference rule and is kept as-is.
#[derive(Debug, Clone)]
pub struct DayContext {
    pub today: DayStamp,
    pub yesterday: DayStamp,
}

impl DayContext {
    /// Capture the current wall-clock day pair (UTC).
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            today: DayStamp::from_date(instant.date_naive()),
            yesterday: DayStamp::from_date((instant - Duration::hours(24)).date_naive()),
        }
    }

    /// Build a context for a fixed calendar day (tests and replay).
    pub fn for_day(today: NaiveDate) -> Self {
        let yesterday = today.pred_opt().unwrap_or(today);
        Self {
            today: DayStamp::from_date(today),
            yesterday: DayStamp::from_date(yesterday),
        }
    }
}
