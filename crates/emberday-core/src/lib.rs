//! # Emberday Core Library
//!
//! Core business logic for Emberday, a daily habit-streak tracker.
//! It implements a CLI-first philosophy where all operations are
//! available via a standalone CLI binary; any GUI shell would be a
//! thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Streak Engine**: pure decision logic over `(today,
//!   last_recorded, count)` -- continue, lapse, or advance, with
//!   milestone detection
//! - **Tracker**: shell that owns the state, drives the engine, and
//!   converts store failures into user-visible notifications
//! - **Storage**: SQLite-based key-value store and TOML-based
//!   configuration
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: launch / record / reset / status over a store
//! - [`StreakState`]: the persisted count and last recorded day
//! - [`Database`]: key-value persistence
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod store;
pub mod streak;
pub mod tracker;

pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::Event;
pub use notify::{Notification, NotificationKind};
pub use storage::{Config, Database};
pub use store::{MemoryStore, StreakStore, KEY_LAST_DATE, KEY_STREAK};
pub use streak::{
    evaluate_on_launch, milestone_for, record_today, reset, DayContext, DayStamp,
    LaunchEvaluation, Milestone, RecordOutcome, StreakState,
};
pub use tracker::{ActionReport, LaunchReport, StatusView, StreakTracker};
