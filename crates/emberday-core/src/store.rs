//! The persisted-store capability.
//!
//! The tracker only needs get/set/remove over two logical keys, so the
//! store is injected as a trait: SQLite in production, an in-memory
//! fake in tests. The engine itself never touches storage.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StorageError;

/// Logical key for the string-encoded streak count.
pub const KEY_STREAK: &str = "streak";
/// Logical key for the last recorded calendar day (`YYYY-MM-DD`).
pub const KEY_LAST_DATE: &str = "lastDate";

/// Key-value storage for the streak fields.
///
/// The `streak` / `lastDate` pair is written together by callers;
/// partial-write inconsistency self-heals through the launch-time
/// lapse check rather than through transactions.
pub trait StreakStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StreakStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
