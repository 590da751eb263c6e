use thiserror::Error;

use crate::value::ValueKind;

/// Numeric code reported to foreign callers when a task-data operation
/// succeeds.
///
/// The failure codes are [`TaskDataError::code`]; together they form the
/// stable contract `0` success, `1` unknown key, `2` type mismatch, `3`
/// unknown error.
pub const SUCCESS_CODE: u32 = 0;

/// Errors produced by the typed task-data accessors.
///
/// Every variant names the key involved, so an error renders into a usable
/// diagnostic on its own.
///
/// # Examples
///
/// ```
/// use musubi::{Context, TaskDataError};
///
/// let ctx = Context::new(false);
///
/// match ctx.try_get_i64("attempts") {
///     Err(TaskDataError::UnknownKey { key }) => assert_eq!(key, "attempts"),
///     other => panic!("expected UnknownKey, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskDataError {
    /// The key has never been set, or has been deleted.
    #[error("unknown task_data var '{key}'")]
    UnknownKey {
        /// The key that was looked up.
        key: String,
    },

    /// The key is set, but currently holds a different kind of value than
    /// the accessor requested.
    #[error("type mismatch for task_data var '{key}': expected {expected}, found {found}")]
    KeyTypeMismatch {
        /// The key that was looked up.
        key: String,
        /// The kind the accessor asked for.
        expected: ValueKind,
        /// The kind the key currently holds.
        found: ValueKind,
    },

    /// The value could not be stored, e.g. because the store is full.
    #[error("failed to store task_data var '{key}'")]
    Unknown {
        /// The key that was being set.
        key: String,
    },
}

impl TaskDataError {
    /// Stable numeric code for foreign callers.
    ///
    /// Success is [`SUCCESS_CODE`] (`0`); the error codes here are `1`
    /// through `3`.
    pub fn code(&self) -> u32 {
        match self {
            TaskDataError::UnknownKey { .. } => 1,
            TaskDataError::KeyTypeMismatch { .. } => 2,
            TaskDataError::Unknown { .. } => 3,
        }
    }
}
