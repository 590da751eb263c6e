//! Typed accessors over the context's task-data store.
//!
//! Each operation comes in two flavors with one shared implementation: a
//! `try_` form that reports failures as [`TaskDataError`] values, and a
//! panicking form for call sites that treat task-data presence as a program
//! invariant: a process definition that is statically known to have set a
//! key does not recover from its absence.
//!
//! A key holds whatever kind of value was stored last; accessors check the
//! requested kind against the key's current one and report a mismatch
//! instead of coercing. Deleting a key returns it to the unset state, so a
//! later set may use any kind.

use tracing::trace;

use crate::context::Context;
use crate::dict::Dict;
use crate::error::TaskDataError;
use crate::value::{Value, ValueKind};

impl Context {
    fn try_get_with<'a, T>(
        &'a self,
        key: &str,
        kind: ValueKind,
        read: fn(&'a Value) -> Option<T>,
    ) -> Result<T, TaskDataError> {
        if self.verbose() {
            trace!("will get task_data var '{key}'");
        }

        let Some(value) = self.task_data().get(key) else {
            if self.verbose() {
                trace!("unknown task_data var '{key}'");
            }

            return Err(TaskDataError::UnknownKey {
                key: key.to_owned(),
            });
        };

        match read(value) {
            Some(payload) => {
                if self.verbose() {
                    trace!("did get task_data var '{key}: {value}'");
                }

                Ok(payload)
            }
            None => {
                if self.verbose() {
                    trace!("type mismatch for task_data var '{key}'");
                }

                Err(TaskDataError::KeyTypeMismatch {
                    key: key.to_owned(),
                    expected: kind,
                    found: value.kind(),
                })
            }
        }
    }

    fn try_set_value(&mut self, key: &str, value: Value) -> Result<(), TaskDataError> {
        if self.verbose() {
            trace!("will set task_data var '{key}: {value}'");
        }

        if !self.task_data_mut().insert(key, value) {
            if self.verbose() {
                trace!("failed to set task_data var '{key}'");
            }

            return Err(TaskDataError::Unknown {
                key: key.to_owned(),
            });
        }

        if self.verbose() {
            if let Some(value) = self.task_data().get(key) {
                trace!("did set task_data var '{key}: {value}'");
            }
        }

        Ok(())
    }

    /// Returns the boolean stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::UnknownKey`] when the key is unset or deleted,
    /// [`TaskDataError::KeyTypeMismatch`] when it holds another kind.
    pub fn try_get_bool(&self, key: &str) -> Result<bool, TaskDataError> {
        self.try_get_with(key, ValueKind::Bool, Value::as_bool)
    }

    /// Returns the integer stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::UnknownKey`] when the key is unset or deleted,
    /// [`TaskDataError::KeyTypeMismatch`] when it holds another kind.
    pub fn try_get_i64(&self, key: &str) -> Result<i64, TaskDataError> {
        self.try_get_with(key, ValueKind::Int64, Value::as_i64)
    }

    /// Returns the string stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::UnknownKey`] when the key is unset or deleted,
    /// [`TaskDataError::KeyTypeMismatch`] when it holds another kind.
    pub fn try_get_str(&self, key: &str) -> Result<&str, TaskDataError> {
        self.try_get_with(key, ValueKind::Str, Value::as_str)
    }

    /// Returns the nested dict stored under `key`.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::UnknownKey`] when the key is unset or deleted,
    /// [`TaskDataError::KeyTypeMismatch`] when it holds another kind.
    pub fn try_get_dict(&self, key: &str) -> Result<&Dict, TaskDataError> {
        self.try_get_with(key, ValueKind::Dict, Value::as_dict)
    }

    /// Stores a boolean under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::Unknown`] when the store rejects the entry (table
    /// full).
    pub fn try_set_bool(&mut self, key: &str, value: bool) -> Result<(), TaskDataError> {
        self.try_set_value(key, Value::Bool(value))
    }

    /// Stores an integer under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::Unknown`] when the store rejects the entry (table
    /// full).
    pub fn try_set_i64(&mut self, key: &str, value: i64) -> Result<(), TaskDataError> {
        self.try_set_value(key, Value::Int64(value))
    }

    /// Stores a string under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::Unknown`] when the store rejects the entry (table
    /// full).
    pub fn try_set_str(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), TaskDataError> {
        self.try_set_value(key, Value::Str(value.into()))
    }

    /// Moves a dict into the store under `key`, replacing any previous
    /// value.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::Unknown`] when the store rejects the entry (table
    /// full); the dict is dropped in that case.
    pub fn try_set_dict(&mut self, key: &str, value: Dict) -> Result<(), TaskDataError> {
        self.try_set_value(key, Value::Dict(value))
    }

    /// Deletes the value stored under `key`.
    ///
    /// The key returns to the unset state; a later set may use any kind.
    ///
    /// # Errors
    ///
    /// [`TaskDataError::UnknownKey`] when the key is unset or already
    /// deleted.
    pub fn try_delete(&mut self, key: &str) -> Result<(), TaskDataError> {
        if !self.task_data_mut().remove(key) {
            return Err(TaskDataError::UnknownKey {
                key: key.to_owned(),
            });
        }

        if self.verbose() {
            trace!("delete task_data var '{key}'");
        }

        Ok(())
    }

    /// Like [`try_get_bool`](Self::try_get_bool), but panics on failure.
    pub fn get_bool(&self, key: &str) -> bool {
        match self.try_get_bool(key) {
            Ok(value) => value,
            Err(err) => panic!("failed to get task_data var '{key}': {err}"),
        }
    }

    /// Like [`try_get_i64`](Self::try_get_i64), but panics on failure.
    pub fn get_i64(&self, key: &str) -> i64 {
        match self.try_get_i64(key) {
            Ok(value) => value,
            Err(err) => panic!("failed to get task_data var '{key}': {err}"),
        }
    }

    /// Like [`try_get_str`](Self::try_get_str), but panics on failure.
    pub fn get_str(&self, key: &str) -> &str {
        match self.try_get_str(key) {
            Ok(value) => value,
            Err(err) => panic!("failed to get task_data var '{key}': {err}"),
        }
    }

    /// Like [`try_get_dict`](Self::try_get_dict), but panics on failure.
    pub fn get_dict(&self, key: &str) -> &Dict {
        match self.try_get_dict(key) {
            Ok(value) => value,
            Err(err) => panic!("failed to get task_data var '{key}': {err}"),
        }
    }

    /// Like [`try_set_bool`](Self::try_set_bool), but panics on failure.
    pub fn set_bool(&mut self, key: &str, value: bool) {
        if let Err(err) = self.try_set_bool(key, value) {
            panic!("failed to set task_data var '{key}': {err}");
        }
    }

    /// Like [`try_set_i64`](Self::try_set_i64), but panics on failure.
    pub fn set_i64(&mut self, key: &str, value: i64) {
        if let Err(err) = self.try_set_i64(key, value) {
            panic!("failed to set task_data var '{key}': {err}");
        }
    }

    /// Like [`try_set_str`](Self::try_set_str), but panics on failure.
    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        if let Err(err) = self.try_set_str(key, value) {
            panic!("failed to set task_data var '{key}': {err}");
        }
    }

    /// Like [`try_set_dict`](Self::try_set_dict), but panics on failure.
    pub fn set_dict(&mut self, key: &str, value: Dict) {
        if let Err(err) = self.try_set_dict(key, value) {
            panic!("failed to set task_data var '{key}': {err}");
        }
    }

    /// Like [`try_delete`](Self::try_delete), but panics on failure.
    pub fn delete(&mut self, key: &str) {
        if let Err(err) = self.try_delete(key) {
            panic!("failed to delete task_data var '{key}': {err}");
        }
    }
}
