use crate::dict::{Dict, InvalidCapacity};

/// Default slot count of the task-data store.
///
/// The store never grows, so the default leaves generous headroom over the
/// handful of vars a typical process run touches.
pub const DEFAULT_TASK_DATA_CAPACITY: usize = 64;

/// Process-wide handle for one run of a process.
///
/// Owns the task-data store for its entire lifetime and carries the
/// verbosity flag that the store and its collaborators (lifecycle hooks,
/// manual-task handling) consult before emitting diagnostic lines. Dropping
/// the context drops the store and every value in it.
///
/// One context per process execution; contexts are never shared across
/// independent runs, and concurrent access requires external locking.
///
/// # Examples
///
/// ```
/// use musubi::Context;
///
/// let mut ctx = Context::new(false);
/// assert!(!ctx.verbose());
///
/// ctx.set_i64("attempts", 3);
/// assert_eq!(ctx.task_data().len(), 1);
/// ```
#[derive(Debug)]
pub struct Context {
    verbose: bool,
    task_data: Dict,
}

impl Context {
    /// Creates a context with an empty task-data store of
    /// [`DEFAULT_TASK_DATA_CAPACITY`] slots.
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            task_data: Dict::with_pow2_capacity(DEFAULT_TASK_DATA_CAPACITY),
        }
    }

    /// Creates a context with a task-data store of the given capacity.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`] unless `capacity` is a non-zero power of
    /// two.
    pub fn with_capacity(verbose: bool, capacity: usize) -> Result<Self, InvalidCapacity> {
        Ok(Self {
            verbose,
            task_data: Dict::with_capacity(capacity)?,
        })
    }

    /// Whether this run should emit diagnostic lines.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Read view of the task-data store.
    ///
    /// Writes go through the typed accessors ([`set_i64`](Self::set_i64)
    /// and friends) so that every mutation carries a value kind.
    pub fn task_data(&self) -> &Dict {
        &self.task_data
    }

    pub(crate) fn task_data_mut(&mut self) -> &mut Dict {
        &mut self.task_data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_round_trip() {
        assert!(Context::new(true).verbose());
        assert!(!Context::new(false).verbose());
    }

    #[test]
    fn test_default_store_is_empty() {
        let ctx = Context::new(false);
        assert!(ctx.task_data().is_empty());
        assert_eq!(ctx.task_data().capacity(), DEFAULT_TASK_DATA_CAPACITY);
    }

    #[test]
    fn test_with_capacity_validates() {
        assert!(Context::with_capacity(false, 100).is_err());
        assert!(Context::with_capacity(false, 128).is_ok());
    }
}
