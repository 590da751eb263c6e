//! # Musubi (結び)
//!
//! Runtime support for process engines: typed task data shared across the
//! steps of a process run, plus the lifecycle and manual-task glue an
//! engine calls around step execution.
//!
//! The name "Musubi" (結び) means "knot" or "tying" in Japanese,
//! representing how this library ties the steps of a process run together
//! through shared state.
//!
//! ## Features
//!
//! - **Typed**: per-kind accessors (`bool`, `i64`, `str`, nested dict)
//!   report a mismatch instead of coercing
//! - **Two call conventions**: fallible `try_*` operations returning
//!   [`TaskDataError`], and panicking forms for keys whose presence is a
//!   program invariant
//! - **Predictable storage**: a fixed-capacity open-addressing table with
//!   no rehashing and no per-entry allocation
//! - **Verbose tracing**: one per-run flag gates `tracing` diagnostics in
//!   the store and its collaborators
//! - **Lightweight**: `thiserror` and `tracing` are the only dependencies
//!
//! ## Quick Start
//!
//! ```rust
//! use musubi::Context;
//!
//! let mut ctx = Context::new(false);
//!
//! ctx.set_i64("attempts", 3);
//! ctx.set_str("assignee", "alice");
//!
//! assert_eq!(ctx.get_i64("attempts"), 3);
//! assert_eq!(ctx.get_str("assignee"), "alice");
//!
//! ctx.delete("attempts");
//! assert!(ctx.try_get_i64("attempts").is_err());
//! ```
//!
//! ## Fallible Access
//!
//! Every operation has a `try_` form that reports failures as values. A
//! key holds whatever kind was stored last, and a lookup with the wrong
//! kind names both sides of the mismatch:
//!
//! ```rust
//! use musubi::{Context, TaskDataError};
//!
//! let mut ctx = Context::new(false);
//! ctx.set_bool("paid", true);
//!
//! match ctx.try_get_i64("paid") {
//!     Err(TaskDataError::KeyTypeMismatch { key, expected, found }) => {
//!         eprintln!("'{key}' holds {found}, not {expected}");
//!     }
//!     Err(error) => eprintln!("lookup failed: {error}"),
//!     Ok(value) => println!("paid = {value}"),
//! }
//! ```
//!
//! ## Nested Task Data
//!
//! Dict values own their payloads, so a nested dict moves into the store
//! and lives as long as its key:
//!
//! ```rust
//! use musubi::{dict, Context};
//!
//! let mut ctx = Context::new(false);
//!
//! let order = dict! {
//!     "id" => 42i64,
//!     "paid" => true,
//!     "customer" => "alice",
//! }?;
//! ctx.set_dict("order", order);
//!
//! let order = ctx.get_dict("order");
//! assert_eq!(order.len(), 3);
//! # Ok::<(), musubi::InvalidCapacity>(())
//! ```

mod context;
mod dict;
mod error;
mod lifecycle;
mod manual_task;
mod task_data;
mod value;

pub mod prelude;

pub use context::{Context, DEFAULT_TASK_DATA_CAPACITY};
pub use dict::{Dict, InvalidCapacity};
pub use error::{TaskDataError, SUCCESS_CODE};
pub use lifecycle::{did_run_element, will_run_element};
pub use manual_task::handle_manual_task;
pub use value::{Value, ValueKind};

/// Builds a [`Dict`] from key/value literals.
///
/// Values are converted with [`Value::from`] and the table is sized for the
/// number of entries, so this expands to the same
/// `Result<Dict, InvalidCapacity>` as [`Dict::from_entries`].
///
/// # Example
///
/// ```rust
/// use musubi::dict;
///
/// let totals = dict! {
///     "net" => 4200i64,
///     "taxed" => true,
/// }?;
///
/// assert_eq!(totals.len(), 2);
/// # Ok::<(), musubi::InvalidCapacity>(())
/// ```
#[macro_export]
macro_rules! dict {
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Dict::from_entries([
            $(($key, $crate::Value::from($value))),+
        ])
    };
}
