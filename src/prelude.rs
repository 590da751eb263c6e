//! Commonly used types

pub use crate::context::Context;
pub use crate::dict::{Dict, InvalidCapacity};
pub use crate::error::TaskDataError;
pub use crate::value::{Value, ValueKind};
