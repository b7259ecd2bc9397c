//! # Error Types
//!
//! The comparison path is total and never fails. Errors only arise when
//! parsing the small string-typed enums (`Direction`, `GroupLogic`) from
//! untyped input such as CLI arguments or hand-written rule files.

use thiserror::Error;

/// Top-level error type for `trc-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A transaction direction string was neither `IN` nor `OUT`.
    #[error("unknown transaction direction: {0:?} (expected IN or OUT)")]
    UnknownDirection(String),

    /// A requirement group logic string was neither `AND` nor `OR`.
    #[error("unknown group logic: {0:?} (expected AND or OR)")]
    UnknownLogic(String),
}
