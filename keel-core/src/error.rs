//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum KeelError {
    /// Parameter sets do not correspond entry by entry.
    #[error("Parameter shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A parameter name is already taken in the set.
    #[error("Duplicate parameter: {0}")]
    DuplicateParam(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
