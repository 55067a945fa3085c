//! Utilities.
pub mod url;
