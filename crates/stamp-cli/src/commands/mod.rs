//! CLI command implementations for stamp.

pub mod check;
pub mod token;
