//! Core types and foundational components
//!
//! This module contains the fundamental data types, error handling,
//! and status-code tables used throughout the crate.

pub mod error;
pub mod status;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{Result, UrlValidatorError};
pub use types::{ErrorKey, ErrorSink, Errors, Outcome};
