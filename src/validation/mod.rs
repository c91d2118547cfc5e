//! The validation engine
//!
//! This module combines the nil/blank short-circuits, the syntax checker,
//! and the reachability checker into a single accept/reject decision.

mod reachability;
pub mod validator;

// Re-export commonly used items
pub use validator::UrlValidator;
