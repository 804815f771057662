//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (limits, cache location, header names)
//! - The library [`Config`] and its validation
//! - Option enums shared with the CLI

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, ContentFormat, LogFormat, LogLevel};
