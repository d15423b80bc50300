//! Configuration system for tab-switcher.
//!
//! This crate provides configuration loading, saving, and default values
//! for the document switching core. It includes:
//!
//! - The persisted tab switch strategy identifier
//! - Log level selection for the debug log bridge
//! - Typed errors for config I/O and parsing

pub mod config;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{Config, DEFAULT_TAB_SWITCH_STRATEGY};
pub use error::ConfigError;
pub use types::LogLevel;
