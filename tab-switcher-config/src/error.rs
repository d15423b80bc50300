//! Typed error variants for the tab-switcher-config crate.
//!
//! `Config::load` and `Config::save` still return `anyhow::Result`; callers
//! that want to match on a failure mode can downcast to [`ConfigError`].
//!
//! ```rust,no_run
//! use tab_switcher_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Serialize(s) => eprintln!("YAML write error: {s}"),
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    /// The in-memory config could not be rendered back to YAML.
    #[error("YAML serialization error in config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),
}
