//! # Menu Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io / toml errors ──┐                                              │
//! │                          ├──► MenuError (this module) ──► caller        │
//! │  tally-core errors ──────┘                                              │
//! │                                                                         │
//! │  Toggles never produce a MenuError: the default toggles return a bool  │
//! │  and the try_* variants return tally-core's CoreError.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tally_core::{CoreError, ValidationError};
use thiserror::Error;

/// Errors from loading, saving or checking a menu definition.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Reading or writing the config file failed.
    #[error("Menu config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for a menu.
    #[error("Failed to parse menu config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The menu could not be written as TOML.
    #[error("Failed to serialize menu config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// An item, tax or discount failed validation.
    #[error("Invalid menu entry: {0}")]
    Validation(#[from] ValidationError),

    /// A domain lookup failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The menu as a whole is inconsistent.
    #[error("Invalid menu config: {0}")]
    InvalidConfig(String),

    /// No explicit path was given and no platform config dir exists.
    #[error("No menu config path available")]
    NoConfigPath,
}

/// Convenience type alias for Results with MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
