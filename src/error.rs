//! Error types for the simulation.
//!
//! Nothing in a running session can fail for I/O reasons; the only failures are
//! configurations too cluttered for rejection sampling to finish, and settings
//! that cannot be loaded or do not describe a playable arena.

use std::io;

/// Fatal simulation error.
#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("could not place {what} after {attempts} attempts; arena too cluttered")]
    Placement { what: &'static str, attempts: u32 },

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Invalid(String),
}
