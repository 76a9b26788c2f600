//! Custom error types for ColorWall devices.
//!
//! Reads and full synchronizations fail with [`ColorWallError::Connection`];
//! writes report a non-200 status as `Ok(false)` instead of an error.

use thiserror::Error;

/// Main error type for ColorWall operations.
#[derive(Error, Debug)]
pub enum ColorWallError {
    /// Transport failure or undecodable response from the device.
    #[error("Cannot connect to ColorWall: {message}")]
    Connection { message: String },

    /// Effect id or name outside the fixed effect set.
    #[error("Unknown effect: {0}")]
    UnknownEffect(String),

    /// Settings bag with a parameter of the wrong type.
    #[error("Invalid settings for effect '{effect}': {message}")]
    InvalidSettings { effect: String, message: String },

    /// Generic invalid input error.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Config file could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ColorWallError {
    /// Build a `Connection` error from anything printable.
    pub fn connection(message: impl std::fmt::Display) -> Self {
        ColorWallError::Connection {
            message: message.to_string(),
        }
    }

    /// True for errors that mean the device could not be reached or understood.
    pub fn is_connection(&self) -> bool {
        matches!(self, ColorWallError::Connection { .. })
    }
}

impl From<reqwest::Error> for ColorWallError {
    fn from(err: reqwest::Error) -> Self {
        ColorWallError::connection(err)
    }
}

/// Result type alias for ColorWall operations.
pub type Result<T> = std::result::Result<T, ColorWallError>;
