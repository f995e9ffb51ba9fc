//! Error types for the chunkstream engine.

use std::error::Error as StdError;
use std::fmt;
use std::result;

/// A specialized Result type for chunkstream operations.
pub type Result<T> = result::Result<T, Error>;

/// The error type for chunkstream operations.
#[derive(Debug)]
pub enum Error {
    /// Store-side retrieval or submission errors
    Store(String),
    /// Record payload decode errors
    Decode(String),
    /// Series encode errors
    Encode(String),
    /// Invalid analysis request errors
    InvalidRequest(String),
    /// Configuration errors
    Config(String),
    /// I/O errors
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Store(msg) => write!(f, "Store error: {}", msg),
            Error::Decode(msg) => write!(f, "Decode error: {}", msg),
            Error::Encode(msg) => write!(f, "Encode error: {}", msg),
            Error::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
