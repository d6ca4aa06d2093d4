// src/error.rs

//! Error types for portup

use thiserror::Error;

/// Errors raised by the portup library
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The package has no archive of the requested format
    #[error("No {0} archive available")]
    ArchiveUnavailable(String),

    /// A dependency phase outside of build/run/test
    #[error("Unknown dependency phase: {0}")]
    UnknownPhase(String),

    #[error("Unhandled frontend: {0} (expected pypi, cpan or rubygems)")]
    UnhandledFrontend(String),

    /// The `port` command could not be run or produced unexpected output
    #[error("port command failed: {0}")]
    PortCommand(String),
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, Error>;
