//! Error types for strata_core

use std::io;
use thiserror::Error;

/// Errors that can occur when looking up a resource
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No embedded entry or file for the path
    #[error("resource not found: {0}")]
    NotFound(String),

    /// IO error when reading a file-system resource
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Resource requested as text is not UTF-8
    #[error("resource {0} is not valid UTF-8")]
    Utf8(String),
}

/// Errors that can occur when loading a theme
#[derive(Error, Debug)]
pub enum ThemeError {
    /// IO error when reading the theme file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Theme file is not valid TOML or has the wrong shape
    #[error("theme parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Unknown color token or unparsable color value
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

/// Result type for resource lookups
pub type Result<T> = std::result::Result<T, ResourceError>;
