//! Error types for widget configuration

use thiserror::Error;

/// Rejected widget configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("tick interval must be positive, got {0}")]
    InvalidTickInterval(i32),

    #[error("invalid range {minimum}..={maximum}: minimum exceeds maximum or the span overflows")]
    InvalidRange { minimum: i32, maximum: i32 },
}

pub type Result<T> = std::result::Result<T, WidgetError>;
