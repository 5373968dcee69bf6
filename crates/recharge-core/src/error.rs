//! Core error types for recharge-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! errors reject bad input before it reaches the interaction log;
//! storage errors are surfaced so callers can decide whether to degrade.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recharge-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Assistant-related errors
    #[error("Assistant error from '{generator}': {message}")]
    Assistant { generator: String, message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to resolve or create the data directory
    #[error("Failed to open data directory at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Failed to write a value
    #[error("Failed to write '{key}': {message}")]
    WriteFailed { key: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors for interaction drafts and engine commands.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Duration must be at least one minute
    #[error("duration must be positive, got {0} minutes")]
    NonPositiveDuration(u32),

    /// Numeric field outside its documented range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Value is not a finite number
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
