//! Error types for the liftplan_core library.

use std::io;
use uuid::Uuid;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for liftplan_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// User preferences violate their stated constraints
    #[error("Invalid preferences: {0}")]
    InvalidPreference(String),

    /// Exercise catalog failed to load or validate
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No stored plan with the given id
    #[error("No saved plan with id {0}")]
    PlanNotFound(Uuid),
}
