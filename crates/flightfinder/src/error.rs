//! Error types for flightfinder.
//!
//! Browsing itself is infallible: lookups that miss are no-ops and image
//! failures fall back locally. Errors only arise at the edges, when loading
//! the dataset or the configuration, or when a host hands us a control token
//! we do not recognise.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightfinder operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Dataset Errors ===
    /// The dataset file could not be read.
    #[error("failed to read dataset at {path}: {source}")]
    DatasetRead {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset file is not a valid experiences document.
    #[error("failed to parse dataset at {path}: {source}")]
    DatasetParse {
        /// Path to the dataset file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Control Errors ===
    /// A control emitted a value that does not map onto the filter state.
    #[error(transparent)]
    InvalidControl(#[from] ParseControlError),

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A control token that is not one of the values the control can take.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {control} value '{value}'")]
pub struct ParseControlError {
    /// Name of the control the token was meant for.
    pub control: &'static str,
    /// The rejected token.
    pub value: String,
}

impl ParseControlError {
    /// Create a new parse error for the named control.
    #[must_use]
    pub fn new(control: &'static str, value: impl Into<String>) -> Self {
        Self {
            control,
            value: value.into(),
        }
    }
}

/// A specialized Result type for flightfinder operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from loading the dataset.
    #[must_use]
    pub fn is_dataset_error(&self) -> bool {
        matches!(self, Self::DatasetRead { .. } | Self::DatasetParse { .. })
    }
}
