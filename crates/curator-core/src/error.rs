//! Error types for curator-core
//!
//! Four kinds of failure reach the user: validation (the store refuses a
//! mutation), rendering (one record's notation cannot be drawn), transport
//! (the backend could not be reached or answered with a failure status) and
//! protocol (a success response without the field the action needed). The
//! last kind is not an error value: it is reported as a [`crate::Notice`].

use thiserror::Error;

/// Result type alias for curator operations
pub type Result<T> = std::result::Result<T, CuratorError>;

/// Main error type for curator operations
#[derive(Error, Debug)]
pub enum CuratorError {
    /// Record store refused a mutation
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Structure rendering failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Backend request failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Record store validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The mutation would leave the article without compounds
    #[error("Cannot delete every compound from an article")]
    MinimumOneRecord,

    /// An index does not address a record
    #[error("Record index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Structure rendering errors, isolated to one record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Nothing to render
    #[error("Empty notation")]
    EmptyNotation,

    /// The notation string is malformed
    #[error("Invalid notation at {position}: {message}")]
    Parse { position: usize, message: String },

    /// Valid input the engine cannot handle (e.g. a V3000 MOL block)
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// The drawing engine could not process the notation
    #[error("Unable to process SMILES: {0}")]
    Engine(String),
}

/// Backend transport errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },

    #[error("Server responded with status {status}")]
    Status { status: u16 },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    #[error("Could not decode response: {message}")]
    Decode { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else if let Some(status) = err.status() {
            TransportError::Status {
                status: status.as_u16(),
            }
        } else {
            TransportError::RequestFailed {
                message: err.to_string(),
            }
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Value is out of valid range
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// A URL setting does not parse
    #[error("Invalid URL for {field}: {message}")]
    InvalidUrl { field: String, message: String },

    /// The configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
