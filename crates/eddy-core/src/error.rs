//! Error types for Eddy

use thiserror::Error;

/// The main error type for Eddy operations
#[derive(Debug, Error)]
pub enum EddyError {
    #[error("Invalid viewport: width and height must be positive and finite, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Invalid grid: rows and cols must be positive, got {rows}x{cols}")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Eddy operations
pub type Result<T> = std::result::Result<T, EddyError>;

impl From<toml::de::Error> for EddyError {
    fn from(err: toml::de::Error) -> Self {
        EddyError::TomlParseError(err.to_string())
    }
}
