//! Error types for the editor

use thiserror::Error;

/// Editing itself never fails (absent ids are no-ops); errors only come from
/// loading configuration.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config value for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },
}
