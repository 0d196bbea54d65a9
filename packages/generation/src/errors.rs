use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(&'static str),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
