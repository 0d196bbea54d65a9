//! # Generator
//!
//! Runs requests through a provider and turns every failure into an empty
//! value plus a notification for the user. Nothing here returns an error to
//! the caller; the editor only ever sees markup (possibly empty).

use crate::protocol::response_text;
use crate::{
    extract_code_from_markdown, parse_quiz, GenerationConfig, GenerationError, GenerationRequest,
    ImageInput, QuizQuestion,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

pub const MARKUP_FAILED: &str = "Failed to generate code. Please try again.";
pub const QUIZ_FAILED: &str = "Failed to generate quiz. Please try again.";

/// Sends a request body to the model and returns the raw response JSON
pub trait GenerationProvider {
    fn complete(&self, url: &str, body: &Value) -> Result<Value, GenerationError>;
}

impl<F> GenerationProvider for F
where
    F: Fn(&str, &Value) -> Result<Value, GenerationError>,
{
    fn complete(&self, url: &str, body: &Value) -> Result<Value, GenerationError> {
        self(url, body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated<T> {
    pub value: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl<T: Default> Generated<T> {
    fn failed(message: &str) -> Self {
        Self {
            value: T::default(),
            notification: Some(Notification::error(message)),
        }
    }
}

pub struct Generator<P> {
    provider: P,
    config: GenerationConfig,
}

impl<P: GenerationProvider> Generator<P> {
    pub fn new(provider: P, config: GenerationConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Markup for an image; empty on failure
    pub fn generate_markup(&self, image: ImageInput) -> Generated<String> {
        let request = GenerationRequest::Markup { image };
        match self
            .request_text(&request)
            .and_then(|text| extract_code_from_markdown(&text))
        {
            Ok(markup) => {
                debug!(bytes = markup.len(), "Generated markup");
                Generated {
                    value: markup,
                    notification: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Error generating code");
                Generated::failed(MARKUP_FAILED)
            }
        }
    }

    /// Quiz questions about `topic`; empty on failure
    pub fn generate_quiz(&self, topic: &str) -> Generated<Vec<QuizQuestion>> {
        let request = GenerationRequest::Quiz {
            topic: topic.to_string(),
        };
        match self.request_text(&request).and_then(|text| parse_quiz(&text)) {
            Ok(questions) => {
                debug!(questions = questions.len(), "Generated quiz");
                Generated {
                    value: questions,
                    notification: None,
                }
            }
            Err(e) => {
                error!(error = %e, "Error generating quiz");
                Generated::failed(QUIZ_FAILED)
            }
        }
    }

    fn request_text(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = request.body(&self.config)?;
        debug!(kind = request.kind(), model = %self.config.model, "Sending generation request");
        let response = self.provider.complete(&self.config.request_url(), &body)?;
        response_text(&response)
    }
}
