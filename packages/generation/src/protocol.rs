//! # Provider Protocol
//!
//! Shapes `generateContent` request bodies and reads the text back out of
//! responses. Transport is left to the [`GenerationProvider`].
//!
//! ```text
//! request:  { "contents": [ { "parts": [ { "text": .. }, { "inline_data": { "mime_type": .., "data": .. } } ] } ] }
//! response: { "candidates": [ { "content": { "parts": [ { "text": .. } ] } } ] }
//! ```
//!
//! [`GenerationProvider`]: crate::GenerationProvider

use crate::{prompts, GenerationConfig, GenerationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Base64 image payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInput {
    pub mime_type: String,
    pub data: String,
}

impl ImageInput {
    /// Split a `data:<mime>;base64,<payload>` URL
    pub fn from_data_url(url: &str) -> Result<Self, GenerationError> {
        let invalid = || GenerationError::InvalidDataUrl(truncate(url, 32));

        let rest = url.strip_prefix("data:").ok_or_else(invalid)?;
        let (header, data) = rest.split_once(',').ok_or_else(invalid)?;
        let mime_type = header.split(';').next().unwrap_or_default();
        if mime_type.is_empty() || data.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    /// Screenshot or mockup to positioned markup
    Markup { image: ImageInput },

    /// Multiple-choice quiz about a topic
    Quiz { topic: String },
}

#[derive(Debug, Serialize)]
struct RequestBody {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: ImageInput },
}

impl GenerationRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationRequest::Markup { .. } => "markup",
            GenerationRequest::Quiz { .. } => "quiz",
        }
    }

    /// JSON body for the provider
    pub fn body(&self, config: &GenerationConfig) -> Result<Value, GenerationError> {
        let parts = match self {
            GenerationRequest::Markup { image } => vec![
                Part::Text {
                    text: prompts::IMAGE_TO_MARKUP.to_string(),
                },
                Part::InlineData {
                    inline_data: image.clone(),
                },
            ],
            GenerationRequest::Quiz { topic } => vec![Part::Text {
                text: prompts::quiz(topic, config.quiz_question_count),
            }],
        };

        let body = RequestBody {
            contents: vec![Content { parts }],
        };
        Ok(serde_json::to_value(body)?)
    }
}

/// Text of the first candidate's first part. An `error` object in the
/// response is reported with its message.
pub fn response_text(response: &Value) -> Result<String, GenerationError> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed");
        return Err(GenerationError::Api(message.to_string()));
    }

    response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(GenerationError::MalformedResponse("no candidate text"))
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_url_split() {
        let image = ImageInput::from_data_url("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");

        assert!(ImageInput::from_data_url("https://example.com/a.png").is_err());
        assert!(ImageInput::from_data_url("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_markup_request_body() {
        let request = GenerationRequest::Markup {
            image: ImageInput {
                mime_type: "image/jpeg".to_string(),
                data: "AAAA".to_string(),
            },
        };
        let body = request.body(&GenerationConfig::default()).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert!(parts[0]["text"].as_str().unwrap().starts_with("Convert this image"));
        assert_eq!(parts[1], json!({"inline_data": {"mime_type": "image/jpeg", "data": "AAAA"}}));
    }

    #[test]
    fn test_quiz_request_uses_question_count() {
        let config = GenerationConfig {
            quiz_question_count: 3,
            ..Default::default()
        };
        let body = GenerationRequest::Quiz {
            topic: "Volcanoes".to_string(),
        }
        .body(&config)
        .unwrap();

        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("3 multiple-choice questions about \"Volcanoes\""));
    }

    #[test]
    fn test_response_text() {
        let response = json!({"candidates": [{"content": {"parts": [{"text": "<div>ok</div>"}]}}]});
        assert_eq!(response_text(&response).unwrap(), "<div>ok</div>");

        let error = json!({"error": {"code": 400, "message": "API key not valid"}});
        assert!(matches!(response_text(&error), Err(GenerationError::Api(m)) if m == "API key not valid"));

        assert!(matches!(
            response_text(&json!({"candidates": []})),
            Err(GenerationError::MalformedResponse(_))
        ));
    }
}
