use serde::{Deserialize, Serialize};

/// Where and how generation requests are sent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Supplied by the host; never logged
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_quiz_question_count")]
    pub quiz_question_count: usize,
}

fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_quiz_question_count() -> usize {
    10
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
            quiz_question_count: default_quiz_question_count(),
        }
    }
}

impl GenerationConfig {
    /// `generateContent` URL for the configured model
    pub fn request_url(&self) -> String {
        let base = format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        match &self.api_key {
            Some(key) => format!("{}?key={}", base, key),
            None => base,
        }
    }
}
