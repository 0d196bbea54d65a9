use crate::GenerationError;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Every question offers exactly this many choices
pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// Parse the JSON array embedded in a model response. Anything before the
/// first `[` or after the last `]` is ignored.
///
/// Questions without exactly [`OPTIONS_PER_QUESTION`] options are dropped;
/// a response where every question is dropped is malformed.
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>, GenerationError> {
    let start = text.find('[').unwrap_or(0);
    let end = text.rfind(']').map(|i| i + 1).unwrap_or(text.len());
    if start >= end {
        return Err(GenerationError::MalformedResponse("no JSON array"));
    }

    let parsed: Vec<QuizQuestion> = serde_json::from_str(&text[start..end])?;
    let total = parsed.len();
    let questions: Vec<QuizQuestion> = parsed
        .into_iter()
        .filter(|q| q.options.len() == OPTIONS_PER_QUESTION)
        .collect();

    if questions.len() < total {
        warn!(dropped = total - questions.len(), "Dropped quiz questions with wrong option count");
    }
    if questions.is_empty() && total > 0 {
        return Err(GenerationError::MalformedResponse("no question has four options"));
    }
    Ok(questions)
}
