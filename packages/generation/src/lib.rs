//! # Liveedit Generation
//!
//! Request shaping and response handling for the model that produces the
//! markup (and quizzes) the editor works on.
//!
//! ```text
//! image ──▶ GenerationRequest ──▶ GenerationProvider ──▶ response JSON
//!                                  (host transport)          │
//!                                                            ▼
//!            Generated { value, notification } ◀── extract / parse
//! ```
//!
//! The crate does no I/O of its own. Hosts implement [`GenerationProvider`]
//! over whatever transport they have (browser `fetch`, an HTTP client, a
//! fixture in tests).

mod config;
mod errors;
mod extract;
mod generator;
pub mod prompts;
pub mod protocol;
mod quiz;

pub use config::GenerationConfig;
pub use errors::GenerationError;
pub use extract::extract_code_from_markdown;
pub use generator::{
    Generated, GenerationProvider, Generator, Notification, NotificationLevel, MARKUP_FAILED,
    QUIZ_FAILED,
};
pub use protocol::{response_text, GenerationRequest, ImageInput};
pub use quiz::{parse_quiz, QuizQuestion, OPTIONS_PER_QUESTION};
