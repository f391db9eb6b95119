//! Question sources.
//!
//! A [`QuestionSource`] supplies one trivia question per request. The real
//! implementation, [`OpenTriviaSource`], talks to the Open Trivia Database
//! over HTTP; tests substitute stub sources through the same trait.

use std::fmt;

use async_trait::async_trait;

use crate::models::{Difficulty, Question};

mod decode;
mod otdb;

pub use decode::decode_html_entities;
pub use otdb::OpenTriviaSource;

/// A question source usable behind the session controller.
pub type BoxedSource = Box<dyn QuestionSource + Send + Sync>;

/// Supplies one question of the requested difficulty per call.
#[async_trait]
pub trait QuestionSource {
    /// Fetch a single question.
    ///
    /// Every failure is retryable: the caller keeps its state and may call
    /// again or give up.
    async fn fetch(&self, difficulty: Difficulty) -> Result<Question, SourceError>;
}

/// Error type for question source failures.
#[derive(Debug)]
pub enum SourceError {
    /// Transport-level failure: connect, timeout, or body read/decode.
    Http(reqwest::Error),
    /// Non-success HTTP status.
    Status(u16),
    /// Success response carrying an empty results array.
    Empty,
    /// Response payload that does not match the expected shape.
    Malformed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Http(e) => write!(f, "HTTP request failed: {}", e),
            SourceError::Status(code) => write!(f, "Unexpected HTTP status {}", code),
            SourceError::Empty => write!(f, "No questions returned"),
            SourceError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Http(err)
    }
}
