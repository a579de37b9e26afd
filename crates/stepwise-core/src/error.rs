//! Error types.
//!
//! Grading never surfaces [`AnswerDecodeError`] to callers: the evaluator
//! logs it and degrades to a fallback or to "incorrect". It is public so
//! content validation can report exactly why an encoding is unreadable.

use thiserror::Error;

/// Failure to decode a stored answer key or a submission.
#[derive(Debug, Error)]
pub enum AnswerDecodeError {
    /// A fill-blank key is not a JSON array of strings.
    #[error("acceptable answers are not a JSON string array: {0}")]
    AcceptedAnswers(#[source] serde_json::Error),

    /// A matching key or submission is not a JSON array of `{left, right}` pairs.
    #[error("matching pairs are not a JSON array of {{left, right}} objects: {0}")]
    Pairs(#[source] serde_json::Error),
}

/// Errors raised by the engine façade when a request names missing content.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No lesson or exam with this id exists in the snapshot.
    #[error("no lesson or exam with id '{0}' in the content snapshot")]
    UnknownSubject(String),

    /// A passing score outside `0..=100` was requested.
    #[error("passing score must be between 0 and 100, got {0}")]
    InvalidPassingScore(f64),
}

impl EngineError {
    /// Returns `true` if the caller named content that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::UnknownSubject(_))
    }
}
