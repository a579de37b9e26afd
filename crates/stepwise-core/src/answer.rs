//! Answer evaluation.
//!
//! The stored `correct_answer` string is decoded once into an [`AnswerKey`]
//! according to the question type, then compared against a raw submission.
//! Malformed data never fails the call; it grades as incorrect.

use serde::{Deserialize, Serialize};

use crate::error::AnswerDecodeError;
use crate::model::{AnswerOption, QuestionType};

/// One left/right association of a matching question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl MatchPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Both sides equal, ignoring case and surrounding whitespace.
    pub fn matches(&self, other: &MatchPair) -> bool {
        normalize(&self.left) == normalize(&other.left)
            && normalize(&self.right) == normalize(&other.right)
    }
}

/// A decoded answer key.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerKey {
    /// Correct option id, or the correct option's display text.
    Choice(String),
    /// Every acceptable fill-blank answer.
    Accepted(Vec<String>),
    /// The full set of correct matching pairs.
    Pairs(Vec<MatchPair>),
    /// A matching key that could not be decoded. Accepts nothing.
    Unreadable,
}

impl AnswerKey {
    /// Decode `encoding` strictly, reporting why it is malformed.
    pub fn try_decode(
        question_type: QuestionType,
        encoding: &str,
    ) -> Result<Self, AnswerDecodeError> {
        match question_type {
            QuestionType::FillBlank => serde_json::from_str::<Vec<String>>(encoding)
                .map(AnswerKey::Accepted)
                .map_err(AnswerDecodeError::AcceptedAnswers),
            QuestionType::Matching => decode_pairs(encoding).map(AnswerKey::Pairs),
            QuestionType::MultipleChoice | QuestionType::Unknown => {
                Ok(AnswerKey::Choice(encoding.to_string()))
            }
        }
    }

    /// Decode `encoding`, degrading instead of failing.
    ///
    /// A fill-blank key that is not a JSON array becomes a single literal
    /// answer; an undecodable matching key becomes [`AnswerKey::Unreadable`].
    pub fn decode(question_type: QuestionType, encoding: &str) -> Self {
        match Self::try_decode(question_type, encoding) {
            Ok(key) => key,
            Err(e) => {
                tracing::debug!("{question_type} answer key fell back: {e}");
                match question_type {
                    QuestionType::FillBlank => AnswerKey::Accepted(vec![encoding.to_string()]),
                    _ => AnswerKey::Unreadable,
                }
            }
        }
    }

    /// Whether `submission` is a correct answer for this key.
    pub fn accepts(&self, submission: &str, options: &[AnswerOption]) -> bool {
        if submission.trim().is_empty() {
            return false;
        }

        match self {
            AnswerKey::Choice(expected) => choice_matches(expected, submission, options),
            AnswerKey::Accepted(accepted) => {
                let answer = normalize(submission);
                accepted.iter().any(|a| normalize(a) == answer)
            }
            AnswerKey::Pairs(expected) => match decode_pairs(submission) {
                Ok(submitted) => pairs_match(expected, &submitted),
                Err(e) => {
                    tracing::debug!("matching submission rejected: {e}");
                    false
                }
            },
            AnswerKey::Unreadable => false,
        }
    }
}

/// Grade one answer.
///
/// `submission` is the raw user answer: an option id, free text, or a JSON
/// array of `{left, right}` pairs depending on `question_type`. A missing
/// or blank submission is incorrect.
pub fn evaluate(
    question_type: QuestionType,
    correct_answer: &str,
    submission: Option<&str>,
    options: &[AnswerOption],
) -> bool {
    let Some(submission) = submission else {
        return false;
    };
    AnswerKey::decode(question_type, correct_answer).accepts(submission, options)
}

/// Decode a JSON array of `{left, right}` objects.
pub fn decode_pairs(encoding: &str) -> Result<Vec<MatchPair>, AnswerDecodeError> {
    serde_json::from_str(encoding).map_err(AnswerDecodeError::Pairs)
}

fn choice_matches(expected: &str, submission: &str, options: &[AnswerOption]) -> bool {
    let Some(selected) = options.iter().find(|o| o.id == submission) else {
        return false;
    };
    if selected.id == expected {
        return true;
    }

    // Fallback: the key stores the correct option's text instead of its id.
    let expected = normalize(expected);
    !expected.is_empty()
        && selected
            .translations
            .iter()
            .any(|t| normalize(&t.text) == expected)
}

fn pairs_match(expected: &[MatchPair], submitted: &[MatchPair]) -> bool {
    !submitted.is_empty()
        && submitted.len() == expected.len()
        && expected
            .iter()
            .all(|pair| submitted.iter().any(|s| pair.matches(s)))
}

pub(crate) fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
