//! Seams between the engine and the content / progress it works on.

use std::collections::HashMap;

use crate::answer::evaluate;
use crate::model::{AnswerOption, Exercise, Question, QuestionType};
use crate::results::CompletionRecord;

// ---------------------------------------------------------------------------
// Gradable
// ---------------------------------------------------------------------------

/// Anything that carries a stored answer key and can grade a submission.
///
/// Implemented by lesson [`Exercise`]s and exam [`Question`]s so the score
/// aggregator works over either.
pub trait Gradable {
    fn id(&self) -> &str;

    fn question_type(&self) -> QuestionType;

    /// The raw stored answer encoding.
    fn correct_answer(&self) -> &str;

    fn options(&self) -> &[AnswerOption];

    /// Grade a raw submission against this item's answer key.
    fn grade(&self, submission: Option<&str>) -> bool {
        evaluate(
            self.question_type(),
            self.correct_answer(),
            submission,
            self.options(),
        )
    }
}

macro_rules! impl_gradable {
    ($ty:ty) => {
        impl Gradable for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn question_type(&self) -> QuestionType {
                self.question_type
            }

            fn correct_answer(&self) -> &str {
                &self.correct_answer
            }

            fn options(&self) -> &[AnswerOption] {
                &self.options
            }
        }
    };
}

impl_gradable!(Exercise);
impl_gradable!(Question);

impl<T: Gradable + ?Sized> Gradable for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn question_type(&self) -> QuestionType {
        (**self).question_type()
    }

    fn correct_answer(&self) -> &str {
        (**self).correct_answer()
    }

    fn options(&self) -> &[AnswerOption] {
        (**self).options()
    }
}

// ---------------------------------------------------------------------------
// Completion lookup
// ---------------------------------------------------------------------------

/// Read-only view of prior completion records, keyed by lesson or exam id.
pub trait CompletionLookup {
    /// Whether the lesson or exam has a passing completion record.
    fn is_passed(&self, subject_id: &str) -> bool;
}

impl CompletionLookup for HashMap<String, CompletionRecord> {
    fn is_passed(&self, subject_id: &str) -> bool {
        self.get(subject_id).is_some_and(|record| record.passed)
    }
}

impl CompletionLookup for HashMap<String, bool> {
    fn is_passed(&self, subject_id: &str) -> bool {
        self.get(subject_id).copied().unwrap_or(false)
    }
}

impl<T: CompletionLookup + ?Sized> CompletionLookup for &T {
    fn is_passed(&self, subject_id: &str) -> bool {
        (**self).is_passed(subject_id)
    }
}
