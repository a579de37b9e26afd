//! Core data model types for stepwise.
//!
//! A [`ContentSnapshot`] is the read-only content tree handed to the engine
//! for one layout or grading pass: levels contain units, units contain
//! lessons (with exercises) and exams (with questions).

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The full content hierarchy for one pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSnapshot {
    #[serde(default)]
    pub levels: Vec<Level>,
}

/// A localized display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Language code (e.g. "en", "tr").
    pub language: String,
    /// Display text in that language.
    pub text: String,
}

/// Top of the hierarchy (e.g. "A1 Beginner").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// A themed group of lessons and exams inside a level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    #[serde(default)]
    pub exams: Vec<Exam>,
}

/// A lesson and the exercises that make it up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    /// Per-lesson passing threshold; falls back to the configured default.
    #[serde(default)]
    pub passing_score: Option<f64>,
}

/// One gradable item inside a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// Stored answer encoding; its meaning depends on `question_type`.
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// An exam, optionally tied to a lesson of the same unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    /// Lesson this exam follows on the path. `None` places it at the unit's end.
    #[serde(default)]
    pub lesson_id: Option<String>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub passing_score: Option<f64>,
}

/// One gradable item inside an exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub order: i32,
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    #[serde(default)]
    pub correct_answer: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// A selectable option of a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    #[serde(default)]
    pub translations: Vec<Translation>,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, texts: &[(&str, &str)]) -> Self {
        Self {
            id: id.into(),
            translations: texts
                .iter()
                .map(|(language, text)| Translation {
                    language: (*language).to_string(),
                    text: (*text).to_string(),
                })
                .collect(),
        }
    }
}

/// How a question's answer is encoded and graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    #[serde(alias = "multiple-choice", alias = "mcq")]
    MultipleChoice,
    #[serde(alias = "fill-blank", alias = "fill_in_blank")]
    FillBlank,
    #[serde(alias = "match")]
    Matching,
    /// Any unrecognized type; graded like multiple-choice.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionType::MultipleChoice => write!(f, "multiple_choice"),
            QuestionType::FillBlank => write!(f, "fill_blank"),
            QuestionType::Matching => write!(f, "matching"),
            QuestionType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for QuestionType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "multiple_choice" | "multiple-choice" | "mcq" => QuestionType::MultipleChoice,
            "fill_blank" | "fill-blank" | "fill_in_blank" => QuestionType::FillBlank,
            "matching" | "match" => QuestionType::Matching,
            _ => QuestionType::Unknown,
        })
    }
}

/// A lesson or exam: anything a completion record can be issued for.
#[derive(Debug, Clone, Copy)]
pub enum Subject<'a> {
    Lesson(&'a Lesson),
    Exam(&'a Exam),
}

impl Subject<'_> {
    pub fn id(&self) -> &str {
        match self {
            Subject::Lesson(lesson) => &lesson.id,
            Subject::Exam(exam) => &exam.id,
        }
    }

    pub fn passing_score(&self) -> Option<f64> {
        match self {
            Subject::Lesson(lesson) => lesson.passing_score,
            Subject::Exam(exam) => exam.passing_score,
        }
    }
}

impl ContentSnapshot {
    /// Find the lesson or exam with the given id. Lessons win on id collision.
    pub fn find_subject(&self, id: &str) -> Option<Subject<'_>> {
        let units = || self.levels.iter().flat_map(|level| level.units.iter());
        units()
            .flat_map(|unit| unit.lessons.iter())
            .find(|lesson| lesson.id == id)
            .map(Subject::Lesson)
            .or_else(|| {
                units()
                    .flat_map(|unit| unit.exams.iter())
                    .find(|exam| exam.id == id)
                    .map(Subject::Exam)
            })
    }
}

/// Pick the display text for `language`, falling back to the first translation.
pub fn localized<'a>(translations: &'a [Translation], language: &str) -> Option<&'a str> {
    translations
        .iter()
        .find(|t| t.language.eq_ignore_ascii_case(language))
        .or_else(|| translations.first())
        .map(|t| t.text.as_str())
}
