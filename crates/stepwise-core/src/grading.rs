//! Score aggregation over a lesson's exercises or an exam's questions.

use std::collections::HashMap;

use crate::answer::decode_pairs;
use crate::model::{Exam, Lesson, QuestionType, Subject};
use crate::results::{CompletionRecord, Grading, QuestionResult};
use crate::traits::Gradable;

/// Passing threshold used when neither the subject nor the caller sets one.
pub const DEFAULT_PASSING_SCORE: f64 = 70.0;

/// Raw user answers keyed by question id.
pub type Submissions = HashMap<String, String>;

/// Grade every question and summarize the attempt.
///
/// Questions without a submission count as incorrect; callers are expected
/// to check [`pending_questions`] before submitting.
pub fn aggregate<Q: Gradable>(
    subject_id: &str,
    questions: &[Q],
    submissions: &Submissions,
    passing_score: Option<f64>,
) -> Grading {
    let results: Vec<QuestionResult> = questions
        .iter()
        .map(|q| QuestionResult {
            question_id: q.id().to_string(),
            correct: q.grade(submissions.get(q.id()).map(String::as_str)),
        })
        .collect();

    let correct = results.iter().filter(|r| r.correct).count() as u32;
    let record = CompletionRecord::new(
        subject_id,
        correct,
        results.len() as u32,
        passing_score.unwrap_or(DEFAULT_PASSING_SCORE),
    );

    tracing::debug!(
        "graded {subject_id}: {}/{} correct, score {:.1}, passed {}",
        record.correct_count,
        record.total_count,
        record.score,
        record.passed
    );

    Grading { record, results }
}

/// Grade a lesson attempt. The lesson's own passing score wins over `default_passing`.
pub fn grade_lesson(lesson: &Lesson, submissions: &Submissions, default_passing: f64) -> Grading {
    grade_subject(Subject::Lesson(lesson), submissions, None, default_passing)
}

/// Grade an exam attempt. The exam's own passing score wins over `default_passing`.
pub fn grade_exam(exam: &Exam, submissions: &Submissions, default_passing: f64) -> Grading {
    grade_subject(Subject::Exam(exam), submissions, None, default_passing)
}

/// Grade a lesson or exam attempt, items in `order`.
///
/// Threshold precedence: `passing_override`, then the subject's own passing
/// score, then `default_passing`.
pub fn grade_subject(
    subject: Subject<'_>,
    submissions: &Submissions,
    passing_override: Option<f64>,
    default_passing: f64,
) -> Grading {
    let passing = passing_override
        .or(subject.passing_score())
        .unwrap_or(default_passing);
    match subject {
        Subject::Lesson(lesson) => aggregate(
            &lesson.id,
            &sorted_by_order(&lesson.exercises, |e| e.order),
            submissions,
            Some(passing),
        ),
        Subject::Exam(exam) => aggregate(
            &exam.id,
            &sorted_by_order(&exam.questions, |q| q.order),
            submissions,
            Some(passing),
        ),
    }
}

/// [`pending_questions`] over a lesson's exercises or an exam's questions.
pub fn pending_for(subject: Subject<'_>, submissions: &Submissions) -> Vec<String> {
    match subject {
        Subject::Lesson(lesson) => pending_questions(
            &sorted_by_order(&lesson.exercises, |e| e.order),
            submissions,
        ),
        Subject::Exam(exam) => {
            pending_questions(&sorted_by_order(&exam.questions, |q| q.order), submissions)
        }
    }
}

/// Ids of questions that do not have a usable answer yet.
///
/// A blank answer is pending; so is a matching answer without at least one pair.
pub fn pending_questions<Q: Gradable>(questions: &[Q], submissions: &Submissions) -> Vec<String> {
    questions
        .iter()
        .filter(|q| match submissions.get(q.id()) {
            None => true,
            Some(answer) if answer.trim().is_empty() => true,
            Some(answer) if q.question_type() == QuestionType::Matching => {
                decode_pairs(answer).map_or(true, |pairs| pairs.is_empty())
            }
            Some(_) => false,
        })
        .map(|q| q.id().to_string())
        .collect()
}

pub(crate) fn sorted_by_order<T>(items: &[T], order: impl Fn(&T) -> i32) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| order(*item));
    sorted
}
