//! End-to-end scenarios through the core engine: content in, gated path
//! and completion records out.

use std::collections::HashMap;

use stepwise_core::answer::evaluate;
use stepwise_core::config::StepwiseConfig;
use stepwise_core::engine::PathEngine;
use stepwise_core::grading::Submissions;
use stepwise_core::layout::{ItemKind, PathItem, StepClass};
use stepwise_core::model::{ContentSnapshot, QuestionType};
use stepwise_core::results::CompletionLedger;

fn engine() -> PathEngine {
    let mut config = StepwiseConfig::default();
    config.layout.mascot_every = 0;
    PathEngine::new(config)
}

fn snapshot(json: &str) -> ContentSnapshot {
    serde_json::from_str(json).unwrap()
}

fn find<'a>(items: &'a [PathItem], id: &str) -> &'a PathItem {
    items.iter().find(|i| i.id == id).unwrap()
}

fn step_ids(items: &[PathItem]) -> Vec<&str> {
    items
        .iter()
        .filter(|i| i.kind.is_step())
        .map(|i| i.id.as_str())
        .collect()
}

#[test]
fn three_lessons_first_completed() {
    let content = snapshot(
        r#"{"levels": [{"id": "a1", "units": [{"id": "u1", "lessons": [
            {"id": "l3", "order": 3},
            {"id": "l1", "order": 1},
            {"id": "l2", "order": 2}
        ]}]}]}"#,
    );
    let mut done = HashMap::new();
    done.insert("l1".to_string(), true);

    let items = engine().layout(&content, &done);

    assert_eq!(step_ids(&items), vec!["l1", "l2", "l3"]);
    assert_eq!(find(&items, "l1").step_class, StepClass::Pass);
    assert_eq!(find(&items, "l2").step_class, StepClass::Default);
    assert!(find(&items, "l2").is_active);
    assert_eq!(find(&items, "l3").step_class, StepClass::Lock);
    assert_eq!(items.iter().filter(|i| i.is_active).count(), 1);
}

#[test]
fn half_correct_fails_seventy_percent_lesson() {
    let content = snapshot(
        r#"{"levels": [{"id": "a1", "units": [{"id": "u1", "lessons": [
            {"id": "l1", "order": 1, "passing_score": 70, "exercises": [
                {"id": "q1", "order": 1, "type": "fill_blank", "correct_answer": "[\"su\"]"},
                {"id": "q2", "order": 2, "type": "multiple_choice", "correct_answer": "o1",
                 "options": [{"id": "o1"}, {"id": "o2"}]}
            ]}
        ]}]}]}"#,
    );
    let submissions: Submissions = [("q1", "Su"), ("q2", "o2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let grading = engine().grade(&content, "l1", &submissions, None).unwrap();

    assert_eq!(grading.record.correct_count, 1);
    assert_eq!(grading.record.total_count, 2);
    assert_eq!(grading.record.score, 50.0);
    assert!(!grading.record.passed);
    assert!(grading.results[0].correct);
    assert!(!grading.results[1].correct);
}

#[test]
fn matching_ignores_case_and_whitespace() {
    assert!(evaluate(
        QuestionType::Matching,
        r#"[{"left":"cat","right":"kedi"}]"#,
        Some(r#"[{"left":"cat","right":"KEDI "}]"#),
        &[],
    ));
}

#[test]
fn tied_exam_follows_its_lesson() {
    let content = snapshot(
        r#"{"levels": [{"id": "a1", "units": [{
            "id": "u1",
            "lessons": [
                {"id": "l1", "order": 1},
                {"id": "l2", "order": 2},
                {"id": "l3", "order": 3}
            ],
            "exams": [
                {"id": "final", "order": 1},
                {"id": "quiz", "order": 1, "lesson_id": "l2"}
            ]
        }]}]}"#,
    );

    let items = engine().layout(&content, &HashMap::<String, bool>::new());

    assert_eq!(step_ids(&items), vec!["l1", "l2", "quiz", "l3", "final"]);
    assert_eq!(find(&items, "quiz").kind, ItemKind::Trophy);
}

#[test]
fn graded_attempts_drive_the_path() {
    let content = snapshot(
        r#"{"levels": [{"id": "a1", "units": [{
            "id": "u1",
            "lessons": [{"id": "l1", "order": 1, "exercises": [
                {"id": "e1", "order": 1, "type": "fill_blank", "correct_answer": "[\"merhaba\", \"selam\"]"}
            ]}],
            "exams": [{"id": "x1", "order": 1, "lesson_id": "l1", "questions": [
                {"id": "x1-q1", "order": 1, "type": "matching",
                 "correct_answer": "[{\"left\":\"cat\",\"right\":\"kedi\"}]"}
            ]}]
        }]}]}"#,
    );
    let engine = engine();
    let mut ledger = CompletionLedger::new();

    let answers: Submissions = [("e1".to_string(), "Selam".to_string())].into();
    ledger.push(engine.grade(&content, "l1", &answers, None).unwrap().record);

    let items = engine.layout(&content, &ledger);
    assert_eq!(find(&items, "l1").step_class, StepClass::Pass);
    assert_eq!(find(&items, "e1").step_class, StepClass::Pass);
    assert!(find(&items, "x1").is_active);

    let wrong: Submissions = [(
        "x1-q1".to_string(),
        r#"[{"left":"cat","right":"köpek"}]"#.to_string(),
    )]
    .into();
    ledger.push(engine.grade(&content, "x1", &wrong, None).unwrap().record);
    let items = engine.layout(&content, &ledger);
    assert!(find(&items, "x1").is_active);

    let right: Submissions = [(
        "x1-q1".to_string(),
        r#"[{"left":"Cat","right":"kedi"}]"#.to_string(),
    )]
    .into();
    ledger.push(engine.grade(&content, "x1", &right, None).unwrap().record);
    let items = engine.layout(&content, &ledger);
    assert!(items.iter().all(|i| !i.is_active));
    assert!(items
        .iter()
        .filter(|i| i.kind.is_step())
        .all(|i| i.step_class == StepClass::Pass));
    assert_eq!(ledger.best("x1").unwrap().score, 100.0);
}

#[test]
fn later_completion_is_relocked_behind_gap() {
    let content = snapshot(
        r#"{"levels": [{"id": "a1", "units": [{"id": "u1", "lessons": [
            {"id": "l1", "order": 1},
            {"id": "l2", "order": 2}
        ]}]}]}"#,
    );
    let mut done = HashMap::new();
    done.insert("l2".to_string(), true);

    let items = engine().layout(&content, &done);

    assert!(find(&items, "l1").is_active);
    assert!(find(&items, "l2").is_completed);
    assert_eq!(find(&items, "l2").step_class, StepClass::Lock);
}
