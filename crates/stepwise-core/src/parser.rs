//! Content snapshot loading and validation.
//!
//! Snapshots are TOML or JSON documents with a top-level `levels` array.
//! Directories are loaded recursively and their levels merged.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};

use crate::answer::{normalize, AnswerKey};
use crate::grading::Submissions;
use crate::model::{AnswerOption, ContentSnapshot, QuestionType};

/// Supported snapshot file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Toml,
    Json,
}

impl SnapshotFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "toml" => Some(SnapshotFormat::Toml),
            "json" => Some(SnapshotFormat::Json),
            _ => None,
        }
    }
}

/// Parse a single snapshot file.
pub fn parse_snapshot(path: &Path) -> Result<ContentSnapshot> {
    let format = SnapshotFormat::from_path(path)
        .with_context(|| format!("unsupported content file type: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))?;

    parse_snapshot_str(&content, format, path)
}

/// Parse a snapshot from a string (useful for testing).
pub fn parse_snapshot_str(
    content: &str,
    format: SnapshotFormat,
    source_path: &Path,
) -> Result<ContentSnapshot> {
    match format {
        SnapshotFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display())),
        SnapshotFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display())),
    }
}

/// Recursively load every `.toml` / `.json` snapshot under `dir` into one.
///
/// Files are visited in path order. Files that fail to parse are skipped
/// with a warning.
pub fn load_snapshot_directory(dir: &Path) -> Result<ContentSnapshot> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    let mut merged = ContentSnapshot::default();
    for path in entries {
        if path.is_dir() {
            merged.levels.extend(load_snapshot_directory(&path)?.levels);
        } else if SnapshotFormat::from_path(&path).is_some() {
            match parse_snapshot(&path) {
                Ok(snapshot) => merged.levels.extend(snapshot.levels),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(merged)
}

/// Load a snapshot from a file or a directory.
pub fn load_content(path: &Path) -> Result<ContentSnapshot> {
    if path.is_dir() {
        load_snapshot_directory(path)
    } else {
        parse_snapshot(path)
    }
}

/// Parse a JSON object of answers keyed by question id.
///
/// String values are taken as-is. `null` means unanswered and is dropped.
/// Any other JSON value (typically an array of `{left, right}` pairs) is
/// re-encoded as a JSON string.
pub fn parse_submissions_str(content: &str) -> Result<Submissions> {
    let raw: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(content).context("answers must be a JSON object")?;

    Ok(raw
        .into_iter()
        .filter_map(|(id, value)| {
            let answer = match value {
                serde_json::Value::Null => return None,
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            Some((id, answer))
        })
        .collect())
}

/// Load answers from a JSON file.
pub fn load_submissions(path: &Path) -> Result<Submissions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    parse_submissions_str(&content)
        .with_context(|| format!("failed to parse answers: {}", path.display()))
}

/// A warning from snapshot validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The offending node's id (if applicable).
    pub subject_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn new(subject_id: &str, message: impl Into<String>) -> Self {
        Self {
            subject_id: Some(subject_id.to_string()),
            message: message.into(),
        }
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            subject_id: None,
            message: message.into(),
        }
    }
}

/// Validate a snapshot for content that would grade or lay out badly.
pub fn validate_snapshot(snapshot: &ContentSnapshot) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if snapshot.levels.is_empty() {
        warnings.push(ValidationWarning::general("content has no levels"));
    }

    let mut seen = IdRegistry::default();

    for level in &snapshot.levels {
        seen.check("level", &level.id, &mut warnings);

        for unit in &level.units {
            seen.check("unit", &unit.id, &mut warnings);

            for lesson in &unit.lessons {
                seen.check("lesson", &lesson.id, &mut warnings);
                check_passing_score(&lesson.id, lesson.passing_score, &mut warnings);

                if lesson.exercises.is_empty() {
                    warnings.push(ValidationWarning::new(&lesson.id, "lesson has no exercises"));
                }
                for exercise in &lesson.exercises {
                    seen.check("exercise", &exercise.id, &mut warnings);
                    check_answer_key(
                        &exercise.id,
                        exercise.question_type,
                        &exercise.correct_answer,
                        &exercise.options,
                        &mut warnings,
                    );
                }
            }

            for exam in &unit.exams {
                seen.check("exam", &exam.id, &mut warnings);
                check_passing_score(&exam.id, exam.passing_score, &mut warnings);

                if let Some(lesson_id) = &exam.lesson_id {
                    if !unit.lessons.iter().any(|l| &l.id == lesson_id) {
                        warnings.push(ValidationWarning::new(
                            &exam.id,
                            format!(
                                "exam is tied to lesson '{lesson_id}' which is not in unit '{}'; it will be placed at the end of the unit",
                                unit.id
                            ),
                        ));
                    }
                }
                if exam.questions.is_empty() {
                    warnings.push(ValidationWarning::new(&exam.id, "exam has no questions"));
                }
                for question in &exam.questions {
                    seen.check("question", &question.id, &mut warnings);
                    check_answer_key(
                        &question.id,
                        question.question_type,
                        &question.correct_answer,
                        &question.options,
                        &mut warnings,
                    );
                }
            }
        }
    }

    warnings
}

#[derive(Default)]
struct IdRegistry {
    seen: HashSet<(&'static str, String)>,
}

impl IdRegistry {
    fn check(&mut self, kind: &'static str, id: &str, warnings: &mut Vec<ValidationWarning>) {
        if !self.seen.insert((kind, id.to_string())) {
            warnings.push(ValidationWarning::new(id, format!("duplicate {kind} id: {id}")));
        }
    }
}

fn check_passing_score(id: &str, score: Option<f64>, warnings: &mut Vec<ValidationWarning>) {
    if let Some(score) = score {
        if !(0.0..=100.0).contains(&score) {
            warnings.push(ValidationWarning::new(
                id,
                format!("passing_score {score} is outside 0..=100"),
            ));
        }
    }
}

fn check_answer_key(
    id: &str,
    question_type: QuestionType,
    correct_answer: &str,
    options: &[AnswerOption],
    warnings: &mut Vec<ValidationWarning>,
) {
    if correct_answer.trim().is_empty() {
        warnings.push(ValidationWarning::new(id, "correct_answer is empty"));
        return;
    }

    match question_type {
        QuestionType::MultipleChoice | QuestionType::Unknown => {
            if question_type == QuestionType::Unknown {
                warnings.push(ValidationWarning::new(
                    id,
                    "unknown question type, grading as multiple-choice",
                ));
            }
            if options.is_empty() {
                warnings.push(ValidationWarning::new(id, "multiple-choice question has no options"));
                return;
            }
            let expected = normalize(correct_answer);
            let known = options.iter().any(|o| {
                o.id == correct_answer
                    || o.translations.iter().any(|t| normalize(&t.text) == expected)
            });
            if !known {
                warnings.push(ValidationWarning::new(
                    id,
                    "correct_answer matches neither an option id nor an option text",
                ));
            }
        }
        QuestionType::FillBlank => {
            if correct_answer.trim_start().starts_with('[') {
                if let Err(e) = AnswerKey::try_decode(question_type, correct_answer) {
                    warnings.push(ValidationWarning::new(
                        id,
                        format!("{e}; the raw string will be the only accepted answer"),
                    ));
                }
            }
        }
        QuestionType::Matching => match AnswerKey::try_decode(question_type, correct_answer) {
            Ok(AnswerKey::Pairs(pairs)) if pairs.is_empty() => {
                warnings.push(ValidationWarning::new(id, "matching question has no pairs"));
            }
            Ok(_) => {}
            Err(e) => {
                warnings.push(ValidationWarning::new(
                    id,
                    format!("{e}; the question can never be answered correctly"),
                ));
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[[levels]]
id = "a1"
order = 1
translations = [{ language = "en", text = "Beginner" }]

[[levels.units]]
id = "greetings"
order = 1
translations = [{ language = "en", text = "Greetings" }]

[[levels.units.lessons]]
id = "hello"
order = 1
passing_score = 60

[[levels.units.lessons.exercises]]
id = "hello-1"
order = 1
type = "multiple_choice"
correct_answer = "opt-merhaba"
options = [
    { id = "opt-merhaba", translations = [{ language = "tr", text = "Merhaba" }] },
    { id = "opt-hosca", translations = [{ language = "tr", text = "Hoşça kal" }] },
]

[[levels.units.lessons.exercises]]
id = "hello-2"
order = 2
type = "fill_blank"
correct_answer = '["Merhaba", "Selam"]'

[[levels.units.exams]]
id = "greetings-exam"
order = 1
lesson_id = "hello"

[[levels.units.exams.questions]]
id = "greetings-exam-1"
type = "matching"
correct_answer = '[{"left": "cat", "right": "kedi"}]'
"#;

    #[test]
    fn parse_valid_toml() {
        let snapshot =
            parse_snapshot_str(VALID_TOML, SnapshotFormat::Toml, &PathBuf::from("a1.toml"))
                .unwrap();
        assert_eq!(snapshot.levels.len(), 1);
        let unit = &snapshot.levels[0].units[0];
        assert_eq!(unit.id, "greetings");
        assert_eq!(unit.lessons[0].passing_score, Some(60.0));
        assert_eq!(unit.lessons[0].exercises[1].question_type, QuestionType::FillBlank);
        assert_eq!(unit.exams[0].lesson_id.as_deref(), Some("hello"));
        assert_eq!(unit.exams[0].questions[0].question_type, QuestionType::Matching);
        assert!(validate_snapshot(&snapshot).is_empty());
    }

    #[test]
    fn parse_json_snapshot() {
        let json = r#"{"levels": [{"id": "a1", "units": [{"id": "u1", "lessons": [
            {"id": "l1", "exercises": [{"id": "e1", "type": "fill_blank", "correct_answer": "su"}]}
        ]}]}]}"#;
        let snapshot =
            parse_snapshot_str(json, SnapshotFormat::Json, &PathBuf::from("a1.json")).unwrap();
        assert_eq!(snapshot.levels[0].units[0].lessons[0].exercises[0].id, "e1");
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_snapshot_str(bad, SnapshotFormat::Toml, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.TOML")),
            Some(SnapshotFormat::Toml)
        );
        assert_eq!(
            SnapshotFormat::from_path(Path::new("a.json")),
            Some(SnapshotFormat::Json)
        );
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yaml")), None);
        assert!(parse_snapshot(Path::new("content.yaml")).is_err());
    }

    #[test]
    fn load_directory_merges_and_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a1.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("more")).unwrap();
        std::fs::write(
            dir.path().join("more").join("a2.json"),
            r#"{"levels": [{"id": "a2", "order": 2}]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[[levels]\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let snapshot = load_content(dir.path()).unwrap();
        let ids: Vec<&str> = snapshot.levels.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn submissions_accept_strings_and_pairs() {
        let answers = parse_submissions_str(
            r#"{"q1": "opt-a", "q2": [{"left": "cat", "right": "kedi"}]}"#,
        )
        .unwrap();
        assert_eq!(answers["q1"], "opt-a");
        assert_eq!(answers["q2"], r#"[{"left":"cat","right":"kedi"}]"#);
        assert!(parse_submissions_str("[1, 2]").is_err());
    }

    #[test]
    fn submissions_null_answer_stays_pending() {
        use crate::grading::pending_questions;
        use crate::model::{Exercise, QuestionType};

        let answers = parse_submissions_str(r#"{"q1": null, "q2": "su"}"#).unwrap();
        assert!(!answers.contains_key("q1"));

        let exercises: Vec<Exercise> = ["q1", "q2"]
            .into_iter()
            .map(|id| Exercise {
                id: id.into(),
                order: 0,
                question_type: QuestionType::FillBlank,
                correct_answer: r#"["su"]"#.into(),
                options: vec![],
                translations: vec![],
            })
            .collect();
        assert_eq!(pending_questions(&exercises, &answers), vec!["q1"]);
    }

    #[test]
    fn validate_empty_snapshot() {
        let warnings = validate_snapshot(&ContentSnapshot::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].subject_id.is_none());
        assert_eq!(warnings[0].message, "content has no levels");
    }

    fn warnings_for(toml: &str) -> Vec<String> {
        let snapshot =
            parse_snapshot_str(toml, SnapshotFormat::Toml, &PathBuf::from("test.toml")).unwrap();
        validate_snapshot(&snapshot)
            .into_iter()
            .map(|w| w.message)
            .collect()
    }

    #[test]
    fn validate_duplicate_ids() {
        let warnings = warnings_for(
            r#"
[[levels]]
id = "a1"
[[levels.units]]
id = "u1"
[[levels.units.lessons]]
id = "same"
[[levels.units.lessons.exercises]]
id = "e1"
type = "fill_blank"
correct_answer = "x"
[[levels.units.lessons]]
id = "same"
[[levels.units.lessons.exercises]]
id = "e2"
type = "fill_blank"
correct_answer = "y"
"#,
        );
        assert!(warnings.iter().any(|w| w.contains("duplicate lesson id")));
    }

    #[test]
    fn validate_answer_keys() {
        let warnings = warnings_for(
            r#"
[[levels]]
id = "a1"
[[levels.units]]
id = "u1"
[[levels.units.lessons]]
id = "l1"
[[levels.units.lessons.exercises]]
id = "mc"
correct_answer = "opt-z"
options = [{ id = "opt-a", translations = [{ language = "en", text = "A" }] }]
[[levels.units.lessons.exercises]]
id = "fill"
type = "fill_blank"
correct_answer = '["unterminated"'
[[levels.units.lessons.exercises]]
id = "pairs"
type = "matching"
correct_answer = "cat=kedi"
[[levels.units.exams]]
id = "x1"
lesson_id = "missing"
"#,
        );
        assert!(warnings.iter().any(|w| w.contains("neither an option id")));
        assert!(warnings.iter().any(|w| w.contains("only accepted answer")));
        assert!(warnings.iter().any(|w| w.contains("never be answered")));
        assert!(warnings.iter().any(|w| w.contains("not in unit")));
        assert!(warnings.iter().any(|w| w.contains("exam has no questions")));
    }
}
