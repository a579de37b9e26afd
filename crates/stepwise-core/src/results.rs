//! Grading results, completion records and the completion ledger.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::traits::CompletionLookup;

/// Outcome of grading a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResult {
    pub question_id: String,
    pub correct: bool,
}

/// Pass/fail summary of one graded lesson or exam attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Lesson or exam id.
    pub subject_id: String,
    pub correct_count: u32,
    pub total_count: u32,
    /// Percentage in `0..=100`.
    pub score: f64,
    pub passed: bool,
}

impl CompletionRecord {
    /// Build a record, deriving `score` and `passed` from the counts.
    pub fn new(
        subject_id: impl Into<String>,
        correct_count: u32,
        total_count: u32,
        passing_score: f64,
    ) -> Self {
        let score = percentage(correct_count, total_count);
        Self {
            subject_id: subject_id.into(),
            correct_count,
            total_count,
            score,
            passed: score >= passing_score,
        }
    }
}

/// `100 * correct / total`, or 0 when there is nothing to grade.
pub fn percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * f64::from(correct) / f64::from(total)
    }
}

/// A completion record together with the per-question breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grading {
    pub record: CompletionRecord,
    pub results: Vec<QuestionResult>,
}

/// All completion records known for a learner.
///
/// A subject may have several attempts; it counts as passed once any
/// attempt passed. Serialized as a plain JSON array of records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CompletionRecord>", into = "Vec<CompletionRecord>")]
pub struct CompletionLedger {
    records: Vec<CompletionRecord>,
    passed: HashSet<String>,
}

impl From<Vec<CompletionRecord>> for CompletionLedger {
    fn from(records: Vec<CompletionRecord>) -> Self {
        let passed = records
            .iter()
            .filter(|r| r.passed)
            .map(|r| r.subject_id.clone())
            .collect();
        Self { records, passed }
    }
}

impl From<CompletionLedger> for Vec<CompletionRecord> {
    fn from(ledger: CompletionLedger) -> Self {
        ledger.records
    }
}

impl FromIterator<CompletionRecord> for CompletionLedger {
    fn from_iter<I: IntoIterator<Item = CompletionRecord>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new attempt.
    pub fn push(&mut self, record: CompletionRecord) {
        if record.passed {
            self.passed.insert(record.subject_id.clone());
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[CompletionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Highest-scoring attempt for a subject; the latest wins on ties.
    pub fn best(&self, subject_id: &str) -> Option<&CompletionRecord> {
        self.records
            .iter()
            .filter(|r| r.subject_id == subject_id)
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }

    /// Save the ledger as a JSON array.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(&self.records).context("failed to serialize records")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write records to {}", path.display()))?;
        Ok(())
    }

    /// Load a ledger from a JSON array of records.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read records from {}", path.display()))?;
        let ledger: CompletionLedger = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse records JSON: {}", path.display()))?;
        Ok(ledger)
    }
}

impl CompletionLookup for CompletionLedger {
    fn is_passed(&self, subject_id: &str) -> bool {
        self.passed.contains(subject_id)
    }
}
