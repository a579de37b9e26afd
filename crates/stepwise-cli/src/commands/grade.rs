//! The `stepwise grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use stepwise_core::engine::PathEngine;
use stepwise_core::results::{CompletionLedger, Grading};

pub struct GradeArgs {
    pub content: PathBuf,
    pub subject: String,
    pub answers: PathBuf,
    pub passing_score: Option<f64>,
    pub allow_incomplete: bool,
    pub save: Option<PathBuf>,
    pub format: String,
    pub config: Option<PathBuf>,
}

pub fn execute(args: GradeArgs) -> Result<()> {
    let config = stepwise_core::config::load_config_from(args.config.as_deref())?;
    let snapshot = stepwise_core::parser::load_content(&args.content)?;
    let submissions = stepwise_core::parser::load_submissions(&args.answers)?;

    let engine = PathEngine::new(config);

    let pending = engine.pending(&snapshot, &args.subject, &submissions)?;
    if !pending.is_empty() {
        if args.allow_incomplete {
            tracing::warn!(count = pending.len(), "grading with unanswered questions");
        } else {
            anyhow::bail!(
                "{} question(s) unanswered: {} (use --allow-incomplete to grade anyway)",
                pending.len(),
                pending.join(", ")
            );
        }
    }

    let grading = engine.grade(&snapshot, &args.subject, &submissions, args.passing_score)?;

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&grading)?);
        }
        _ => print_grading(&grading),
    }

    if let Some(path) = &args.save {
        let mut ledger = if path.exists() {
            CompletionLedger::load_json(path)?
        } else {
            CompletionLedger::new()
        };
        ledger.push(grading.record.clone());
        ledger
            .save_json(path)
            .with_context(|| format!("failed to save records: {}", path.display()))?;
        tracing::info!(path = %path.display(), records = ledger.len(), "saved completion record");
    }

    Ok(())
}

fn print_grading(grading: &Grading) {
    let record = &grading.record;
    println!(
        "{}: {}/{} correct ({:.1}%) — {}",
        record.subject_id,
        record.correct_count,
        record.total_count,
        record.score,
        if record.passed { "PASSED" } else { "FAILED" }
    );
    for result in &grading.results {
        let mark = if result.correct { "✓" } else { "✗" };
        println!("  {mark} {}", result.question_id);
    }
}
