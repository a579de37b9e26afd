//! The `stepwise path` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use stepwise_core::engine::PathEngine;
use stepwise_core::layout::PathItem;
use stepwise_core::progress::{summarize, PathSummary};
use stepwise_core::results::CompletionLedger;

pub fn execute(
    content_path: PathBuf,
    progress_path: Option<PathBuf>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = stepwise_core::config::load_config_from(config_path.as_deref())?;
    let snapshot = stepwise_core::parser::load_content(&content_path)?;

    let ledger = match &progress_path {
        Some(path) => CompletionLedger::load_json(path)?,
        None => CompletionLedger::new(),
    };
    tracing::info!(records = ledger.len(), "loaded completion records");

    let engine = PathEngine::new(config);
    let items = engine.layout(&snapshot, &ledger);
    let summary = summarize(&items);

    match format.as_str() {
        "json" => {
            let output = serde_json::json!({
                "items": items,
                "summary": summary,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("failed to serialize path")?
            );
        }
        _ => {
            print_path_table(&items);
            print_summary(&summary);
        }
    }

    Ok(())
}

fn print_path_table(items: &[PathItem]) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec![
        "#", "Id", "Kind", "Title", "Top", "Left", "State",
    ]);

    for item in items {
        let state = if item.is_active {
            format!("{} (active)", item.step_class)
        } else {
            item.step_class.to_string()
        };
        table.add_row(vec![
            Cell::new(item.order),
            Cell::new(&item.id),
            Cell::new(item.kind),
            Cell::new(item.title.as_deref().unwrap_or("-")),
            Cell::new(format!("{:.0}", item.position.top)),
            Cell::new(format!("{:.0}%", item.position.left)),
            Cell::new(state),
        ]);
    }

    println!("{table}");
}

fn print_summary(summary: &PathSummary) {
    println!(
        "\nProgress: {}/{} steps ({:.1}%), {} locked",
        summary.completed_steps, summary.total_steps, summary.percent, summary.locked_steps
    );
    match &summary.active_item {
        Some(id) => println!("Next: {id}"),
        None if summary.total_steps > 0 && summary.completed_steps == summary.total_steps => {
            println!("Path complete.")
        }
        None => {}
    }
    for unit in &summary.units {
        println!(
            "  {} {}: {}/{} ({:.1}%)",
            unit.unit_id,
            unit.title.as_deref().unwrap_or(""),
            unit.completed,
            unit.total,
            unit.percent
        );
    }
}
