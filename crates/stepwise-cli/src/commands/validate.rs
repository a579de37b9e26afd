//! The `stepwise validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(content_path: PathBuf) -> Result<()> {
    let snapshot = stepwise_core::parser::load_content(&content_path)?;

    let units: usize = snapshot.levels.iter().map(|l| l.units.len()).sum();
    println!(
        "Content: {} ({} level(s), {} unit(s))",
        content_path.display(),
        snapshot.levels.len(),
        units
    );

    let warnings = stepwise_core::parser::validate_snapshot(&snapshot);
    for w in &warnings {
        let prefix = w
            .subject_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All content valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
