//! Progress summaries over a gated learning path.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::layout::{PathItem, StepClass};
use crate::results::percentage;

/// Overall progress of a learner along the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    /// Lesson, exercise and exam steps on the path.
    pub total_steps: u32,
    /// Steps whose subject has a passing record.
    pub completed_steps: u32,
    /// Steps currently rendered as locked.
    pub locked_steps: u32,
    /// `completed_steps` as a percentage of `total_steps`.
    pub percent: f64,
    /// Id of the next step to do, if any.
    pub active_item: Option<String>,
    /// Per-unit breakdown, in path order.
    pub units: Vec<UnitProgress>,
}

/// Progress within a single unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProgress {
    pub unit_id: String,
    pub title: Option<String>,
    pub completed: u32,
    pub total: u32,
    pub percent: f64,
}

/// Summarize a gated path. Unit cards and mascots are not counted as steps.
pub fn summarize(items: &[PathItem]) -> PathSummary {
    let mut units: Vec<UnitProgress> = Vec::new();
    let mut unit_index: HashMap<&str, usize> = HashMap::new();

    let mut total_steps = 0u32;
    let mut completed_steps = 0u32;
    let mut locked_steps = 0u32;

    for item in items {
        let index = *unit_index.entry(item.unit_id.as_str()).or_insert_with(|| {
            units.push(UnitProgress {
                unit_id: item.unit_id.clone(),
                title: None,
                completed: 0,
                total: 0,
                percent: 0.0,
            });
            units.len() - 1
        });
        let unit = &mut units[index];

        if !item.kind.is_step() {
            if unit.title.is_none() && item.id == item.unit_id {
                unit.title = item.title.clone();
            }
            continue;
        }

        total_steps += 1;
        unit.total += 1;
        if item.is_completed {
            completed_steps += 1;
            unit.completed += 1;
        }
        if item.step_class == StepClass::Lock {
            locked_steps += 1;
        }
    }

    for unit in &mut units {
        unit.percent = percentage(unit.completed, unit.total);
    }

    PathSummary {
        total_steps,
        completed_steps,
        locked_steps,
        percent: percentage(completed_steps, total_steps),
        active_item: items.iter().find(|i| i.is_active).map(|i| i.id.clone()),
        units,
    }
}
