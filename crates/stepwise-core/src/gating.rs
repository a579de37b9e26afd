//! Sequential unlock state machine.
//!
//! A single forward fold over the builder's output. An item is unlocked
//! only while every earlier item is completed; the first unlocked,
//! incomplete step becomes the active one.
//!
//! A completed item that follows an incomplete one is reported locked.
//! Progression is strictly linear, so historical completions behind a gap
//! render as `lock` until the gap is closed.

use crate::layout::{ItemKind, PathItem, StepClass};

/// Derive `is_unlocked`, `step_class` and `is_active` for every item.
pub fn apply_gating(mut items: Vec<PathItem>) -> Vec<PathItem> {
    items.sort_by_key(|item| item.order);

    let mut previous_steps_completed = true;
    let mut first_active_found = false;

    for item in &mut items {
        item.is_unlocked = previous_steps_completed;
        if !item.is_completed {
            previous_steps_completed = false;
        }

        item.step_class = classify(item.kind, item.is_completed, item.is_unlocked);

        item.is_active = item.kind.is_step()
            && item.is_unlocked
            && !item.is_completed
            && !first_active_found;
        if item.is_active {
            first_active_found = true;
        }
    }

    items
}

/// Visual class of one item. Markers have no `pass` state.
pub fn classify(kind: ItemKind, is_completed: bool, is_unlocked: bool) -> StepClass {
    match (kind.is_step(), is_completed, is_unlocked) {
        (_, _, false) => StepClass::Lock,
        (true, true, true) => StepClass::Pass,
        _ => StepClass::Default,
    }
}
