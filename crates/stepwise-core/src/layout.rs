//! Path item builder.
//!
//! Flattens a content snapshot into the ordered list of [`PathItem`]s the
//! learning path renders, assigning zig-zag screen positions and raw
//! completion flags. Unlock state is left for [`crate::gating`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grading::sorted_by_order;
use crate::model::{localized, Exam, Lesson, Level, Translation, Unit};
use crate::traits::CompletionLookup;

/// Sort-key spacing between consecutive lesson orders.
const LESSON_SPACING: i64 = 10_000;
/// Offset placing a tied exam right after its lesson.
const TIED_EXAM_OFFSET: i64 = 5_000;
/// Offset placing an untied exam after every lesson of the unit.
const TRAILING_EXAM_OFFSET: i64 = 100_000;

/// What a path item represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    UnitCard,
    LessonStep,
    ExerciseStep,
    /// An exam.
    Trophy,
    Mascot,
}

impl ItemKind {
    /// Steps take part in gating and can become the active item.
    /// Unit cards and mascots are markers.
    pub fn is_step(self) -> bool {
        matches!(
            self,
            ItemKind::LessonStep | ItemKind::ExerciseStep | ItemKind::Trophy
        )
    }

    /// Rendered node size.
    pub fn size(self) -> f64 {
        match self {
            ItemKind::UnitCard => 96.0,
            ItemKind::LessonStep => 72.0,
            ItemKind::ExerciseStep => 52.0,
            ItemKind::Trophy => 80.0,
            ItemKind::Mascot => 64.0,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::UnitCard => write!(f, "unit_card"),
            ItemKind::LessonStep => write!(f, "lesson_step"),
            ItemKind::ExerciseStep => write!(f, "exercise_step"),
            ItemKind::Trophy => write!(f, "trophy"),
            ItemKind::Mascot => write!(f, "mascot"),
        }
    }
}

/// Visual state of an item after gating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepClass {
    Pass,
    Lock,
    #[default]
    Default,
}

impl fmt::Display for StepClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepClass::Pass => write!(f, "pass"),
            StepClass::Lock => write!(f, "lock"),
            StepClass::Default => write!(f, "default"),
        }
    }
}

/// Screen placement of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub size: f64,
}

/// One node of the rendered learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// Source id (unit, lesson, exercise or exam id; synthetic for mascots).
    pub id: String,
    pub kind: ItemKind,
    /// Position in the flattened sequence, starting at 0.
    pub order: usize,
    pub unit_id: String,
    /// Owning lesson of an exercise step.
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub position: Position,
    pub is_completed: bool,
    pub is_unlocked: bool,
    pub is_active: bool,
    pub step_class: StepClass,
}

/// Geometry and presentation knobs for the builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Vertical distance between consecutive items.
    #[serde(default = "default_step")]
    pub step: f64,
    /// Extra vertical distance before each unit after the first.
    #[serde(default = "default_unit_gap")]
    pub unit_gap: f64,
    /// The two horizontal lanes items alternate between.
    #[serde(default = "default_lanes")]
    pub lanes: [f64; 2],
    /// Insert a mascot after every N lessons/exams of a unit (0 disables).
    #[serde(default = "default_mascot_every")]
    pub mascot_every: usize,
    /// Preferred translation language for titles.
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_step() -> f64 {
    110.0
}
fn default_unit_gap() -> f64 {
    80.0
}
fn default_lanes() -> [f64; 2] {
    [25.0, 65.0]
}
fn default_mascot_every() -> usize {
    4
}
fn default_language() -> String {
    "en".to_string()
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            unit_gap: default_unit_gap(),
            lanes: default_lanes(),
            mascot_every: default_mascot_every(),
            language: default_language(),
        }
    }
}

/// A lesson or exam placed in a unit's merged sequence.
#[derive(Debug, Clone, Copy)]
pub enum UnitEntry<'a> {
    Lesson(&'a Lesson),
    Exam(&'a Exam),
}

impl<'a> UnitEntry<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            UnitEntry::Lesson(lesson) => &lesson.id,
            UnitEntry::Exam(exam) => &exam.id,
        }
    }
}

/// Merge a unit's lessons and exams into path order.
///
/// Lessons sort by `order * 10000`. An exam tied to a lesson of this unit
/// sorts right after it (`lesson_order * 10000 + 5000 + exam_order`); any
/// other exam sorts after every lesson
/// (`max_lesson_order * 10000 + 100000 + exam_order`). Equal keys keep
/// insertion order.
pub fn unit_sequence(unit: &Unit) -> Vec<UnitEntry<'_>> {
    let max_lesson_order = unit.lessons.iter().map(|l| l.order).max().unwrap_or(0);

    let mut keyed: Vec<(i64, UnitEntry<'_>)> = unit
        .lessons
        .iter()
        .map(|lesson| (i64::from(lesson.order) * LESSON_SPACING, UnitEntry::Lesson(lesson)))
        .collect();

    for exam in &unit.exams {
        let tied_lesson = exam
            .lesson_id
            .as_deref()
            .and_then(|id| unit.lessons.iter().find(|l| l.id == id));
        let key = match tied_lesson {
            Some(lesson) => {
                i64::from(lesson.order) * LESSON_SPACING + TIED_EXAM_OFFSET + i64::from(exam.order)
            }
            None => {
                if let Some(id) = &exam.lesson_id {
                    tracing::debug!(
                        "exam {} references lesson {id} outside unit {}, placing it last",
                        exam.id,
                        unit.id
                    );
                }
                i64::from(max_lesson_order) * LESSON_SPACING
                    + TRAILING_EXAM_OFFSET
                    + i64::from(exam.order)
            }
        };
        keyed.push((key, UnitEntry::Exam(exam)));
    }

    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, entry)| entry).collect()
}

/// Flatten `levels` into positioned path items.
///
/// Raw completion comes from `completions`: a lesson step and its exercise
/// steps are completed when the lesson passed, a trophy when its exam passed.
/// Unit cards and mascots carry no work and are always reported completed.
/// Gating fields are left at their defaults.
pub fn build(
    levels: &[Level],
    completions: &impl CompletionLookup,
    config: &LayoutConfig,
) -> Vec<PathItem> {
    let mut builder = PathBuilder::new(config);

    for level in sorted_by_order(levels, |l| l.order) {
        for unit in sorted_by_order(&level.units, |u| u.order) {
            builder.push_unit(unit, completions);
        }
    }

    builder.finish()
}

struct PathBuilder<'c> {
    config: &'c LayoutConfig,
    items: Vec<PathItem>,
    cursor: f64,
    units: usize,
}

impl<'c> PathBuilder<'c> {
    fn new(config: &'c LayoutConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            cursor: 0.0,
            units: 0,
        }
    }

    fn push_unit(&mut self, unit: &Unit, completions: &impl CompletionLookup) {
        if self.units > 0 {
            self.cursor += self.config.unit_gap;
        }
        self.units += 1;

        self.push(ItemKind::UnitCard, &unit.id, unit, None, &unit.translations, true);

        for (index, entry) in unit_sequence(unit).into_iter().enumerate() {
            match entry {
                UnitEntry::Lesson(lesson) => {
                    let completed = completions.is_passed(&lesson.id);
                    self.push(
                        ItemKind::LessonStep,
                        &lesson.id,
                        unit,
                        None,
                        &lesson.translations,
                        completed,
                    );
                    for exercise in sorted_by_order(&lesson.exercises, |e| e.order) {
                        self.push(
                            ItemKind::ExerciseStep,
                            &exercise.id,
                            unit,
                            Some(&lesson.id),
                            &exercise.translations,
                            completed,
                        );
                    }
                }
                UnitEntry::Exam(exam) => {
                    let completed = completions.is_passed(&exam.id);
                    self.push(ItemKind::Trophy, &exam.id, unit, None, &exam.translations, completed);
                }
            }

            let every = self.config.mascot_every;
            if every > 0 && (index + 1) % every == 0 {
                let id = format!("{}:mascot:{}", unit.id, (index + 1) / every);
                self.push(ItemKind::Mascot, &id, unit, None, &[], true);
            }
        }
    }

    fn push(
        &mut self,
        kind: ItemKind,
        id: &str,
        unit: &Unit,
        parent_id: Option<&str>,
        translations: &[Translation],
        is_completed: bool,
    ) {
        let order = self.items.len();
        self.items.push(PathItem {
            id: id.to_string(),
            kind,
            order,
            unit_id: unit.id.clone(),
            parent_id: parent_id.map(str::to_string),
            title: localized(translations, &self.config.language).map(str::to_string),
            position: Position {
                top: self.cursor,
                left: self.config.lanes[order % 2],
                size: kind.size(),
            },
            is_completed,
            is_unlocked: false,
            is_active: false,
            step_class: StepClass::Default,
        });
        self.cursor += self.config.step;
    }

    /// Flip the column so the first item sits at the bottom.
    fn finish(mut self) -> Vec<PathItem> {
        let max_top = self
            .items
            .iter()
            .map(|item| item.position.top)
            .fold(0.0, f64::max);
        for item in &mut self.items {
            item.position.top = max_top - item.position.top;
        }

        tracing::debug!(
            "built {} path items across {} units",
            self.items.len(),
            self.units
        );
        self.items
    }
}
