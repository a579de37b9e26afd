//! Engine façade.
//!
//! Ties the builder, the gating fold and the grading entry points to one
//! [`StepwiseConfig`]. Every call is a pure function of its inputs.

use crate::config::StepwiseConfig;
use crate::error::EngineError;
use crate::gating::apply_gating;
use crate::grading::{grade_subject, pending_for, Submissions};
use crate::layout::{build, PathItem};
use crate::model::ContentSnapshot;
use crate::results::Grading;
use crate::traits::CompletionLookup;

/// Layout and grading over content snapshots.
#[derive(Debug, Clone, Default)]
pub struct PathEngine {
    config: StepwiseConfig,
}

impl PathEngine {
    pub fn new(config: StepwiseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StepwiseConfig {
        &self.config
    }

    /// Build the gated learning path for `snapshot`.
    pub fn layout(
        &self,
        snapshot: &ContentSnapshot,
        completions: &impl CompletionLookup,
    ) -> Vec<PathItem> {
        apply_gating(build(&snapshot.levels, completions, &self.config.layout))
    }

    /// Question ids of `subject_id` that still lack a usable answer.
    pub fn pending(
        &self,
        snapshot: &ContentSnapshot,
        subject_id: &str,
        submissions: &Submissions,
    ) -> Result<Vec<String>, EngineError> {
        let subject = snapshot
            .find_subject(subject_id)
            .ok_or_else(|| EngineError::UnknownSubject(subject_id.to_string()))?;
        Ok(pending_for(subject, submissions))
    }

    /// Grade one lesson or exam attempt.
    ///
    /// `passing_score` overrides both the subject's own threshold and the
    /// configured default.
    pub fn grade(
        &self,
        snapshot: &ContentSnapshot,
        subject_id: &str,
        submissions: &Submissions,
        passing_score: Option<f64>,
    ) -> Result<Grading, EngineError> {
        if let Some(score) = passing_score {
            if !(0.0..=100.0).contains(&score) {
                return Err(EngineError::InvalidPassingScore(score));
            }
        }

        let subject = snapshot
            .find_subject(subject_id)
            .ok_or_else(|| EngineError::UnknownSubject(subject_id.to_string()))?;

        let grading = grade_subject(
            subject,
            submissions,
            passing_score,
            self.config.grading.default_passing_score,
        );

        Ok(grading)
    }
}
