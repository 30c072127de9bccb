//! Form state and its invariants

use super::field::{Field, FieldRef};
use super::step::Step;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a form
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form must have at least one step")]
    NoSteps,
    #[error("step ids must be contiguous: expected {expected}, found {found}")]
    NonContiguousStepIds { expected: u32, found: u32 },
    #[error("{count} steps starting at id {first} run past the largest step id")]
    StepIdOverflow { first: u32, count: usize },
    #[error("failed to read form definition {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid form definition: {0}")]
    Parse(#[from] serde_json::Error),
}

/// State of one mounted form
///
/// Exactly one step is active while editing; after a successful submission
/// every step is inactive and `submitted` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub steps: Vec<Step>,
    pub submitting: bool,
    pub submitted: bool,
    pub error_message: String,
    /// Bumped once per committed mutation, never by a no-op
    pub revision: u64,
}

impl FormState {
    /// Build a form from steps with contiguous, increasing ids.
    /// The first step becomes the active one.
    pub fn from_steps(mut steps: Vec<Step>) -> Result<Self, FormError> {
        let first_id = steps.first().ok_or(FormError::NoSteps)?.id;

        for (offset, step) in steps.iter().enumerate() {
            let expected = u32::try_from(offset)
                .ok()
                .and_then(|offset| first_id.checked_add(offset))
                .ok_or(FormError::StepIdOverflow {
                    first: first_id,
                    count: steps.len(),
                })?;
            if step.id != expected {
                return Err(FormError::NonContiguousStepIds {
                    expected,
                    found: step.id,
                });
            }
        }

        for (index, step) in steps.iter_mut().enumerate() {
            step.is_active = index == 0;
        }

        Ok(Self {
            steps,
            submitting: false,
            submitted: false,
            error_message: String::new(),
            revision: 0,
        })
    }

    pub fn active_step(&self) -> Option<&Step> {
        self.steps.iter().find(|s| s.is_active)
    }

    pub fn active_step_id(&self) -> Option<u32> {
        self.active_step().map(|s| s.id)
    }

    /// Zero-based position of the active step
    pub fn active_index(&self) -> Option<usize> {
        self.steps.iter().position(|s| s.is_active)
    }

    pub fn step(&self, id: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    pub fn field(&self, field: &FieldRef) -> Option<&Field> {
        self.step(field.step_id)?.field(&field.field_id)
    }

    pub(crate) fn field_mut(&mut self, field: &FieldRef) -> Option<&mut Field> {
        self.steps
            .iter_mut()
            .find(|s| s.id == field.step_id)?
            .field_mut(&field.field_id)
    }

    pub fn active_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_active).count()
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }

    pub fn total_field_count(&self) -> usize {
        self.steps.iter().map(Step::field_count).sum()
    }

    /// Check the activation invariant: one active step while editing,
    /// none once submitted.
    pub fn is_consistent(&self) -> bool {
        let expected = if self.submitted { 0 } else { 1 };
        self.active_count() == expected && !(self.submitting && self.submitted)
    }
}
