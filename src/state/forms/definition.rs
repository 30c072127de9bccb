//! Form definitions loaded from JSON

use super::field::Field;
use super::form_state::{FormError, FormState};
use super::step::Step;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declarative description of a multi-step form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StepDefinition {
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    /// Prefilled value
    #[serde(default)]
    pub value: String,
}

impl FieldDefinition {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: String::new(),
        }
    }
}

impl FormDefinition {
    /// The built-in booking form: contact details, booking details, review
    pub fn booking() -> Self {
        Self {
            steps: vec![
                StepDefinition {
                    fields: vec![
                        FieldDefinition::new("name", "Name"),
                        FieldDefinition::new("email", "Email"),
                        FieldDefinition::new("phone", "Phone"),
                    ],
                },
                StepDefinition {
                    fields: vec![
                        FieldDefinition::new("date", "Date"),
                        FieldDefinition::new("time", "Time"),
                        FieldDefinition::new("guests", "Guests"),
                    ],
                },
                StepDefinition {
                    fields: vec![FieldDefinition::new("notes", "Special requests")],
                },
            ],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, FormError> {
        let content = fs::read_to_string(path).map_err(|source| FormError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Build the form state; step ids follow position, starting at 0
    pub fn into_state(self) -> Result<FormState, FormError> {
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| {
                let fields = step
                    .fields
                    .into_iter()
                    .map(|f| Field::with_value(&f.id, &f.label, &f.value))
                    .collect();
                Step::new(index as u32, fields)
            })
            .collect();
        FormState::from_steps(steps)
    }
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::booking()
    }
}
