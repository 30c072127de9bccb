//! Form steps

use super::field::Field;

/// One page of a multi-step form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: u32,
    pub is_active: bool,
    pub fields: Vec<Field>,
}

impl Step {
    /// Create an inactive step
    pub fn new(id: u32, fields: Vec<Field>) -> Self {
        Self {
            id,
            is_active: false,
            fields,
        }
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    pub fn field_mut(&mut self, field_id: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.id == field_id)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
