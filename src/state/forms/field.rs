//! Form field value objects

/// A single named input with its current string value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    pub label: String,
    pub value: String,
}

impl Field {
    /// Create a new empty field
    #[allow(dead_code)]
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: String::new(),
        }
    }

    /// Create a new field with initial value
    pub fn with_value(id: &str, label: &str, value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    /// Value with the last character removed (Backspace)
    pub fn value_without_last_char(&self) -> String {
        let mut value = self.value.clone();
        value.pop();
        value
    }

    /// Value with a character appended
    pub fn value_with_char(&self, c: char) -> String {
        let mut value = self.value.clone();
        value.push(c);
        value
    }

    /// Clear the field value
    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Reference to a field within a form, by owning step id and field id
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub step_id: u32,
    pub field_id: String,
}

impl FieldRef {
    pub fn new(step_id: u32, field_id: &str) -> Self {
        Self {
            step_id,
            field_id: field_id.to_string(),
        }
    }
}
