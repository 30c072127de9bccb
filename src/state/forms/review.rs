//! Review content assembly

use super::field::Field;

/// Render reviewed fields as the submission body,
/// one `<p><strong>label</strong>: value</p>` per field.
pub fn review_content<'a>(fields: impl IntoIterator<Item = &'a Field>) -> String {
    fields.into_iter().fold(String::new(), |mut acc, field| {
        acc.push_str("<p><strong>");
        acc.push_str(&field.label);
        acc.push_str("</strong>: ");
        acc.push_str(&field.value);
        acc.push_str("</p>");
        acc
    })
}
