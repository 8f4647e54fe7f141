//! Splitting a larger document into sections separated by a marker line.

use crate::error::{Result, TemplateError};

/// Splits `text` on lines consisting exactly of `separator`.
///
/// Empty sections between separators are kept; a trailing empty section is
/// dropped, so an empty document has no sections at all.
pub fn split_sections(text: &str, separator: &str) -> Vec<String> {
    let delimiter = format!("\n{}\n", separator);
    let mut sections: Vec<String> = text.split(delimiter.as_str()).map(String::from).collect();
    if sections.last().is_some_and(|s| s.is_empty()) {
        sections.pop();
    }
    sections
}

/// Like [`split_sections`], additionally checking the section count.
///
/// `expected` of `None` or `Some(0)` disables the check. `id` names the
/// document in the error.
pub fn split(
    text: &str,
    separator: &str,
    expected: Option<usize>,
    id: &str,
) -> Result<Vec<String>> {
    let sections = split_sections(text, separator);
    match expected {
        Some(expected) if expected > 0 && sections.len() != expected => {
            Err(TemplateError::SectionCountError {
                id: id.to_string(),
                expected,
                actual: sections.len(),
            })
        }
        _ => Ok(sections),
    }
}
