//! Validation of rendered layer documents before merging.

use crate::model::{LayerRole, VectorDocument};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Check a rendered layer document.
///
/// Errors mirror what the merge would reject; warnings flag output that
/// merges fine but is probably not what the designer meant.
pub fn validate_layer(document: &VectorDocument, layer: LayerRole) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if let Err(issue) = document.title_element() {
        result.add_error(format!("{} layer: {}", layer, issue));
    }

    match document.single_drawable_path() {
        Ok(path) => {
            let empty = path.attr("d").map_or(true, |d| d.trim().is_empty());
            if empty {
                result.add_warning(format!("{} layer: path has no geometry", layer));
            }
        }
        Err(issue) => result.add_error(format!("{} layer: {}", layer, issue)),
    }

    if document.root().attr("viewBox").is_none() {
        result.add_warning(format!("{} layer: root has no viewBox", layer));
    }

    let nested = document
        .root()
        .child_elements()
        .filter(|e| e.name == "g")
        .count();
    if nested > 0 {
        result.add_warning(format!(
            "{} layer: {} group(s) next to the path are carried over unstyled",
            layer, nested
        ));
    }

    result
}
