//! Validation results

use serde::Serialize;

/// One problem, tied to the field it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a validation pass. `is_valid` is true exactly when `errors`
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Errors for one specific field, in encounter order.
    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Presentation view: one entry per field, messages joined by `", "`
    /// in encounter order. The raw error list stays authoritative.
    pub fn merged(&self) -> Vec<FieldError> {
        let mut merged: Vec<FieldError> = Vec::new();
        for error in &self.errors {
            if let Some(existing) = merged.iter_mut().find(|e| e.field == error.field) {
                existing.message.push_str(", ");
                existing.message.push_str(&error.message);
            } else {
                merged.push(error.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_errors_is_valid() {
        assert!(ValidationResult::from_errors(vec![]).is_valid);
    }

    #[test]
    fn test_merged_joins_per_field_in_order() {
        let result = ValidationResult::from_errors(vec![
            FieldError::new("content", "first"),
            FieldError::new("title", "alone"),
            FieldError::new("content", "second"),
        ]);

        let merged = result.merged();
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].field, "content");
        assert_eq!(merged[0].message, "first, second");
        assert_eq!(merged[1].message, "alone");
        // raw list untouched
        assert_eq!(result.errors.len(), 3);
    }
}
