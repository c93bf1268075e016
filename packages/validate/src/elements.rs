//! Element tree validation
//!
//! The tree model deliberately enforces nothing; the checks that the
//! document invariants pin down live here: global id uniqueness and
//! section-rooted documents. Containment below the roots stays a
//! convention.

use pagecraft_model::{ElementKind, PageDocument};

use crate::result::{FieldError, ValidationResult};

pub fn validate_elements(document: &PageDocument) -> ValidationResult {
    let mut errors = Vec::new();

    for id in document.duplicate_ids() {
        errors.push(FieldError::new(
            "elements",
            format!("Duplicate element id: {}", id),
        ));
    }

    for element in &document.elements {
        if element.kind != ElementKind::Section {
            errors.push(FieldError::new(
                "elements",
                format!("Top-level element \"{}\" must be a section", element.id),
            ));
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::PageElement;

    #[test]
    fn test_well_formed_tree() {
        let doc = PageDocument::new(vec![PageElement::section("s1")
            .with_child(PageElement::column("c1").with_child(PageElement::widget("w1", "text")))]);
        assert!(validate_elements(&doc).is_valid);
    }

    #[test]
    fn test_duplicate_ids_reported() {
        let doc = PageDocument::new(vec![
            PageElement::section("s1").with_child(PageElement::column("s1")),
            PageElement::section("s2"),
        ]);
        let result = validate_elements(&doc);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("s1"));
    }

    #[test]
    fn test_non_section_root_reported() {
        let doc = PageDocument::new(vec![PageElement::column("c1")]);
        let result = validate_elements(&doc);
        assert!(!result.is_valid);
        assert!(result.errors[0].message.contains("c1"));
    }
}
