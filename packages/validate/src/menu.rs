//! Menu validation
//!
//! Menu items nest arbitrarily deep; errors accumulate depth-first in
//! document order, parent before children. A missing `id`/`label`/`url`
//! reports once per item, not once per missing sub-field.

use pagecraft_model::{Menu, MenuItem};
use url::Url;

use crate::result::{FieldError, ValidationResult};

pub fn validate_menu(menu: &Menu) -> ValidationResult {
    let mut errors = Vec::new();

    if menu.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if let Some(items) = &menu.items {
        match serde_json::from_str::<Vec<MenuItem>>(items) {
            Ok(parsed) => {
                for item in &parsed {
                    validate_item(item, &mut errors);
                }
            }
            Err(_) => {
                errors.push(FieldError::new("items", "Items must be valid JSON"));
            }
        }
    }

    if let Some(style) = &menu.style {
        if serde_json::from_str::<serde_json::Value>(style).is_err() {
            errors.push(FieldError::new("style", "Style must be valid JSON"));
        }
    }

    ValidationResult::from_errors(errors)
}

fn validate_item(item: &MenuItem, errors: &mut Vec<FieldError>) {
    if item.id.is_empty() || item.label.is_empty() || item.url.is_empty() {
        errors.push(FieldError::new(
            "items",
            format!(
                "Menu item \"{}\" requires id, label, and url",
                item_name(item)
            ),
        ));
    } else if !is_fragment_or_relative(&item.url) && Url::parse(&item.url).is_err() {
        errors.push(FieldError::new(
            "items",
            format!(
                "Menu item \"{}\" has an invalid URL: {}",
                item.label, item.url
            ),
        ));
    }

    for child in &item.children {
        validate_item(child, errors);
    }
}

/// Fragments (`#...`) and root-relative paths (`/...`) are accepted as-is;
/// anything else must parse as an absolute URL.
fn is_fragment_or_relative(url: &str) -> bool {
    url.starts_with('#') || url.starts_with('/')
}

fn item_name(item: &MenuItem) -> &str {
    if !item.label.is_empty() {
        &item.label
    } else if !item.id.is_empty() {
        &item.id
    } else {
        "(unnamed)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu_with_items(items: &str) -> Menu {
        Menu {
            id: "m1".into(),
            name: "Main".into(),
            location: "header".into(),
            items: Some(items.into()),
            style: None,
        }
    }

    #[test]
    fn test_valid_menu() {
        let menu = menu_with_items(
            r#"[{"id":"1","label":"Home","url":"/"},
                {"id":"2","label":"Docs","url":"https://docs.example.com"}]"#,
        );
        assert!(validate_menu(&menu).is_valid);
    }

    #[test]
    fn test_blank_name() {
        let mut menu = menu_with_items("[]");
        menu.name = "  ".into();
        let result = validate_menu(&menu);
        assert_eq!(result.field_errors("name").len(), 1);
    }

    #[test]
    fn test_unparseable_items_is_one_aggregate_error() {
        let menu = menu_with_items("[{broken");
        let result = validate_menu(&menu);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "items");
    }

    #[test]
    fn test_missing_url_reports_once_per_item() {
        let menu = menu_with_items(r#"[{"id":"1","label":"Home"}]"#);
        let result = validate_menu(&menu);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Home"));
    }

    #[test]
    fn test_item_missing_everything_still_one_error() {
        let menu = menu_with_items(r#"[{}]"#);
        let result = validate_menu(&menu);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("(unnamed)"));
    }

    #[test]
    fn test_fragment_and_relative_urls_accepted() {
        let menu = menu_with_items(
            r##"[{"id":"1","label":"Top","url":"#top"},
                {"id":"2","label":"About","url":"/about"}]"##,
        );
        assert!(validate_menu(&menu).is_valid);
    }

    #[test]
    fn test_bad_absolute_url_names_the_item() {
        let menu = menu_with_items(r#"[{"id":"1","label":"Blog","url":"not a url"}]"#);
        let result = validate_menu(&menu);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("Blog"));
        assert!(result.errors[0].message.contains("not a url"));
    }

    #[test]
    fn test_nested_children_accumulate_parent_first() {
        let menu = menu_with_items(
            r#"[{"id":"1","label":"Docs","url":"nope","children":[
                    {"id":"2","label":"Guide","children":[
                        {"id":"3","label":"Deep","url":"also bad"}
                    ]}
               ]}]"#,
        );
        let result = validate_menu(&menu);
        assert_eq!(result.errors.len(), 3);
        assert!(result.errors[0].message.contains("Docs"));
        assert!(result.errors[1].message.contains("Guide"));
        assert!(result.errors[2].message.contains("Deep"));
    }

    #[test]
    fn test_absent_items_is_fine() {
        let menu = Menu {
            id: "m1".into(),
            name: "Footer".into(),
            location: "footer".into(),
            items: None,
            style: None,
        };
        assert!(validate_menu(&menu).is_valid);
    }

    #[test]
    fn test_bad_style_json() {
        let mut menu = menu_with_items("[]");
        menu.style = Some("{oops".into());
        let result = validate_menu(&menu);
        assert_eq!(result.field_errors("style").len(), 1);
    }
}
