//! Page validation

use pagecraft_model::{Page, Visibility};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

use crate::result::{FieldError, ValidationResult};
use crate::slug::is_valid_slug;

const MIN_PASSWORD_LEN: usize = 6;

fn url_shaped() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s"'<>]*"#).expect("url pattern"))
}

/// Validate a candidate page payload. Never fails; every problem found is
/// accumulated into the result.
pub fn validate_page(page: &Page) -> ValidationResult {
    let mut errors = Vec::new();

    if page.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is required"));
    }

    if page.slug.trim().is_empty() {
        errors.push(FieldError::new("slug", "Slug is required"));
    } else if !is_valid_slug(&page.slug) {
        errors.push(FieldError::new(
            "slug",
            "Slug must be lowercase letters, numbers, and single hyphens",
        ));
    }

    if page.content.trim().is_empty() {
        errors.push(FieldError::new("content", "Content is required"));
    } else {
        check_content_urls(&page.content, &mut errors);
    }

    if page.visibility == Visibility::PasswordProtected {
        match &page.password {
            Some(password) if password.len() >= MIN_PASSWORD_LEN => {}
            _ => errors.push(FieldError::new(
                "password",
                "Password of at least 6 characters is required for protected pages",
            )),
        }
    }

    ValidationResult::from_errors(errors)
}

/// Scan textual content for URL-shaped substrings and report each one that
/// does not parse, 1-indexed by order of appearance.
fn check_content_urls(content: &str, errors: &mut Vec<FieldError>) {
    for (index, found) in url_shaped().find_iter(content).enumerate() {
        let candidate = found.as_str();
        if Url::parse(candidate).is_err() {
            errors.push(FieldError::new(
                "content",
                format!("URL {} (\"{}\") is not valid", index + 1, candidate),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_page() -> Page {
        Page {
            id: "p1".into(),
            title: "Home".into(),
            slug: "home".into(),
            content: r#"{"elements":[]}"#.into(),
            visibility: Visibility::Public,
            password: None,
        }
    }

    #[test]
    fn test_valid_page() {
        let result = validate_page(&valid_page());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_blank_title_reports_title_only() {
        let mut page = valid_page();
        page.title = "".into();
        page.slug = "ok".into();
        page.content = "x".into();

        let result = validate_page(&page);
        assert!(!result.is_valid);
        assert_eq!(result.field_errors("title").len(), 1);
        assert!(result.field_errors("slug").is_empty());
    }

    #[test]
    fn test_bad_slug() {
        let mut page = valid_page();
        page.slug = "Hello_World".into();
        let result = validate_page(&page);
        assert_eq!(result.field_errors("slug").len(), 1);
    }

    #[test]
    fn test_password_protected_requires_long_password() {
        let mut page = valid_page();
        page.visibility = Visibility::PasswordProtected;

        page.password = None;
        assert!(!validate_page(&page).is_valid);

        page.password = Some("short".into());
        assert!(!validate_page(&page).is_valid);

        page.password = Some("longenough".into());
        assert!(validate_page(&page).is_valid);
    }

    #[test]
    fn test_invalid_urls_reported_individually() {
        let mut page = valid_page();
        page.content = "See https://example.com and http://%zz then https://#".into();

        let result = validate_page(&page);
        let content_errors = result.field_errors("content");
        assert_eq!(content_errors.len(), 2);
        assert!(content_errors[0].message.contains("http://%zz"));
        assert!(content_errors[0].message.starts_with("URL 2"));
        assert!(content_errors[1].message.starts_with("URL 3"));
    }
}
