//! End-to-end validation scenarios over real document payloads

use pagecraft_model::{Menu, Page, PageDocument, PageElement, Visibility};
use pagecraft_validate::{
    generate_slug, is_valid_slug, unique_slug, validate_elements, validate_menu, validate_page,
};
use serde_json::json;

fn draft_page() -> Page {
    let tree = PageDocument::new(vec![PageElement::section("s1").with_child(
        PageElement::column("c1").with_child(
            PageElement::widget("w1", "rich-text")
                .with_content(json!({"html": "<p>Read https://example.com/docs</p>"})),
        ),
    )]);

    Page {
        id: String::new(),
        title: "Getting Started".to_string(),
        slug: generate_slug("Getting Started"),
        content: tree.to_json().unwrap(),
        visibility: Visibility::Public,
        password: None,
    }
}

#[test]
fn test_generated_slug_passes_page_validation() {
    let page = draft_page();
    assert_eq!(page.slug, "getting-started");
    assert!(validate_page(&page).is_valid);
}

#[test]
fn test_serialized_tree_validates_before_persist() {
    let page = draft_page();
    let tree = PageDocument::from_json(&page.content).unwrap();
    assert!(validate_elements(&tree).is_valid);
}

#[test]
fn test_all_page_problems_reported_in_one_pass() {
    let page = Page {
        id: String::new(),
        title: "   ".to_string(),
        slug: "Bad Slug".to_string(),
        content: "see http://%bad and also http://%worse".to_string(),
        visibility: Visibility::PasswordProtected,
        password: Some("123".to_string()),
    };

    let result = validate_page(&page);
    assert!(!result.is_valid);
    assert_eq!(result.field_errors("title").len(), 1);
    assert_eq!(result.field_errors("slug").len(), 1);
    assert_eq!(result.field_errors("content").len(), 2);
    assert_eq!(result.field_errors("password").len(), 1);

    // presentation view folds the two content errors into one message
    let merged = result.merged();
    let content = merged.iter().find(|e| e.field == "content").unwrap();
    assert!(content.message.contains(", "));
}

#[test]
fn test_menu_items_roundtrip_through_model_types() {
    use pagecraft_model::MenuItem;

    let items = vec![
        MenuItem::new("1", "Home", "/"),
        MenuItem::new("2", "Docs", "https://docs.example.com")
            .with_child(MenuItem::new("3", "API", "/docs/api")),
    ];
    let menu = Menu {
        id: String::new(),
        name: "Primary".to_string(),
        location: "header".to_string(),
        items: Some(serde_json::to_string(&items).unwrap()),
        style: Some(r#"{"align":"center"}"#.to_string()),
    };

    assert!(validate_menu(&menu).is_valid);
}

#[test]
fn test_slug_helpers_agree() {
    let slug = generate_slug("Hello, World!");
    assert_eq!(slug, "hello-world");
    assert!(is_valid_slug(&slug));
    assert!(!is_valid_slug("Hello_World"));
}

#[test]
fn test_uniqueness_probe_over_existing_set() {
    let existing = vec!["post".to_string(), "post-2".to_string()];
    let slug = unique_slug("post", |candidate| existing.iter().any(|s| s == candidate));
    assert_eq!(slug, "post-3");
}
