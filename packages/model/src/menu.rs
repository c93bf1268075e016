//! Menu items
//!
//! Menu items nest recursively with no depth limit. Fields default to
//! empty when absent on the wire so that the validation engine can report
//! missing fields per item instead of failing the whole decode.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: MenuItem) -> Self {
        self.children.push(child);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let item: MenuItem = serde_json::from_str(r#"{"id":"1","label":"Home"}"#).unwrap();
        assert_eq!(item.id, "1");
        assert_eq!(item.url, "");
        assert!(item.children.is_empty());
    }

    #[test]
    fn test_nested_roundtrip() {
        let item = MenuItem::new("1", "Docs", "/docs")
            .with_child(MenuItem::new("2", "Guides", "/docs/guides"));
        let text = serde_json::to_string(&item).unwrap();
        assert_eq!(item, serde_json::from_str(&text).unwrap());
    }
}
