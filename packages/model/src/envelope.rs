//! Persisted document envelopes
//!
//! `Page` and `Menu` are the shapes handed to the persistence collaborator.
//! Their `content`/`items` fields carry the stringified element tree or
//! menu-item list; the validation engine checks them before persistence.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    PasswordProtected,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    /// Stringified element tree (`PageDocument` JSON).
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Placement slot, e.g. "header" or "footer".
    #[serde(default)]
    pub location: String,
    /// Stringified menu-item list (`Vec<MenuItem>` JSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<String>,
    /// Stringified presentation overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}
