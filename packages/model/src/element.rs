//! The page element tree
//!
//! A document is an ordered sequence of top-level elements, not a single
//! root. Elements never mutate in place: every edit produces a new document
//! that shares untouched subtrees through `Arc`, so a snapshot taken before
//! the edit stays valid afterwards.
//!
//! The tree itself does not enforce containment rules (`section → column →
//! widget` is a convention) or id uniqueness; both are the validation
//! engine's job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::error::ModelError;

/// Closed set of structural element kinds. Widgets additionally carry an
/// open `widget_type` string naming their rendering behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Section,
    Column,
    Widget,
}

/// A single node of the page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// Opaque id, unique across the whole document (not just siblings).
    pub id: String,

    pub kind: ElementKind,

    /// Rendering behavior name, present on widgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub widget_type: Option<String>,

    /// Ordered children. Required on the wire, even when empty.
    pub children: Vec<Arc<PageElement>>,

    /// Free-form payload (text, HTML, media refs). Schema depends on
    /// `kind`/`widget_type`; the tree does not interpret it.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub content: Value,

    /// Presentation configuration.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub styles: Map<String, Value>,

    /// Behavioral configuration.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl PageElement {
    pub fn new(id: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            id: id.into(),
            kind,
            widget_type: None,
            children: Vec::new(),
            content: Value::Null,
            styles: Map::new(),
            props: Map::new(),
        }
    }

    pub fn section(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Section)
    }

    pub fn column(id: impl Into<String>) -> Self {
        Self::new(id, ElementKind::Column)
    }

    pub fn widget(id: impl Into<String>, widget_type: impl Into<String>) -> Self {
        let mut el = Self::new(id, ElementKind::Widget);
        el.widget_type = Some(widget_type.into());
        el
    }

    pub fn with_child(mut self, child: PageElement) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    pub fn with_content(mut self, content: Value) -> Self {
        self.content = content;
        self
    }
}

/// A whole document: the sequence of top-level elements. This is also the
/// snapshot wire shape (`{"elements": [...]}`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub elements: Vec<Arc<PageElement>>,
}

impl PageDocument {
    pub fn new(elements: Vec<PageElement>) -> Self {
        Self {
            elements: elements.into_iter().map(Arc::new).collect(),
        }
    }

    /// Stable JSON encoding. Round-trips exactly through [`from_json`].
    ///
    /// [`from_json`]: PageDocument::from_json
    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a document. Fails with [`ModelError::MalformedDocument`] when
    /// the text is not valid JSON or any node lacks `id`, `kind`, or
    /// `children`.
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Depth-first, pre-order search. First match wins; duplicate ids are a
    /// validation failure upstream, never resolved here.
    pub fn find_by_id(&self, id: &str) -> Option<&PageElement> {
        fn walk<'a>(el: &'a PageElement, id: &str) -> Option<&'a PageElement> {
            if el.id == id {
                return Some(el);
            }
            el.children.iter().find_map(|child| walk(child, id))
        }
        self.elements.iter().find_map(|el| walk(el, id))
    }

    /// Replace the element with the given id, producing a new document that
    /// shares every untouched subtree. Only the nodes on the path from the
    /// root to the target are rebuilt. Returns `None` if the id is absent.
    pub fn replace(&self, id: &str, replacement: PageElement) -> Option<PageDocument> {
        let replacement = Arc::new(replacement);

        fn rebuild(
            el: &Arc<PageElement>,
            id: &str,
            replacement: &Arc<PageElement>,
        ) -> Option<Arc<PageElement>> {
            if el.id == id {
                return Some(Arc::clone(replacement));
            }
            for (i, child) in el.children.iter().enumerate() {
                if let Some(new_child) = rebuild(child, id, replacement) {
                    let mut node = (**el).clone();
                    node.children[i] = new_child;
                    return Some(Arc::new(node));
                }
            }
            None
        }

        for (i, el) in self.elements.iter().enumerate() {
            if let Some(new_root) = rebuild(el, id, &replacement) {
                let mut elements = self.elements.clone();
                elements[i] = new_root;
                return Some(PageDocument { elements });
            }
        }
        None
    }

    /// Edit one element through a closure, by replacement. The closure gets
    /// a copy of the current element; the returned document shares all
    /// untouched subtrees with `self`.
    pub fn update_element(
        &self,
        id: &str,
        edit: impl FnOnce(&mut PageElement),
    ) -> Option<PageDocument> {
        let mut node = self.find_by_id(id)?.clone();
        edit(&mut node);
        self.replace(id, node)
    }

    /// All element ids in depth-first pre-order.
    pub fn collect_ids(&self) -> Vec<&str> {
        fn walk<'a>(el: &'a PageElement, out: &mut Vec<&'a str>) {
            out.push(&el.id);
            for child in &el.children {
                walk(child, out);
            }
        }
        let mut out = Vec::new();
        for el in &self.elements {
            walk(el, &mut out);
        }
        out
    }

    /// Ids that occur more than once, in order of first duplicate
    /// occurrence, each reported once.
    pub fn duplicate_ids(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut dupes = Vec::new();
        for id in self.collect_ids() {
            if !seen.insert(id) && !dupes.iter().any(|d: &String| d.as_str() == id) {
                dupes.push(id.to_string());
            }
        }
        dupes
    }
}
