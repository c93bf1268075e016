//! Content persistence contract
//!
//! Create/read/update/delete for the four persisted entity kinds, keyed by
//! opaque id. Page slugs are unique at the storage layer: the probe in
//! `pagecraft-validate` is advisory, this constraint is authoritative.

use pagecraft_model::{Menu, Page};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("slug already in use: {0}")]
    SlugTaken(String),
}

/// Reusable page scaffold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Stringified element tree used as the starting document.
    #[serde(default)]
    pub content: String,
}

/// Standalone page outside the site tree (campaigns, link-in-bio, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingPage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

pub trait ContentStore: Send + Sync {
    fn create_page(&self, page: Page) -> Result<Page, StoreError>;
    fn get_page(&self, id: &str) -> Result<Option<Page>, StoreError>;
    fn update_page(&self, page: Page) -> Result<(), StoreError>;
    fn delete_page(&self, id: &str) -> Result<(), StoreError>;
    /// Existence check backing the advisory slug probe.
    fn slug_exists(&self, slug: &str) -> Result<bool, StoreError>;

    fn create_menu(&self, menu: Menu) -> Result<Menu, StoreError>;
    fn get_menu(&self, id: &str) -> Result<Option<Menu>, StoreError>;
    fn update_menu(&self, menu: Menu) -> Result<(), StoreError>;
    fn delete_menu(&self, id: &str) -> Result<(), StoreError>;

    fn create_template(&self, template: Template) -> Result<Template, StoreError>;
    fn get_template(&self, id: &str) -> Result<Option<Template>, StoreError>;
    fn update_template(&self, template: Template) -> Result<(), StoreError>;
    fn delete_template(&self, id: &str) -> Result<(), StoreError>;

    fn create_landing_page(&self, page: LandingPage) -> Result<LandingPage, StoreError>;
    fn get_landing_page(&self, id: &str) -> Result<Option<LandingPage>, StoreError>;
    fn update_landing_page(&self, page: LandingPage) -> Result<(), StoreError>;
    fn delete_landing_page(&self, id: &str) -> Result<(), StoreError>;
}

#[derive(Default)]
struct Records {
    pages: HashMap<String, Page>,
    menus: HashMap<String, Menu>,
    templates: HashMap<String, Template>,
    landing_pages: HashMap<String, LandingPage>,
}

/// In-memory store. One lock around all records, so the slug check and the
/// insert happen atomically.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn assign_id(id: &mut String) {
    if id.is_empty() {
        *id = Uuid::new_v4().to_string();
    }
}

impl ContentStore for MemoryStore {
    fn create_page(&self, mut page: Page) -> Result<Page, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if records.pages.values().any(|p| p.slug == page.slug) {
            return Err(StoreError::SlugTaken(page.slug));
        }
        assign_id(&mut page.id);
        records.pages.insert(page.id.clone(), page.clone());
        tracing::debug!(id = %page.id, slug = %page.slug, "page created");
        Ok(page)
    }

    fn get_page(&self, id: &str) -> Result<Option<Page>, StoreError> {
        let records = self.records.lock().expect("store lock");
        Ok(records.pages.get(id).cloned())
    }

    fn update_page(&self, page: Page) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if !records.pages.contains_key(&page.id) {
            return Err(StoreError::NotFound(page.id));
        }
        if records
            .pages
            .values()
            .any(|p| p.slug == page.slug && p.id != page.id)
        {
            return Err(StoreError::SlugTaken(page.slug));
        }
        records.pages.insert(page.id.clone(), page);
        Ok(())
    }

    fn delete_page(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        records
            .pages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn slug_exists(&self, slug: &str) -> Result<bool, StoreError> {
        let records = self.records.lock().expect("store lock");
        Ok(records.pages.values().any(|p| p.slug == slug))
    }

    fn create_menu(&self, mut menu: Menu) -> Result<Menu, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        assign_id(&mut menu.id);
        records.menus.insert(menu.id.clone(), menu.clone());
        Ok(menu)
    }

    fn get_menu(&self, id: &str) -> Result<Option<Menu>, StoreError> {
        let records = self.records.lock().expect("store lock");
        Ok(records.menus.get(id).cloned())
    }

    fn update_menu(&self, menu: Menu) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if !records.menus.contains_key(&menu.id) {
            return Err(StoreError::NotFound(menu.id));
        }
        records.menus.insert(menu.id.clone(), menu);
        Ok(())
    }

    fn delete_menu(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        records
            .menus
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create_template(&self, mut template: Template) -> Result<Template, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        assign_id(&mut template.id);
        records.templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    fn get_template(&self, id: &str) -> Result<Option<Template>, StoreError> {
        let records = self.records.lock().expect("store lock");
        Ok(records.templates.get(id).cloned())
    }

    fn update_template(&self, template: Template) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if !records.templates.contains_key(&template.id) {
            return Err(StoreError::NotFound(template.id));
        }
        records.templates.insert(template.id.clone(), template);
        Ok(())
    }

    fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        records
            .templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn create_landing_page(&self, mut page: LandingPage) -> Result<LandingPage, StoreError> {
        let mut records = self.records.lock().expect("store lock");
        assign_id(&mut page.id);
        records.landing_pages.insert(page.id.clone(), page.clone());
        Ok(page)
    }

    fn get_landing_page(&self, id: &str) -> Result<Option<LandingPage>, StoreError> {
        let records = self.records.lock().expect("store lock");
        Ok(records.landing_pages.get(id).cloned())
    }

    fn update_landing_page(&self, page: LandingPage) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        if !records.landing_pages.contains_key(&page.id) {
            return Err(StoreError::NotFound(page.id));
        }
        records.landing_pages.insert(page.id.clone(), page);
        Ok(())
    }

    fn delete_landing_page(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("store lock");
        records
            .landing_pages
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
