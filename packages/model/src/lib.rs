//! Core data structures for Pagecraft documents
//!
//! This crate defines:
//! - The page element tree (`PageElement`, `PageDocument`)
//! - Persisted document envelopes (`Page`, `Menu`, `MenuItem`)
//! - The realtime update unit (`RealtimeUpdate`)
//!
//! Everything here is pure data plus serde. Validation lives in
//! `pagecraft-validate`; broadcast and snapshot hand-off live in
//! `pagecraft-sync`.

pub mod element;
pub mod envelope;
pub mod error;
pub mod menu;
pub mod update;

pub use element::{ElementKind, PageDocument, PageElement};
pub use envelope::{Menu, Page, Visibility};
pub use error::ModelError;
pub use menu::MenuItem;
pub use update::{RealtimeUpdate, UpdateAction, UpdateSubject};
