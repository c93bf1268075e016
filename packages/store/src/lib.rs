//! External collaborator contracts
//!
//! The sync core treats persistence and media handling as external
//! collaborators. This crate pins down those contracts: a CRUD store for
//! pages, menus, templates, and landing pages keyed by opaque id (with slug
//! uniqueness enforced atomically at the store, the authoritative backstop
//! behind the advisory slug probe), and the media upload gate.

pub mod content;
pub mod media;

pub use content::{ContentStore, LandingPage, MemoryStore, StoreError, Template};
pub use media::{
    check_upload, DiskMediaStore, MediaCategory, MediaError, StoredMedia, MAX_UPLOAD_BYTES,
};
