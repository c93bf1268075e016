//! # Pagecraft Validation Engine
//!
//! Structural and semantic checks on pages, menus, and element trees prior
//! to persistence.
//!
//! ## Design Principles
//!
//! 1. **Results, not errors**: validation never fails with an `Err`; it
//!    always returns a [`ValidationResult`] carrying a structured list of
//!    field/message pairs.
//! 2. **Validate before persist**: callers run these checks on candidate
//!    payloads; the persistence layer still enforces hard constraints
//!    (slug uniqueness) as the authoritative backstop.
//! 3. **Accumulate everything**: a single pass reports every problem it
//!    finds, in document order.

mod elements;
mod menu;
mod page;
mod result;
pub mod slug;

pub use elements::validate_elements;
pub use menu::validate_menu;
pub use page::validate_page;
pub use result::{FieldError, ValidationResult};
pub use slug::{generate_slug, is_valid_slug, unique_slug};
