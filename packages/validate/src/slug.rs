//! Slug helpers
//!
//! A slug is lowercase alphanumeric segments joined by single hyphens, with
//! no leading or trailing hyphen.

use regex::Regex;
use std::sync::OnceLock;

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern"))
}

pub fn is_valid_slug(candidate: &str) -> bool {
    slug_regex().is_match(candidate)
}

/// Derive a slug from a human title: lowercase, drop anything outside
/// `[a-z0-9\s-]`, collapse whitespace and hyphen runs to single hyphens,
/// trim hyphens from both ends.
pub fn generate_slug(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for ch in lowered.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '-' {
            pending_hyphen = true;
        }
        // anything else is stripped without breaking the current segment
    }

    out
}

/// Probe `base`, `base-2`, `base-3`, … until `exists` reports a free
/// candidate. Strictly sequential: each existence check is observed before
/// the next candidate is issued.
///
/// Advisory only — two producers probing concurrently can still settle on
/// the same suffix, so the persistence layer enforces uniqueness atomically
/// as the backstop.
pub fn unique_slug(base: &str, mut exists: impl FnMut(&str) -> bool) -> String {
    if !exists(base) {
        return base.to_string();
    }
    let mut n: u64 = 2;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !exists(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
