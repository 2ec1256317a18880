//! Slug and block-key format rules.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;

/// Maximum length for a page slug.
pub const MAX_SLUG_LEN: usize = 120;

/// Maximum length for a block key.
pub const MAX_BLOCK_KEY_LEN: usize = 64;

fn slug_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap())
}

fn block_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap())
}

/// Validate a page slug: lowercase kebab-case, URL-safe, length-capped.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.is_empty() {
        return Err(CoreError::Validation("Slug must not be empty".to_string()));
    }
    if slug.len() > MAX_SLUG_LEN {
        return Err(CoreError::Validation(format!(
            "Slug too long: {} chars (max {MAX_SLUG_LEN})",
            slug.len()
        )));
    }
    if !slug_pattern().is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Invalid slug '{slug}'. Use lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Validate a block key: a stable snake_case machine name, unique per page.
pub fn validate_block_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::Validation(
            "Block key must not be empty".to_string(),
        ));
    }
    if key.len() > MAX_BLOCK_KEY_LEN {
        return Err(CoreError::Validation(format!(
            "Block key too long: {} chars (max {MAX_BLOCK_KEY_LEN})",
            key.len()
        )));
    }
    if !block_key_pattern().is_match(key) {
        return Err(CoreError::Validation(format!(
            "Invalid block key '{key}'. Use snake_case starting with a letter"
        )));
    }
    Ok(())
}
