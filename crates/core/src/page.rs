//! Page-level status rules.
//!
//! Page status toggles independently of block-level draft state: a page can
//! be published while individual blocks still carry unpublished drafts.

use crate::error::CoreError;

/// Status of a page that is still being assembled.
pub const STATUS_DRAFT: &str = "draft";

/// Status of a page visible on the public read path.
pub const STATUS_PUBLISHED: &str = "published";

/// All valid page statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_PUBLISHED];

/// Validate that `status` is one of the known page statuses.
pub fn validate_status(status: &str) -> Result<(), CoreError> {
    if VALID_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid page status '{status}'. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )))
    }
}
