//! Preview token generation and expiry rules.
//!
//! A preview token is a bearer capability granting time-boxed read access to
//! a page's draft content. Tokens are opaque random strings looked up by
//! value; expiry is the only invalidation mechanism, and possession is the
//! only access check — whoever distributes a preview URL is handing out a
//! transferable secret.

use rand::Rng;

use crate::error::CoreError;

/// Length of a generated preview token (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 40;

/// Expiry window applied when the caller does not choose one.
pub const DEFAULT_EXPIRES_IN_MINUTES: i64 = 60;

/// Upper bound on the expiry window: 7 days.
pub const MAX_EXPIRES_IN_MINUTES: i64 = 7 * 24 * 60;

/// Generate a new opaque preview token.
pub fn generate_preview_token() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Validate a caller-chosen expiry window.
///
/// Zero is allowed: it produces a token that is expired on arrival, which
/// callers rely on as a boundary case.
pub fn validate_expiry_minutes(minutes: i64) -> Result<(), CoreError> {
    if minutes < 0 {
        return Err(CoreError::Validation(
            "expires_in_minutes must not be negative".to_string(),
        ));
    }
    if minutes > MAX_EXPIRES_IN_MINUTES {
        return Err(CoreError::Validation(format!(
            "expires_in_minutes too large: {minutes} (max {MAX_EXPIRES_IN_MINUTES})"
        )));
    }
    Ok(())
}
