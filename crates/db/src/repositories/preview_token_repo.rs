//! Repository for the `preview_tokens` table.

use chrono::{Duration, Utc};
use hasta_core::types::DbId;
use sqlx::PgPool;

use crate::models::preview_token::PreviewToken;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, page_id, token, expires_at, created_at";

/// Issues, validates, and garbage-collects preview tokens.
pub struct PreviewTokenRepo;

impl PreviewTokenRepo {
    /// Insert a new token expiring `expires_in_minutes` from now.
    ///
    /// Zero minutes is legal and yields a token that is already expired at
    /// creation time.
    pub async fn create(
        pool: &PgPool,
        page_id: DbId,
        token: &str,
        expires_in_minutes: i64,
    ) -> Result<PreviewToken, sqlx::Error> {
        let expires_at = Utc::now() + Duration::minutes(expires_in_minutes);
        let query = format!(
            "INSERT INTO preview_tokens (page_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PreviewToken>(&query)
            .bind(page_id)
            .bind(token)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Look up a token that is still inside its validity window.
    ///
    /// A missing token and an expired token both return `None`; callers
    /// must not (and cannot) distinguish the two, so the API surface never
    /// leaks whether a token ever existed.
    pub async fn find_valid(pool: &PgPool, token: &str) -> Result<Option<PreviewToken>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM preview_tokens WHERE token = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, PreviewToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all tokens issued for a page, newest first.
    pub async fn list_by_page(
        pool: &PgPool,
        page_id: DbId,
    ) -> Result<Vec<PreviewToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM preview_tokens
             WHERE page_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, PreviewToken>(&query)
            .bind(page_id)
            .fetch_all(pool)
            .await
    }

    /// Bulk-delete every expired token. Returns the number removed.
    ///
    /// The predicate only matches rows whose expiry has already passed, so
    /// a token still in its valid window at call time can never be removed,
    /// concurrently with issuance or not. Safe to run repeatedly.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM preview_tokens WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
