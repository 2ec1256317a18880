//! Integration tests for the draft/publish/version lifecycle:
//! - Publishing copies draft into published and appends a snapshot
//! - Version numbers are gapless per block, even interleaved across blocks
//! - Draft updates never touch published content
//! - Reverting stages a snapshot as the draft without changing published
//! - Snapshot lookups are scoped to the owning block

use hasta_db::models::block::CreateBlock;
use hasta_db::models::page::CreatePage;
use hasta_db::repositories::{BlockRepo, PageRepo, VersionSnapshotRepo};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn setup_page(pool: &PgPool, slug: &str) -> i64 {
    PageRepo::create(
        pool,
        &CreatePage {
            slug: slug.to_string(),
            title: format!("Page {slug}"),
            status: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn setup_text_block(pool: &PgPool, page_id: i64, key: &str, value: &str) -> i64 {
    BlockRepo::create(
        pool,
        &CreateBlock {
            page_id,
            block_key: key.to_string(),
            block_type: "text".to_string(),
            content_draft: json!({ "type": "text", "value": value }),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Publish
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_publish_copies_draft_and_snapshots(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let block_id = setup_text_block(&pool, page_id, "hero_title", "old").await;

    // First publish: version 1, published mirrors the draft.
    let (block, snapshot) = BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();
    assert_eq!(snapshot.version_number, 1);
    assert_eq!(
        block.content_published,
        Some(json!({ "type": "text", "value": "old" }))
    );

    // Edit the draft: published stays at the old copy.
    let block = BlockRepo::update_draft(&pool, block_id, &json!({ "type": "text", "value": "new" }))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(block.content_draft, json!({ "type": "text", "value": "new" }));
    assert_eq!(
        block.content_published,
        Some(json!({ "type": "text", "value": "old" }))
    );

    // Second publish: version 2, published catches up.
    let (block, snapshot) = BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();
    assert_eq!(snapshot.version_number, 2);
    assert_eq!(
        block.content_published,
        Some(json!({ "type": "text", "value": "new" }))
    );
}

#[sqlx::test]
async fn test_publish_unknown_block_returns_none(pool: PgPool) {
    let result = BlockRepo::publish(&pool, 9999).await.unwrap();
    assert!(result.is_none());
}

#[sqlx::test]
async fn test_version_numbers_are_gapless_per_block(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let first = setup_text_block(&pool, page_id, "hero_title", "a").await;
    let second = setup_text_block(&pool, page_id, "hero_subtitle", "b").await;

    // Interleave publishes across the two blocks; each keeps its own
    // gapless sequence.
    for _ in 0..3 {
        BlockRepo::publish(&pool, first).await.unwrap().unwrap();
        BlockRepo::publish(&pool, second).await.unwrap().unwrap();
    }
    BlockRepo::publish(&pool, first).await.unwrap().unwrap();

    let first_versions: Vec<i32> = VersionSnapshotRepo::list_by_block(&pool, first)
        .await
        .unwrap()
        .iter()
        .map(|v| v.version_number)
        .collect();
    let second_versions: Vec<i32> = VersionSnapshotRepo::list_by_block(&pool, second)
        .await
        .unwrap()
        .iter()
        .map(|v| v.version_number)
        .collect();

    assert_eq!(first_versions, vec![4, 3, 2, 1]);
    assert_eq!(second_versions, vec![3, 2, 1]);
}

#[sqlx::test]
async fn test_update_draft_never_touches_published(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let block_id = setup_text_block(&pool, page_id, "hero_title", "v1").await;
    BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();

    for value in ["v2", "v3", "v4"] {
        let block =
            BlockRepo::update_draft(&pool, block_id, &json!({ "type": "text", "value": value }))
                .await
                .unwrap()
                .unwrap();
        assert_eq!(
            block.content_published,
            Some(json!({ "type": "text", "value": "v1" }))
        );
    }
}

#[sqlx::test]
async fn test_update_draft_unknown_block_returns_none(pool: PgPool) {
    let result = BlockRepo::update_draft(&pool, 9999, &json!({ "type": "text", "value": "x" }))
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Version history
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_versions_newest_first(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let block_id = setup_text_block(&pool, page_id, "hero_title", "old").await;

    BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();
    BlockRepo::update_draft(&pool, block_id, &json!({ "type": "text", "value": "new" }))
        .await
        .unwrap()
        .unwrap();
    BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();

    let versions = VersionSnapshotRepo::list_by_block(&pool, block_id)
        .await
        .unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0].version_number, 2);
    assert_eq!(versions[0].content, json!({ "type": "text", "value": "new" }));
    assert_eq!(versions[1].version_number, 1);
    assert_eq!(versions[1].content, json!({ "type": "text", "value": "old" }));
}

#[sqlx::test]
async fn test_list_versions_empty_before_first_publish(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let block_id = setup_text_block(&pool, page_id, "hero_title", "a").await;

    let versions = VersionSnapshotRepo::list_by_block(&pool, block_id)
        .await
        .unwrap();
    assert!(versions.is_empty());
}

#[sqlx::test]
async fn test_revert_stages_draft_without_touching_published(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let block_id = setup_text_block(&pool, page_id, "hero_title", "old").await;

    BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();
    BlockRepo::update_draft(&pool, block_id, &json!({ "type": "text", "value": "new" }))
        .await
        .unwrap()
        .unwrap();
    BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();

    // Revert to version 1: draft goes back, live content stays at v2.
    let versions = VersionSnapshotRepo::list_by_block(&pool, block_id)
        .await
        .unwrap();
    let v1 = versions.iter().find(|v| v.version_number == 1).unwrap();
    let snapshot = VersionSnapshotRepo::find_for_block(&pool, block_id, v1.id)
        .await
        .unwrap()
        .unwrap();
    let block = BlockRepo::stage_draft(&pool, block_id, &snapshot.content)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(block.content_draft, json!({ "type": "text", "value": "old" }));
    assert_eq!(
        block.content_published,
        Some(json!({ "type": "text", "value": "new" }))
    );

    // Publishing afterwards makes the reverted draft live as version 3.
    let (block, snapshot) = BlockRepo::publish(&pool, block_id).await.unwrap().unwrap();
    assert_eq!(snapshot.version_number, 3);
    assert_eq!(
        block.content_published,
        Some(json!({ "type": "text", "value": "old" }))
    );
}

#[sqlx::test]
async fn test_snapshot_lookup_is_scoped_to_block(pool: PgPool) {
    let page_id = setup_page(&pool, "home").await;
    let first = setup_text_block(&pool, page_id, "hero_title", "a").await;
    let second = setup_text_block(&pool, page_id, "hero_subtitle", "b").await;

    let (_, snapshot) = BlockRepo::publish(&pool, first).await.unwrap().unwrap();

    // The snapshot belongs to `first`; looking it up via `second` misses.
    let cross = VersionSnapshotRepo::find_for_block(&pool, second, snapshot.id)
        .await
        .unwrap();
    assert!(cross.is_none());
}
