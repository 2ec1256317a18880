//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod block_repo;
pub mod page_repo;
pub mod preview_token_repo;
pub mod seo_page_repo;
pub mod version_snapshot_repo;

pub use block_repo::BlockRepo;
pub use page_repo::PageRepo;
pub use preview_token_repo::PreviewTokenRepo;
pub use seo_page_repo::SeoPageRepo;
pub use version_snapshot_repo::VersionSnapshotRepo;
