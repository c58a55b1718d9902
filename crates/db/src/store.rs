//! The page store seam.
//!
//! Handlers only see `Arc<dyn PageStore>`. Implementations:
//!
//! - [`crate::file_store::FilePageStore`] -- whole-file JSON persistence.
//! - [`crate::pg_store::PgPageStore`] -- PostgreSQL rows.
//! - [`crate::cache::CachedPageStore`] -- read-through cache over another store.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use wikimasters_core::types::DbId;

use crate::models::page::{CreatePage, Page, UpdatePage};

/// Errors raised by page store implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed page data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD and search over the page collection.
#[async_trait]
pub trait PageStore: Send + Sync {
    /// Every page, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Page>>;

    async fn get_by_id(&self, id: DbId) -> StoreResult<Option<Page>>;

    /// Insert a page. Both timestamps are set to the same instant.
    async fn create(&self, input: CreatePage) -> StoreResult<Page>;

    /// Merge the given fields and bump `updated_at`. `None` if absent.
    async fn update(&self, id: DbId, input: UpdatePage) -> StoreResult<Option<Page>>;

    /// `false` if the page did not exist.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;

    /// Case-insensitive substring match over title or content.
    async fn search(&self, query: &str) -> StoreResult<Vec<Page>>;

    /// Cheap probe used by `/health`.
    async fn health_check(&self) -> StoreResult<()>;
}

/// Shared handle stored in the application state.
pub type SharedPageStore = Arc<dyn PageStore>;
