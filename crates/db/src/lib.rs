//! Persistence for wiki pages.
//!
//! - [`users::UserDirectory`] -- the fixed, in-memory user list.
//! - [`store::PageStore`] -- the async storage seam used by the HTTP layer.
//! - [`file_store`], [`pg_store`], [`cache`] -- its implementations.

use sqlx::postgres::PgPoolOptions;

pub mod cache;
pub mod file_store;
pub mod models;
pub mod pg_store;
pub mod seed;
pub mod store;
pub mod users;

pub use cache::CachedPageStore;
pub use file_store::FilePageStore;
pub use pg_store::PgPageStore;
pub use store::{PageStore, SharedPageStore, StoreError, StoreResult};
pub use users::UserDirectory;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> StoreResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the SQL migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> StoreResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
