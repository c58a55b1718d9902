use std::sync::Arc;

use wikimasters_db::{
    CachedPageStore, FilePageStore, PgPageStore, SharedPageStore, StoreResult, UserDirectory,
};

use crate::config::{ServerConfig, StorageBackend};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup. Cheap to clone: everything inside is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Page persistence (file, database, or cached database).
    pub store: SharedPageStore,
    /// The fixed user directory sessions resolve against.
    pub users: Arc<UserDirectory>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: SharedPageStore, users: UserDirectory, config: ServerConfig) -> Self {
        Self {
            store,
            users: Arc::new(users),
            config: Arc::new(config),
        }
    }

    /// Open the configured page store and seed the user directory.
    pub async fn from_config(config: ServerConfig) -> StoreResult<Self> {
        let store = open_store(&config).await?;
        Ok(Self::new(store, UserDirectory::seeded(), config))
    }
}

/// Open the page store selected by `config.storage`.
///
/// The database backend is wrapped in the page-list cache unless the TTL is
/// disabled. The file backend always reads through to disk.
pub async fn open_store(config: &ServerConfig) -> StoreResult<SharedPageStore> {
    match &config.storage {
        StorageBackend::File { path } => {
            let store = FilePageStore::open(path).await?;
            tracing::info!(path = %store.path().display(), "Using file page store");
            Ok(Arc::new(store))
        }
        StorageBackend::Postgres { database_url } => {
            let pool = wikimasters_db::create_pool(database_url).await?;
            tracing::info!("Database connection pool created");

            wikimasters_db::health_check(&pool).await?;
            wikimasters_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let store = PgPageStore::new(pool);
            match config.cache_ttl {
                Some(ttl) => {
                    tracing::info!(ttl_secs = ttl.as_secs(), "Using cached database page store");
                    Ok(Arc::new(CachedPageStore::new(store, ttl)))
                }
                None => {
                    tracing::info!("Using database page store");
                    Ok(Arc::new(store))
                }
            }
        }
    }
}
