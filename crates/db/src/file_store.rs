//! File-backed page store.
//!
//! The whole collection lives in one pretty-printed JSON array. Every call
//! reads the file; every mutation rewrites it. Read-modify-write cycles run
//! under a store-wide async mutex, and each rewrite goes to a temp file that
//! is renamed over the original, so readers never observe a partial file.
//!
//! The mutex only serializes writers inside this process. Two processes
//! sharing one file can still lose updates.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use wikimasters_core::pages::{bump_timestamp, matches_query, next_page_id};
use wikimasters_core::types::DbId;

use crate::models::page::{CreatePage, Page, UpdatePage};
use crate::seed::seed_pages;
use crate::store::{PageStore, StoreError, StoreResult};

/// Default location of the page file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = ".data/pages.json";

pub struct FilePageStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FilePageStore {
    /// Open the store at `path`, creating the parent directory and writing the
    /// seed pages if the file does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let store = Self::unseeded(path).await?;
        if !tokio::fs::try_exists(&store.path)
            .await
            .map_err(|e| io_error(&store.path, e))?
        {
            store.save(&seed_pages()).await?;
            tracing::info!(path = %store.path.display(), "Initialized page file with seed data");
        }
        Ok(store)
    }

    /// Open the store at `path` with exactly `pages`, replacing any existing file.
    pub async fn with_pages(path: impl Into<PathBuf>, pages: &[Page]) -> StoreResult<Self> {
        let store = Self::unseeded(path).await?;
        store.save(pages).await?;
        Ok(store)
    }

    async fn unseeded(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| io_error(dir, e))?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole collection. A missing file is re-seeded.
    async fn load(&self) -> StoreResult<Vec<Page>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                let mut pages: Vec<Page> = serde_json::from_str(&raw)?;
                pages.sort_by_key(|p| p.id);
                Ok(pages)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %self.path.display(), "Page file missing, re-seeding");
                let pages = seed_pages();
                self.save(&pages).await?;
                Ok(pages)
            }
            Err(e) => Err(io_error(&self.path, e)),
        }
    }

    /// Rewrite the whole collection via temp file + rename.
    async fn save(&self, pages: &[Page]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(pages)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl PageStore for FilePageStore {
    async fn list(&self) -> StoreResult<Vec<Page>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get_by_id(&self, id: DbId) -> StoreResult<Option<Page>> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().find(|p| p.id == id))
    }

    async fn create(&self, input: CreatePage) -> StoreResult<Page> {
        let _guard = self.lock.lock().await;
        let mut pages = self.load().await?;

        let now = Utc::now();
        let page = Page {
            id: next_page_id(pages.iter().map(|p| p.id)),
            title: input.title,
            content: input.content,
            author_id: input.author_id,
            author_name: input.author_name,
            created_at: now,
            updated_at: now,
        };
        pages.push(page.clone());
        self.save(&pages).await?;

        tracing::info!(page_id = page.id, title = %page.title, "Created page");
        Ok(page)
    }

    async fn update(&self, id: DbId, input: UpdatePage) -> StoreResult<Option<Page>> {
        let _guard = self.lock.lock().await;
        let mut pages = self.load().await?;

        let Some(page) = pages.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        input.apply_to(page);
        page.updated_at = bump_timestamp(page.updated_at, Utc::now());
        let updated = page.clone();

        self.save(&pages).await?;

        tracing::info!(page_id = id, title = %updated.title, "Updated page");
        Ok(Some(updated))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;
        let mut pages = self.load().await?;

        let Some(index) = pages.iter().position(|p| p.id == id) else {
            return Ok(false);
        };
        let removed = pages.remove(index);
        self.save(&pages).await?;

        tracing::info!(page_id = id, title = %removed.title, "Deleted page");
        Ok(true)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Page>> {
        let _guard = self.lock.lock().await;
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter(|p| matches_query(&p.title, &p.content, query))
            .collect())
    }

    async fn health_check(&self) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        self.load().await.map(|_| ())
    }
}
