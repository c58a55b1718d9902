//! Read-through cache for the page list.
//!
//! [`TtlCache`] is a tiny in-process key-value store with a fixed expiry per
//! entry. [`CachedPageStore`] keeps the full page list under
//! [`PAGES_CACHE_KEY`] and drops it on every successful write. Expired entries
//! are replaced on the next miss; there is no eviction policy and no stampede
//! protection.
//!
//! Every invalidation bumps a generation counter. A miss only stores the value
//! it loaded if no invalidation happened while it was loading, so a snapshot
//! taken before a write can never be cached after that write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use wikimasters_core::types::DbId;

use crate::models::page::{CreatePage, Page, UpdatePage};
use crate::store::{PageStore, StoreResult};

/// Cache key holding the full page list.
pub const PAGES_CACHE_KEY: &str = "articles:all";

/// Expiry applied when none is configured.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

/// String-keyed cache with per-entry expiry.
pub struct TtlCache<V> {
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    generation: AtomicU64,
}

impl<V: Clone> TtlCache<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Current invalidation count. Read it before loading a value to store.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// The live value for `key`, or `None` if absent or expired.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Store `value` only if nothing was invalidated since `seen` was read.
    ///
    /// Returns whether the value was stored.
    pub async fn set_if_generation(&self, key: &str, value: V, ttl: Duration, seen: u64) -> bool {
        let mut entries = self.entries.write().await;
        if self.generation.load(Ordering::Acquire) != seen {
            return false;
        }
        let entry = CacheEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        entries.insert(key.to_string(), entry);
        true
    }

    pub async fn invalidate(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl<V: Clone> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// A [`PageStore`] that serves `list()` from cache.
pub struct CachedPageStore<S> {
    inner: S,
    cache: TtlCache<Vec<Page>>,
    ttl: Duration,
}

impl<S: PageStore> CachedPageStore<S> {
    pub fn new(inner: S, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(),
            ttl,
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn invalidate(&self) {
        self.cache.invalidate(PAGES_CACHE_KEY).await;
        tracing::debug!(key = PAGES_CACHE_KEY, "Cache invalidated");
    }
}

#[async_trait]
impl<S: PageStore> PageStore for CachedPageStore<S> {
    async fn list(&self) -> StoreResult<Vec<Page>> {
        if let Some(pages) = self.cache.get(PAGES_CACHE_KEY).await {
            tracing::debug!(key = PAGES_CACHE_KEY, "Cache hit");
            return Ok(pages);
        }

        tracing::debug!(key = PAGES_CACHE_KEY, "Cache miss");
        let seen = self.cache.generation();
        let pages = self.inner.list().await?;
        let stored = self
            .cache
            .set_if_generation(PAGES_CACHE_KEY, pages.clone(), self.ttl, seen)
            .await;
        if !stored {
            tracing::debug!(key = PAGES_CACHE_KEY, "Skipped caching list loaded before a write");
        }
        Ok(pages)
    }

    async fn get_by_id(&self, id: DbId) -> StoreResult<Option<Page>> {
        self.inner.get_by_id(id).await
    }

    async fn create(&self, input: CreatePage) -> StoreResult<Page> {
        let page = self.inner.create(input).await?;
        self.invalidate().await;
        Ok(page)
    }

    async fn update(&self, id: DbId, input: UpdatePage) -> StoreResult<Option<Page>> {
        let page = self.inner.update(id, input).await?;
        if page.is_some() {
            self.invalidate().await;
        }
        Ok(page)
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        let deleted = self.inner.delete(id).await?;
        if deleted {
            self.invalidate().await;
        }
        Ok(deleted)
    }

    async fn search(&self, query: &str) -> StoreResult<Vec<Page>> {
        self.inner.search(query).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::file_store::FilePageStore;

    /// Counts how often the backing store is asked for the full list.
    struct CountingStore {
        inner: FilePageStore,
        lists: AtomicUsize,
        /// Extra latency after each `list` read.
        list_delay: Duration,
    }

    #[async_trait]
    impl PageStore for CountingStore {
        async fn list(&self) -> StoreResult<Vec<Page>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            let pages = self.inner.list().await?;
            if !self.list_delay.is_zero() {
                tokio::time::sleep(self.list_delay).await;
            }
            Ok(pages)
        }
        async fn get_by_id(&self, id: DbId) -> StoreResult<Option<Page>> {
            self.inner.get_by_id(id).await
        }
        async fn create(&self, input: CreatePage) -> StoreResult<Page> {
            self.inner.create(input).await
        }
        async fn update(&self, id: DbId, input: UpdatePage) -> StoreResult<Option<Page>> {
            self.inner.update(id, input).await
        }
        async fn delete(&self, id: DbId) -> StoreResult<bool> {
            self.inner.delete(id).await
        }
        async fn search(&self, query: &str) -> StoreResult<Vec<Page>> {
            self.inner.search(query).await
        }
        async fn health_check(&self) -> StoreResult<()> {
            self.inner.health_check().await
        }
    }

    async fn cached_store(dir: &tempfile::TempDir, ttl: Duration) -> CachedPageStore<CountingStore> {
        slow_cached_store(dir, ttl, Duration::ZERO).await
    }

    async fn slow_cached_store(
        dir: &tempfile::TempDir,
        ttl: Duration,
        list_delay: Duration,
    ) -> CachedPageStore<CountingStore> {
        let inner = FilePageStore::with_pages(dir.path().join("pages.json"), &[])
            .await
            .unwrap();
        CachedPageStore::new(
            CountingStore {
                inner,
                lists: AtomicUsize::new(0),
                list_delay,
            },
            ttl,
        )
    }

    fn new_page(title: &str) -> CreatePage {
        CreatePage {
            title: title.to_string(),
            content: "body".to_string(),
            author_id: 1,
            author_name: None,
        }
    }

    fn backing_lists(store: &CachedPageStore<CountingStore>) -> usize {
        store.inner().lists.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn ttl_cache_get_set_invalidate() {
        let cache: TtlCache<u32> = TtlCache::new();
        assert_eq!(cache.get("k").await, None);
        let seen = cache.generation();
        cache.set_if_generation("k", 7, Duration::from_secs(60), seen).await;
        assert_eq!(cache.get("k").await, Some(7));
        cache.invalidate("k").await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn ttl_cache_entries_expire() {
        let cache: TtlCache<&str> = TtlCache::new();
        let seen = cache.generation();
        cache.set_if_generation("k", "v", Duration::from_millis(20), seen).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k").await, None);
    }

    #[tokio::test]
    async fn set_is_refused_after_invalidation() {
        let cache: TtlCache<u32> = TtlCache::new();
        let seen = cache.generation();
        cache.invalidate("k").await;
        assert!(!cache.set_if_generation("k", 1, Duration::from_secs(60), seen).await);
        assert_eq!(cache.get("k").await, None);

        let seen = cache.generation();
        assert!(cache.set_if_generation("k", 2, Duration::from_secs(60), seen).await);
        assert_eq!(cache.get("k").await, Some(2));
    }

    #[tokio::test]
    async fn list_loaded_before_a_write_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(
            slow_cached_store(&dir, DEFAULT_CACHE_TTL, Duration::from_millis(100)).await,
        );

        // Miss that reads the empty collection, then stalls.
        let slow = tokio::spawn({
            let store = store.clone();
            async move { store.list().await.unwrap() }
        });
        tokio::time::sleep(Duration::from_millis(30)).await;

        store.create(new_page("Written meanwhile")).await.unwrap();
        assert!(slow.await.unwrap().is_empty());

        let pages = store.list().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Written meanwhile");
    }

    #[tokio::test]
    async fn list_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = cached_store(&dir, DEFAULT_CACHE_TTL).await;

        store.list().await.unwrap();
        store.list().await.unwrap();
        store.list().await.unwrap();
        assert_eq!(backing_lists(&store), 1);
    }

    #[tokio::test]
    async fn writes_invalidate_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let store = cached_store(&dir, DEFAULT_CACHE_TTL).await;

        assert!(store.list().await.unwrap().is_empty());
        let page = store.create(new_page("Fresh")).await.unwrap();

        let pages = store.list().await.unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(backing_lists(&store), 2);

        store
            .update(
                page.id,
                UpdatePage {
                    title: Some("Renamed".into()),
                    content: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap()[0].title, "Renamed");
        assert_eq!(backing_lists(&store), 3);

        store.delete(page.id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(backing_lists(&store), 4);
    }

    #[tokio::test]
    async fn failed_writes_keep_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let store = cached_store(&dir, DEFAULT_CACHE_TTL).await;

        store.list().await.unwrap();
        assert!(!store.delete(12345).await.unwrap());
        assert!(store.update(12345, UpdatePage::default()).await.unwrap().is_none());
        store.list().await.unwrap();
        assert_eq!(backing_lists(&store), 1);
    }

    #[tokio::test]
    async fn expired_list_is_reloaded() {
        let dir = tempfile::tempdir().unwrap();
        let store = cached_store(&dir, Duration::from_millis(20)).await;

        store.list().await.unwrap();
        tokio::time::sleep(Duration::from_millis(60)).await;
        store.list().await.unwrap();
        assert_eq!(backing_lists(&store), 2);
    }
}
