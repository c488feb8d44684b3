//! Rendered-response cache for public reads, and the revalidation that
//! content writes trigger.

use moka::sync::Cache;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::http::shared_client;

const MAX_ENTRIES: u64 = 2_000;

/// Public GET bodies keyed by the page they render on (`/news`,
/// `/news/open-house`, `/#featured-news`).
#[derive(Clone)]
pub struct PageCache {
    entries: Cache<String, Arc<Value>>,
    /// Bumped by every `revalidate`; a fill that straddles one is dropped.
    generation: Arc<AtomicU64>,
    webhook_url: Option<String>,
}

impl PageCache {
    pub fn new(ttl: Duration, webhook_url: Option<String>) -> Self {
        Self {
            entries: Cache::builder().max_capacity(MAX_ENTRIES).time_to_live(ttl).build(),
            generation: Arc::new(AtomicU64::new(0)),
            webhook_url,
        }
    }

    pub fn get(&self, path: &str) -> Option<Arc<Value>> {
        self.entries.get(path)
    }

    pub fn insert(&self, path: &str, value: Value) -> Arc<Value> {
        let value = Arc::new(value);
        self.entries.insert(path.to_string(), Arc::clone(&value));
        value
    }

    /// Cached value for `path`, computing and storing it on a miss. Errors are
    /// not cached.
    ///
    /// A revalidation that lands while `load` runs may have been triggered by
    /// a write the loaded value predates, so the entry is evicted again and
    /// only this caller sees the loaded value.
    pub fn get_or_try_insert<E>(
        &self,
        path: &str,
        load: impl FnOnce() -> Result<Value, E>,
    ) -> Result<Arc<Value>, E> {
        if let Some(hit) = self.get(path) {
            return Ok(hit);
        }
        let started = self.generation.load(Ordering::SeqCst);
        let value = self.insert(path, load()?);
        // Checked after the insert: a revalidation that bumps later than this
        // also runs its own invalidation after the insert.
        if self.generation.load(Ordering::SeqCst) != started {
            log::debug!("[CACHE] Dropped fill of {} raced by a revalidation", path);
            self.entries.invalidate(path);
        }
        Ok(value)
    }

    /// Drop every cached page at or below each of `paths`, then notify the
    /// frontend hook (fire and forget).
    pub fn revalidate(&self, paths: &[String]) {
        if paths.is_empty() {
            return;
        }
        self.generation.fetch_add(1, Ordering::SeqCst);
        let stale: Vec<Arc<String>> = self
            .entries
            .iter()
            .filter(|(key, _)| paths.iter().any(|p| is_at_or_below(key, p)))
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.entries.invalidate(key.as_str());
        }
        log::debug!("[CACHE] Revalidated {:?} ({} cached page(s) dropped)", paths, stale.len());

        if let Some(url) = self.webhook_url.clone() {
            let body = json!({ "paths": paths });
            // Requires a running tokio runtime; content actions always have one.
            if let Ok(handle) = tokio::runtime::Handle::try_current() {
                handle.spawn(async move {
                    match shared_client().post(&url).json(&body).send().await {
                        Ok(resp) if resp.status().is_success() => {}
                        Ok(resp) => log::warn!("[CACHE] Revalidation hook returned {}", resp.status()),
                        Err(e) => log::warn!("[CACHE] Revalidation hook failed: {}", e),
                    }
                });
            }
        }
    }
}

/// `key` is `path` itself, a query or fragment variant of it (`/news?category=x`,
/// `/#featured-news`), or a page nested under it.
fn is_at_or_below(key: &str, path: &str) -> bool {
    let Some(rest) = key.strip_prefix(path) else {
        return false;
    };
    if rest.is_empty() || rest.starts_with('?') || rest.starts_with('#') {
        return true;
    }
    path != "/" && rest.starts_with('/')
}
