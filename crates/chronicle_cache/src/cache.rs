//! Proxy cache implementation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;

/// Configuration for the proxy cache.
#[derive(
    Debug, Clone, Serialize, Deserialize, Getters, derive_setters::Setters, derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ProxyCacheConfig {
    /// Maximum number of live proxies kept (`None` for unbounded, `Some(0)` stores nothing)
    #[serde(default)]
    #[builder(default)]
    max_size: Option<usize>,

    /// Whether caching is enabled
    #[serde(default = "default_enabled")]
    #[builder(default = "default_enabled()")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ProxyCacheConfig {
    /// Whether this configuration ever keeps an entry.
    pub fn stores_entries(&self) -> bool {
        self.enabled && self.max_size != Some(0)
    }
}

impl Default for ProxyCacheConfig {
    fn default() -> Self {
        Self {
            max_size: None,
            enabled: default_enabled(),
        }
    }
}

/// Cache of live proxy objects keyed by proxy handle.
///
/// # Example
///
/// ```
/// use chronicle_cache::ProxyCache;
///
/// # tokio_test_block_on(async {
/// let mut cache: ProxyCache<String> = ProxyCache::default();
///
/// let proxy = cache
///     .get_or_fetch("123", || async { Ok::<_, ()>("hook 123".to_string()) })
///     .await
///     .unwrap();
/// assert_eq!(proxy, "hook 123");
/// assert!(cache.contains("123"));
/// # });
/// # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug)]
pub struct ProxyCache<P> {
    config: ProxyCacheConfig,
    entries: HashMap<String, P>,
    access_order: Vec<String>,
}

impl<P: Clone> ProxyCache<P> {
    /// Create a new proxy cache with configuration.
    pub fn new(config: ProxyCacheConfig) -> Self {
        tracing::debug!(
            max_size = ?config.max_size,
            enabled = config.enabled,
            "Creating new ProxyCache"
        );
        Self {
            config,
            entries: HashMap::new(),
            access_order: Vec::new(),
        }
    }

    /// Get a cached proxy.
    pub fn get(&mut self, handle: &str) -> Option<P> {
        if !self.config.stores_entries() {
            return None;
        }

        let proxy = self.entries.get(handle)?.clone();
        self.touch(handle);
        tracing::debug!(handle, "Proxy cache hit");
        Some(proxy)
    }

    /// Insert a live proxy.
    pub fn insert(&mut self, handle: impl Into<String>, proxy: P) {
        if !self.config.stores_entries() {
            tracing::debug!("Cache disabled, skipping insert");
            return;
        }

        let handle = handle.into();
        if let Some(max_size) = self.config.max_size
            && self.entries.len() >= max_size
            && !self.entries.contains_key(&handle)
        {
            self.evict_lru();
        }

        self.touch(&handle);
        self.entries.insert(handle, proxy);
    }

    /// Return the cached proxy for `handle`, or run `fetch` and cache its result.
    ///
    /// A failed fetch leaves the cache unchanged and returns the error as-is.
    pub async fn get_or_fetch<F, Fut, E>(&mut self, handle: &str, fetch: F) -> Result<P, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<P, E>>,
    {
        if let Some(proxy) = self.get(handle) {
            return Ok(proxy);
        }

        tracing::debug!(handle, "Proxy cache miss, fetching");
        let proxy = fetch().await?;
        self.insert(handle, proxy.clone());
        Ok(proxy)
    }

    /// Check whether a handle is cached.
    pub fn contains(&self, handle: &str) -> bool {
        self.entries.contains_key(handle)
    }

    /// Clear all cache entries.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        self.access_order.clear();
        tracing::info!(cleared = count, "Cleared proxy cache");
    }

    /// Get number of cached proxies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn touch(&mut self, handle: &str) {
        if let Some(pos) = self.access_order.iter().position(|h| h == handle) {
            self.access_order.remove(pos);
        }
        self.access_order.push(handle.to_string());
    }

    fn evict_lru(&mut self) {
        if !self.access_order.is_empty() {
            let handle = self.access_order.remove(0);
            tracing::debug!(handle = %handle, "Evicting LRU proxy");
            self.entries.remove(&handle);
        }
    }
}

impl<P: Clone> Default for ProxyCache<P> {
    fn default() -> Self {
        Self::new(ProxyCacheConfig::default())
    }
}
