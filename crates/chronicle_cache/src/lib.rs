//! Live proxy identity cache.
//!
//! Persisted state only stores proxy handles. Sending needs the live proxy
//! object, which this crate keeps per process run and fetches on a miss.
//! Dropping the cache never loses information.

#![warn(missing_docs)]

mod cache;

pub use cache::{ProxyCache, ProxyCacheConfig, ProxyCacheConfigBuilder};
