//! The state document.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// A registered external author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct AuthorRecord {
    /// Display name for the author's proxy identities
    #[new(into)]
    name: String,
    /// Avatar image as a data URI, or `None` for the platform default
    avatar: Option<String>,
}

/// Everything the importer persists between runs.
///
/// Serialized as `{"guildId": ..., "users": {...}, "channels": {...}}` where
/// `channels` maps channel id to author tag to proxy handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct ImportState {
    guild_id: String,
    #[serde(default)]
    users: BTreeMap<String, AuthorRecord>,
    #[serde(default)]
    channels: BTreeMap<String, BTreeMap<String, String>>,
}

impl ImportState {
    /// Creates an empty state bound to a guild.
    pub fn new(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            users: BTreeMap::new(),
            channels: BTreeMap::new(),
        }
    }

    /// Gets a registered author.
    pub fn author(&self, tag: &str) -> Option<&AuthorRecord> {
        self.users.get(tag)
    }

    /// Checks whether an author tag is registered.
    pub fn contains_author(&self, tag: &str) -> bool {
        self.users.contains_key(tag)
    }

    /// Registers an author.
    ///
    /// Returns `false` and leaves the existing record untouched when the tag
    /// is already registered.
    pub fn insert_author(&mut self, tag: impl Into<String>, record: AuthorRecord) -> bool {
        let tag = tag.into();
        if self.users.contains_key(&tag) {
            return false;
        }
        debug!(tag = %tag, name = %record.name, "Registering author");
        self.users.insert(tag, record);
        true
    }

    /// Gets the proxy handle for an author in a channel.
    pub fn proxy_handle(&self, channel_id: &str, tag: &str) -> Option<&str> {
        self.channels
            .get(channel_id)
            .and_then(|authors| authors.get(tag))
            .map(|s| s.as_str())
    }

    /// Records the proxy handle for an author in a channel.
    ///
    /// A pair is assigned at most once. If a handle is already recorded it is
    /// kept and returned as `Err`.
    pub fn record_proxy_handle(
        &mut self,
        channel_id: impl Into<String>,
        tag: impl Into<String>,
        handle: impl Into<String>,
    ) -> Result<(), String> {
        let authors = self.channels.entry(channel_id.into()).or_default();
        let tag = tag.into();
        if let Some(existing) = authors.get(&tag) {
            return Err(existing.clone());
        }
        let handle = handle.into();
        debug!(tag = %tag, handle = %handle, "Recording proxy handle");
        authors.insert(tag, handle);
        Ok(())
    }

    /// Number of (channel, author) pairs with a proxy handle.
    pub fn proxy_count(&self) -> usize {
        self.channels.values().map(|authors| authors.len()).sum()
    }
}
