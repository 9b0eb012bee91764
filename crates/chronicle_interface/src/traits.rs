//! Trait definitions for chat platforms that can host an import.

use crate::{ChannelInfo, GuildInfo, OutgoingMessage, ProxyProfile, SessionInfo};
use async_trait::async_trait;
use chronicle_error::ChronicleResult;

/// A live proxy identity the platform can send through.
pub trait ProxyIdentity {
    /// The opaque handle the platform assigned when the proxy was provisioned.
    fn handle(&self) -> String;
}

/// Capabilities the importer needs from a chat platform.
///
/// Implementations pass platform and network failures through as
/// `ImportErrorKind::Transport` without retrying.
#[async_trait]
pub trait ImportPlatform: Send + Sync {
    /// Live proxy object returned by provisioning and fetching.
    type Proxy: ProxyIdentity + Clone + Send + Sync;

    /// Establish the session and wait until it is ready for requests.
    async fn connect(&self) -> ChronicleResult<SessionInfo>;

    /// Look up a guild accessible to the session. `None` when it is absent.
    async fn guild(&self, guild_id: &str) -> ChronicleResult<Option<GuildInfo>>;

    /// List the guild's channels.
    async fn channels(&self, guild_id: &str) -> ChronicleResult<Vec<ChannelInfo>>;

    /// Create a text channel in the guild.
    async fn create_text_channel(&self, guild_id: &str, name: &str)
    -> ChronicleResult<ChannelInfo>;

    /// Provision a new proxy identity scoped to one channel.
    async fn create_proxy(
        &self,
        channel_id: &str,
        profile: &ProxyProfile,
    ) -> ChronicleResult<Self::Proxy>;

    /// Fetch a previously provisioned proxy identity by handle.
    async fn fetch_proxy(&self, handle: &str) -> ChronicleResult<Self::Proxy>;

    /// Send a message through a proxy identity.
    async fn send(&self, proxy: &Self::Proxy, message: &OutgoingMessage) -> ChronicleResult<()>;

    /// Platform name for logging (e.g., "discord").
    fn platform_name(&self) -> &'static str;
}
