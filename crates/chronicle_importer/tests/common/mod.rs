//! In-memory platform used by the importer tests.
//!
//! Clones share one simulated remote guild, so a second importer built from a
//! clone behaves like a later process run against the same server.

#![allow(dead_code)]

use async_trait::async_trait;
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use chronicle_importer::{
    ChannelInfo, ChannelKind, GuildInfo, ImportPlatform, OutgoingMessage, ProxyIdentity,
    ProxyProfile, SessionInfo,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

pub const GUILD_ID: &str = "1000";
pub const GENERAL: &str = "10";
pub const LOUNGE_VOICE: &str = "11";
pub const ANNOUNCEMENTS: &str = "12";
pub const THROTTLE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProxy {
    pub handle: String,
    pub channel_id: String,
}

impl ProxyIdentity for MockProxy {
    fn handle(&self) -> String {
        self.handle.clone()
    }
}

/// Everything the importer asked the platform to do.
#[derive(Debug, Default)]
pub struct MockLog {
    pub connects: usize,
    pub channel_listings: usize,
    pub created_channels: Vec<String>,
    pub created_proxies: Vec<(String, ProxyProfile)>,
    pub fetched_proxies: Vec<String>,
    pub sent: Vec<(MockProxy, OutgoingMessage)>,
}

impl MockLog {
    /// Calls made after initialization.
    pub fn remote_calls(&self) -> usize {
        self.created_channels.len()
            + self.created_proxies.len()
            + self.fetched_proxies.len()
            + self.sent.len()
    }
}

#[derive(Debug, Default)]
struct Remote {
    channels: Vec<ChannelInfo>,
    proxies: HashMap<String, MockProxy>,
    next_id: u64,
    fail_sends: bool,
}

#[derive(Debug, Clone)]
pub struct MockPlatform {
    guild: Option<GuildInfo>,
    remote: Arc<Mutex<Remote>>,
    log: Arc<Mutex<MockLog>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        let remote = Remote {
            channels: vec![
                ChannelInfo::new(GENERAL, "general", ChannelKind::Text),
                ChannelInfo::new(LOUNGE_VOICE, "lounge", ChannelKind::Voice),
                ChannelInfo::new(ANNOUNCEMENTS, "announcements", ChannelKind::Announcement),
            ],
            proxies: HashMap::new(),
            next_id: 5000,
            fail_sends: false,
        };
        Self {
            guild: Some(GuildInfo::new(GUILD_ID, "Archive")),
            remote: Arc::new(Mutex::new(remote)),
            log: Arc::new(Mutex::new(MockLog::default())),
        }
    }

    /// A platform whose session cannot see any guild.
    pub fn without_guild() -> Self {
        Self {
            guild: None,
            ..Self::new()
        }
    }

    pub fn log(&self) -> MutexGuard<'_, MockLog> {
        self.log.lock().unwrap()
    }

    /// Simulate a channel created by someone else after the snapshot was taken.
    pub fn add_remote_channel(&self, id: &str, name: &str, kind: ChannelKind) {
        self.remote
            .lock()
            .unwrap()
            .channels
            .push(ChannelInfo::new(id, name, kind));
    }

    /// Make every subsequent send fail.
    pub fn fail_sends(&self) {
        self.remote.lock().unwrap().fail_sends = true;
    }

    /// Forget all webhooks, as if they were deleted on the server.
    pub fn forget_proxies(&self) {
        self.remote.lock().unwrap().proxies.clear();
    }

    fn next_id(&self) -> String {
        let mut remote = self.remote.lock().unwrap();
        remote.next_id += 1;
        remote.next_id.to_string()
    }
}

#[track_caller]
fn transport(message: &str) -> chronicle_error::ChronicleError {
    ImportError::new(ImportErrorKind::Transport(message.to_string())).into()
}

#[async_trait]
impl ImportPlatform for MockPlatform {
    type Proxy = MockProxy;

    async fn connect(&self) -> ChronicleResult<SessionInfo> {
        self.log().connects += 1;
        Ok(SessionInfo::new("1", "chronicle-bot"))
    }

    async fn guild(&self, guild_id: &str) -> ChronicleResult<Option<GuildInfo>> {
        Ok(self.guild.clone().filter(|g| g.id() == guild_id))
    }

    async fn channels(&self, _guild_id: &str) -> ChronicleResult<Vec<ChannelInfo>> {
        self.log().channel_listings += 1;
        Ok(self.remote.lock().unwrap().channels.clone())
    }

    async fn create_text_channel(
        &self,
        _guild_id: &str,
        name: &str,
    ) -> ChronicleResult<ChannelInfo> {
        let channel = ChannelInfo::new(self.next_id(), name, ChannelKind::Text);
        self.remote.lock().unwrap().channels.push(channel.clone());
        self.log().created_channels.push(name.to_string());
        Ok(channel)
    }

    async fn create_proxy(
        &self,
        channel_id: &str,
        profile: &ProxyProfile,
    ) -> ChronicleResult<MockProxy> {
        let proxy = MockProxy {
            handle: self.next_id(),
            channel_id: channel_id.to_string(),
        };
        self.remote
            .lock()
            .unwrap()
            .proxies
            .insert(proxy.handle.clone(), proxy.clone());
        self.log()
            .created_proxies
            .push((channel_id.to_string(), profile.clone()));
        Ok(proxy)
    }

    async fn fetch_proxy(&self, handle: &str) -> ChronicleResult<MockProxy> {
        self.log().fetched_proxies.push(handle.to_string());
        self.remote
            .lock()
            .unwrap()
            .proxies
            .get(handle)
            .cloned()
            .ok_or_else(|| transport("Unknown Webhook"))
    }

    async fn send(&self, proxy: &MockProxy, message: &OutgoingMessage) -> ChronicleResult<()> {
        if self.remote.lock().unwrap().fail_sends {
            return Err(transport("503 Service Unavailable"));
        }
        self.log().sent.push((proxy.clone(), message.clone()));
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "mock"
    }
}
