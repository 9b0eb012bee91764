//! The importer handle and its initialization.

use crate::ImporterConfig;
use chronicle_cache::{ProxyCache, ProxyCacheConfig};
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use chronicle_interface::{ChannelInfo, GuildInfo, ImportPlatform, SessionInfo};
use chronicle_state::StateStore;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// An import bound to one guild.
///
/// Mutating operations take `&mut self`, so one importer performs one action
/// at a time and a (channel, author) pair can never be provisioned twice
/// through it. Independent importers must not share a state file.
pub struct Importer<P: ImportPlatform> {
    pub(crate) platform: P,
    pub(crate) session: SessionInfo,
    pub(crate) guild: GuildInfo,
    pub(crate) channels: Vec<ChannelInfo>,
    pub(crate) store: StateStore,
    pub(crate) proxies: ProxyCache<P::Proxy>,
    pub(crate) http: reqwest::Client,
    pub(crate) throttle: Duration,
}

impl<P: ImportPlatform> Importer<P> {
    /// Bind an importer to a guild.
    ///
    /// Loads the state file (or starts a fresh one), connects the platform
    /// session, resolves the guild and snapshots its channels.
    ///
    /// # Errors
    ///
    /// - `ImportErrorKind::ConfigMismatch` if the state file belongs to another guild
    /// - `ImportErrorKind::GuildNotFound` if the session cannot see the guild
    /// - `ImportErrorKind::Transport` for platform failures
    #[instrument(
        skip(platform, state_path),
        fields(
            platform = platform.platform_name(),
            state_path = %state_path.as_ref().display(),
            throttle_ms = throttle.as_millis() as u64
        )
    )]
    pub async fn init(
        platform: P,
        guild_id: &str,
        state_path: impl AsRef<Path>,
        throttle: Duration,
    ) -> ChronicleResult<Self> {
        let store = StateStore::open(state_path, guild_id)?;

        let session = platform.connect().await?;
        info!(session = %session.name(), "Platform session ready");

        let guild = platform
            .guild(guild_id)
            .await?
            .ok_or_else(|| ImportError::new(ImportErrorKind::GuildNotFound(guild_id.to_string())))?;

        let channels = platform.channels(guild.id()).await?;
        debug!(channels = channels.len(), "Loaded channel snapshot");

        info!(
            guild = %guild.name(),
            users = store.state().users().len(),
            proxies = store.state().proxy_count(),
            "Importer ready"
        );

        Ok(Self {
            platform,
            session,
            guild,
            channels,
            store,
            proxies: ProxyCache::default(),
            http: reqwest::Client::new(),
            throttle,
        })
    }

    /// Bind an importer using an [`ImporterConfig`].
    pub async fn from_config(platform: P, config: &ImporterConfig) -> ChronicleResult<Self> {
        let importer = Self::init(
            platform,
            config.guild_id(),
            config.state_path(),
            config.throttle(),
        )
        .await?;
        Ok(importer.with_proxy_cache(config.proxy_cache()))
    }

    /// Replace the proxy cache with one using the given settings.
    pub fn with_proxy_cache(mut self, config: ProxyCacheConfig) -> Self {
        self.proxies = ProxyCache::new(config);
        self
    }

    /// Use a specific HTTP client for avatar downloads.
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// The underlying platform, for operations the importer does not cover.
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// The identity the platform session is authenticated as.
    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    /// The guild this importer is bound to.
    pub fn guild(&self) -> &GuildInfo {
        &self.guild
    }

    /// The persisted state.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// The local channel snapshot.
    pub fn channels(&self) -> &[ChannelInfo] {
        &self.channels
    }

    /// The pause applied after every send.
    pub fn throttle(&self) -> Duration {
        self.throttle
    }
}
