//! Serenity-backed [`ImportPlatform`].

use super::conversions::{channel_kind, is_not_found, parse_id, transport};
use async_trait::async_trait;
use chronicle_error::ChronicleResult;
use chronicle_interface::{
    AttachmentSource, ChannelInfo, GuildInfo, ImportPlatform, OutgoingMessage, ProxyIdentity,
    ProxyProfile, SessionInfo,
};
use serenity::all::{
    ChannelId, ChannelType, CreateAttachment, CreateChannel, ExecuteWebhook, GuildId, Webhook,
    WebhookId,
};
use serenity::http::Http;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A Discord webhook acting as a proxy identity.
#[derive(Debug, Clone)]
pub struct DiscordProxy(Webhook);

impl DiscordProxy {
    /// The underlying webhook.
    pub fn webhook(&self) -> &Webhook {
        &self.0
    }
}

impl ProxyIdentity for DiscordProxy {
    fn handle(&self) -> String {
        self.0.id.to_string()
    }
}

/// Discord access over serenity's HTTP client.
///
/// Only REST calls are needed for an import, so no gateway connection is
/// opened; [`ImportPlatform::connect`] validates the token instead.
pub struct DiscordPlatform {
    http: Arc<Http>,
}

impl DiscordPlatform {
    /// Create a platform with a bot token.
    #[instrument(skip(token), fields(token_len = token.as_ref().len()))]
    pub fn new(token: impl AsRef<str>) -> Self {
        info!("Creating Discord HTTP client");
        Self {
            http: Arc::new(Http::new(token.as_ref())),
        }
    }

    /// Create a platform sharing an existing HTTP client.
    ///
    /// Sharing the client shares serenity's route-level rate limiting.
    pub fn with_http_client(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// The serenity HTTP client.
    pub fn http(&self) -> &Arc<Http> {
        &self.http
    }

    async fn attachment(&self, source: &AttachmentSource) -> ChronicleResult<CreateAttachment> {
        match source {
            AttachmentSource::Path(path) => CreateAttachment::path(path).await.map_err(transport),
            AttachmentSource::Url(url) => CreateAttachment::url(&*self.http, url)
                .await
                .map_err(transport),
        }
    }
}

#[async_trait]
impl ImportPlatform for DiscordPlatform {
    type Proxy = DiscordProxy;

    #[instrument(skip(self))]
    async fn connect(&self) -> ChronicleResult<SessionInfo> {
        let user = self.http.get_current_user().await.map_err(transport)?;
        info!(bot_user = %user.name, bot_id = %user.id, "Authenticated with Discord");
        Ok(SessionInfo::new(user.id.to_string(), user.name.clone()))
    }

    #[instrument(skip(self))]
    async fn guild(&self, guild_id: &str) -> ChronicleResult<Option<GuildInfo>> {
        let id = GuildId::new(parse_id(guild_id)?);
        match self.http.get_guild(id).await {
            Ok(guild) => Ok(Some(GuildInfo::new(guild.id.to_string(), guild.name))),
            Err(e) if is_not_found(&e) => {
                debug!(error = %e, "Guild not visible to this bot");
                Ok(None)
            }
            Err(e) => Err(transport(e)),
        }
    }

    #[instrument(skip(self))]
    async fn channels(&self, guild_id: &str) -> ChronicleResult<Vec<ChannelInfo>> {
        let id = GuildId::new(parse_id(guild_id)?);
        let channels = self.http.get_channels(id).await.map_err(transport)?;
        Ok(channels
            .into_iter()
            .map(|c| ChannelInfo::new(c.id.to_string(), c.name, channel_kind(c.kind)))
            .collect())
    }

    #[instrument(skip(self))]
    async fn create_text_channel(
        &self,
        guild_id: &str,
        name: &str,
    ) -> ChronicleResult<ChannelInfo> {
        let id = GuildId::new(parse_id(guild_id)?);
        let builder = CreateChannel::new(name).kind(ChannelType::Text);
        let channel = id
            .create_channel(&*self.http, builder)
            .await
            .map_err(transport)?;
        Ok(ChannelInfo::new(
            channel.id.to_string(),
            channel.name,
            channel_kind(channel.kind),
        ))
    }

    #[instrument(skip(self, profile), fields(name = %profile.name()))]
    async fn create_proxy(
        &self,
        channel_id: &str,
        profile: &ProxyProfile,
    ) -> ChronicleResult<DiscordProxy> {
        let id = ChannelId::new(parse_id(channel_id)?);
        // The avatar is already a data URI, which is what the API expects.
        let body = serde_json::json!({
            "name": profile.name(),
            "avatar": profile.avatar(),
        });
        let webhook = self
            .http
            .create_webhook(id, &body, None)
            .await
            .map_err(transport)?;
        debug!(webhook_id = %webhook.id, "Created webhook");
        Ok(DiscordProxy(webhook))
    }

    #[instrument(skip(self))]
    async fn fetch_proxy(&self, handle: &str) -> ChronicleResult<DiscordProxy> {
        let id = WebhookId::new(parse_id(handle)?);
        let webhook = self.http.get_webhook(id).await.map_err(transport)?;
        Ok(DiscordProxy(webhook))
    }

    #[instrument(
        skip(self, proxy, message),
        fields(webhook_id = %proxy.0.id, attachments = message.attachments().len())
    )]
    async fn send(&self, proxy: &DiscordProxy, message: &OutgoingMessage) -> ChronicleResult<()> {
        let mut files = Vec::with_capacity(message.attachments().len());
        for source in message.attachments() {
            files.push(self.attachment(source).await?);
        }

        let mut builder = ExecuteWebhook::new().add_files(files);
        if !message.content().is_empty() {
            builder = builder.content(message.content());
        }

        proxy
            .0
            .execute(&*self.http, true, builder)
            .await
            .map_err(transport)?;
        Ok(())
    }

    fn platform_name(&self) -> &'static str {
        "discord"
    }
}
