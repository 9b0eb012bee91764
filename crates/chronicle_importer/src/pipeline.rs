//! Message delivery through per-author proxy identities.

use crate::Importer;
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use chronicle_interface::{
    AttachmentSource, ImportPlatform, OutgoingMessage, ProxyIdentity, ProxyProfile,
};
use tracing::{debug, info, instrument};

impl<P: ImportPlatform> Importer<P> {
    /// Replay one message as `tag` into `channel_id`.
    ///
    /// See [`Importer::post_with_attachments`].
    pub async fn post(&mut self, channel_id: &str, tag: &str, message: &str) -> ChronicleResult<()> {
        self.post_with_attachments(channel_id, tag, message, Vec::new())
            .await
    }

    /// Replay one message with file attachments as `tag` into `channel_id`.
    ///
    /// Steps run strictly in order and any failure aborts the call:
    /// 1. the author must be registered
    /// 2. the channel must be in the snapshot and be a text channel
    /// 3. the first post for a (channel, author) pair provisions a proxy
    ///    identity and saves its handle before anything is sent
    /// 4. the live proxy is taken from the cache or fetched by handle
    /// 5. the message is sent, without retrying
    /// 6. the call sleeps for the configured throttle
    ///
    /// # Errors
    ///
    /// - `ImportErrorKind::UnknownAuthor` / `ImportErrorKind::UnknownChannel`
    /// - `ImportErrorKind::WrongChannelKind` for non-text channels
    /// - `ImportErrorKind::Transport` for platform failures, unmodified
    #[instrument(
        skip(self, message, attachments),
        fields(len = message.len(), attachments = attachments.len(), handle)
    )]
    pub async fn post_with_attachments(
        &mut self,
        channel_id: &str,
        tag: &str,
        message: &str,
        attachments: Vec<AttachmentSource>,
    ) -> ChronicleResult<()> {
        let author = self
            .store
            .state()
            .author(tag)
            .cloned()
            .ok_or_else(|| ImportError::new(ImportErrorKind::UnknownAuthor(tag.to_string())))?;

        let channel = self.channel(channel_id).ok_or_else(|| {
            ImportError::new(ImportErrorKind::UnknownChannel(channel_id.to_string()))
        })?;
        if !channel.kind().accepts_proxy_messages() {
            return Err(ImportError::new(ImportErrorKind::WrongChannelKind {
                channel_id: channel_id.to_string(),
                kind: channel.kind().to_string(),
            })
            .into());
        }

        let handle = match self.store.state().proxy_handle(channel_id, tag) {
            Some(handle) => handle.to_string(),
            None => {
                info!("Creating proxy identity in channel {} for user {}", channel_id, tag);
                let profile = ProxyProfile::new(author.name().clone(), author.avatar().clone());
                let proxy = self.platform.create_proxy(channel_id, &profile).await?;
                let created = proxy.handle();
                let handle = self.store.record_proxy_handle(channel_id, tag, &created)?;
                if handle == created {
                    self.proxies.insert(handle.clone(), proxy);
                }
                handle
            }
        };
        tracing::Span::current().record("handle", handle.as_str());

        let platform = &self.platform;
        let proxy = self
            .proxies
            .get_or_fetch(&handle, || platform.fetch_proxy(&handle))
            .await?;

        let outgoing = OutgoingMessage::new(message, attachments);
        self.platform.send(&proxy, &outgoing).await?;
        debug!(throttle_ms = self.throttle.as_millis() as u64, "Sent, pausing");

        tokio::time::sleep(self.throttle).await;
        Ok(())
    }
}
