//! Channel lookup and creation.

use crate::Importer;
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use chronicle_interface::{ChannelInfo, ImportPlatform};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info, instrument};

// Stricter than the platform itself: ASCII letters, hyphen and underscore only.
static CHANNEL_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_-]{1,100}$").expect("Valid channel name regex"));

/// Check a channel name against the naming policy.
///
/// Names must be 1 to 100 characters of ASCII letters, `-` and `_`.
///
/// ```
/// use chronicle_importer::validate_channel_name;
///
/// assert!(validate_channel_name("valid-name").is_ok());
/// assert!(validate_channel_name("bad name!").is_err());
/// ```
#[track_caller]
pub fn validate_channel_name(name: &str) -> ChronicleResult<()> {
    if CHANNEL_NAME.is_match(name) {
        Ok(())
    } else {
        Err(ImportError::new(ImportErrorKind::InvalidChannelName(name.to_string())).into())
    }
}

impl<P: ImportPlatform> Importer<P> {
    /// Id of the first channel in the snapshot named exactly `name`.
    pub fn find_channel_named(&self, name: &str) -> Option<String> {
        self.channels
            .iter()
            .find(|c| c.name() == name)
            .map(|c| c.id().clone())
    }

    /// A channel from the snapshot by id.
    pub fn channel(&self, channel_id: &str) -> Option<&ChannelInfo> {
        self.channels.iter().find(|c| c.id() == channel_id)
    }

    /// Id of the channel named `name`, creating a text channel if none exists.
    ///
    /// # Errors
    ///
    /// `ImportErrorKind::InvalidChannelName` before any platform call when the
    /// name fails [`validate_channel_name`].
    #[instrument(skip(self), fields(guild_id = %self.guild.id()))]
    pub async fn find_or_create_channel_named(&mut self, name: &str) -> ChronicleResult<String> {
        validate_channel_name(name)?;

        if let Some(existing) = self.find_channel_named(name) {
            debug!(channel_id = %existing, "Channel already exists");
            return Ok(existing);
        }

        let channel = self
            .platform
            .create_text_channel(self.guild.id(), name)
            .await?;
        info!(channel_id = %channel.id(), "Created channel");

        let id = channel.id().clone();
        self.channels.push(channel);
        Ok(id)
    }

    /// Re-read the guild's channel list into the snapshot.
    #[instrument(skip(self), fields(guild_id = %self.guild.id()))]
    pub async fn refresh_channels(&mut self) -> ChronicleResult<()> {
        self.channels = self.platform.channels(self.guild.id()).await?;
        debug!(channels = self.channels.len(), "Refreshed channel snapshot");
        Ok(())
    }
}
