//! Platform-neutral domain types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The identity the session is authenticated as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct SessionInfo {
    /// Platform id of the authenticated account
    #[new(into)]
    id: String,
    /// Display name of the authenticated account
    #[new(into)]
    name: String,
}

/// A guild (server) the importer is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct GuildInfo {
    /// Guild id
    #[new(into)]
    id: String,
    /// Guild name
    #[new(into)]
    name: String,
}

/// Channel kinds, as far as the importer needs to tell them apart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum ChannelKind {
    /// Text channel; the only kind proxied messages go to
    Text,
    /// Voice channel
    Voice,
    /// Channel category
    Category,
    /// Announcement channel
    Announcement,
    /// Stage channel
    Stage,
    /// Forum channel
    Forum,
    /// Media channel
    Media,
    /// Thread of any flavor
    Thread,
    /// Direct or group message channel
    Private,
    /// Anything else the platform reports
    Other,
}

impl ChannelKind {
    /// Whether proxied text messages can be delivered into this kind.
    pub fn accepts_proxy_messages(self) -> bool {
        self == ChannelKind::Text
    }
}

/// A channel in the guild's snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct ChannelInfo {
    /// Channel id
    #[new(into)]
    id: String,
    /// Channel name
    #[new(into)]
    name: String,
    /// Channel kind
    kind: ChannelKind,
}

/// Name and avatar a proxy identity is provisioned with.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct ProxyProfile {
    /// Display name shown on proxied messages
    #[new(into)]
    name: String,
    /// Avatar as an embeddable data URI
    avatar: Option<String>,
}

/// Where a file attachment comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentSource {
    /// A file on the local filesystem
    Path(PathBuf),
    /// A remote http(s) URL
    Url(String),
}

impl AttachmentSource {
    /// Classify a reference as a URL or a local path.
    ///
    /// ```
    /// use chronicle_interface::AttachmentSource;
    ///
    /// assert!(matches!(AttachmentSource::parse("https://x.test/a.png"), AttachmentSource::Url(_)));
    /// assert!(matches!(AttachmentSource::parse("logs/a.png"), AttachmentSource::Path(_)));
    /// ```
    pub fn parse(reference: &str) -> Self {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            AttachmentSource::Url(reference.to_string())
        } else {
            AttachmentSource::Path(PathBuf::from(reference))
        }
    }
}

impl From<&str> for AttachmentSource {
    fn from(reference: &str) -> Self {
        AttachmentSource::parse(reference)
    }
}

/// A historical message to replay through a proxy identity.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new)]
pub struct OutgoingMessage {
    /// Message text
    #[new(into)]
    content: String,
    /// Files to attach
    attachments: Vec<AttachmentSource>,
}
