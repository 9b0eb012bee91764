//! Platform abstraction for Chronicle.
//!
//! The importer never talks to a chat platform directly. It drives an
//! [`ImportPlatform`], which provides the few capabilities a replay needs:
//! session readiness, guild and channel lookup, channel creation, and
//! provisioning, fetching and sending through proxy identities.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{ImportPlatform, ProxyIdentity};
pub use types::{
    AttachmentSource, ChannelInfo, ChannelKind, GuildInfo, OutgoingMessage, ProxyProfile,
    SessionInfo,
};
