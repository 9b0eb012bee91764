//! Replay captured chat logs into a guild.
//!
//! Each historical message is sent through a proxy identity carrying its
//! original author's name and avatar. Proxies are provisioned lazily, once per
//! (channel, author) pair, and their handles persisted so later runs reuse them.
//!
//! # Workflow
//!
//! 1. [`Importer::init`] binds to one guild and loads (or starts) the state file.
//! 2. [`Importer::add_user`] registers every external author.
//! 3. [`Importer::find_or_create_channel_named`] resolves destination channels.
//! 4. [`Importer::post`] replays messages one at a time, pausing after each send.
//!
//! # Platform Support
//!
//! The importer is generic over [`ImportPlatform`]. The Discord implementation,
//! built on serenity webhooks, lives in the `discord` module (requires the
//! `discord` feature).
//!
//! ```rust,ignore
//! use chronicle_importer::discord;
//!
//! let mut importer = discord::init(&token, "123456789", "state.json", 3000).await?;
//! importer.add_user("alice#1", "Alice", None).await?;
//! let channel = importer.find_or_create_channel_named("general-archive").await?;
//! importer.post(&channel, "alice#1", "hello world").await?;
//! ```

#![warn(missing_docs)]

mod avatar;
mod channels;
mod config;
mod importer;
mod pipeline;
mod registrar;

#[cfg(feature = "discord")]
pub mod discord;

pub use avatar::{ImageFormat, inspect_image, resolve_avatar};
pub use channels::validate_channel_name;
pub use config::ImporterConfig;
pub use importer::Importer;

pub use chronicle_interface::{
    AttachmentSource, ChannelInfo, ChannelKind, GuildInfo, ImportPlatform, OutgoingMessage,
    ProxyIdentity, ProxyProfile, SessionInfo,
};
