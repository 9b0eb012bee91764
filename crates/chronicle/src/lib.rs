//! Chronicle - replay captured chat logs into a guild.
//!
//! Chronicle takes historical messages from an external log and posts each one
//! as if its original author had sent it, using a per-author proxy identity
//! (a Discord webhook) in every destination channel.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chronicle::{ImporterConfig, discord, init_logging};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging()?;
//!
//!     let config = ImporterConfig::load()?;
//!     let mut importer = discord::init_from_config(&config).await?;
//!
//!     importer.add_user("alice#1", "Alice", Some("avatars/alice.png")).await?;
//!     let channel = importer.find_or_create_channel_named("irc-archive").await?;
//!     importer.post(&channel, "alice#1", "hello world").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `discord` - Discord support through serenity
//!
//! # Architecture
//!
//! - `chronicle_error` - Error types
//! - `chronicle_interface` - `ImportPlatform` trait and domain types
//! - `chronicle_state` - Persisted author and proxy-handle state
//! - `chronicle_cache` - Live proxy cache
//! - `chronicle_importer` - Registration, channel resolution and delivery
//!
//! This crate re-exports everything for convenience.

mod observability;

pub use chronicle_cache::{ProxyCache, ProxyCacheConfig, ProxyCacheConfigBuilder};
pub use chronicle_error::*;
pub use chronicle_importer::{
    ImageFormat, Importer, ImporterConfig, resolve_avatar, validate_channel_name,
};
pub use chronicle_interface::*;
pub use chronicle_state::{AuthorRecord, ImportState, StateStore};

#[cfg(feature = "discord")]
pub use chronicle_importer::discord;

pub use observability::{LoggingConfig, init_logging, init_logging_with_config};
