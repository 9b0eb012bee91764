//! Discord support for the importer.
//!
//! Proxy identities are Discord webhooks: one webhook per (channel, author)
//! pair, named and imaged after the author. Webhooks are limited to roughly
//! 30 requests per minute each, which the importer's fixed post-send pause
//! stays under.
//!
//! Available with the `discord` feature.
//!
//! ```rust,ignore
//! use chronicle_importer::discord;
//!
//! let mut importer = discord::init(&token, "123456789012345678", "state.json", 3000).await?;
//! ```

mod conversions;
mod platform;

pub use conversions::{channel_kind, parse_id};
pub use platform::{DiscordPlatform, DiscordProxy};

use crate::{Importer, ImporterConfig};
use chronicle_error::{ChronicleResult, ConfigError, ConfigErrorKind};
use std::path::Path;
use std::time::Duration;
use tracing::instrument;

/// Environment variable read when no token is configured.
pub const TOKEN_ENV: &str = "DISCORD_TOKEN";

/// Connect to Discord with a bot token and bind an importer to a guild.
#[instrument(skip(token, state_path), fields(token_len = token.len()))]
pub async fn init(
    token: &str,
    guild_id: &str,
    state_path: impl AsRef<Path>,
    throttle_ms: u64,
) -> ChronicleResult<Importer<DiscordPlatform>> {
    let platform = DiscordPlatform::new(token);
    Importer::init(
        platform,
        guild_id,
        state_path,
        Duration::from_millis(throttle_ms),
    )
    .await
}

/// Bind a Discord importer from configuration.
///
/// Uses the configured token, falling back to `DISCORD_TOKEN` from the
/// environment or a `.env` file.
#[instrument(skip(config), fields(guild_id = %config.guild_id()))]
pub async fn init_from_config(config: &ImporterConfig) -> ChronicleResult<Importer<DiscordPlatform>> {
    let token = match config.token() {
        Some(token) => token.clone(),
        None => {
            dotenvy::dotenv().ok();
            std::env::var(TOKEN_ENV)
                .map_err(|_| ConfigError::new(ConfigErrorKind::MissingToken(TOKEN_ENV)))?
        }
    };

    Importer::from_config(DiscordPlatform::new(&token), config).await
}
