//! Importer configuration.
//!
//! Configuration sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`chronicle.toml` shipped with the library)
//! 2. User config in home directory (`~/.config/chronicle/chronicle.toml`)
//! 3. User config in current directory (`./chronicle.toml`)
//! 4. `CHRONICLE_*` environment variables (e.g. `CHRONICLE_GUILD_ID`)

use chronicle_cache::ProxyCacheConfig;
use chronicle_error::{ChronicleError, ChronicleResult, ConfigError, ConfigErrorKind};
use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../chronicle.toml");

/// Settings for one import run.
///
/// # Example
///
/// ```toml
/// guild_id = "123456789012345678"
/// state_path = "import-state.json"
/// throttle_ms = 3000
/// ```
#[derive(Clone, PartialEq, Deserialize, Serialize, Getters)]
pub struct ImporterConfig {
    /// Guild to import into
    guild_id: String,

    /// Where the state file lives
    #[serde(default = "default_state_path")]
    state_path: PathBuf,

    /// Pause after every successful send, in milliseconds
    #[serde(default = "default_throttle_ms")]
    throttle_ms: u64,

    /// Platform credential. Usually supplied through the environment.
    #[serde(default, skip_serializing)]
    token: Option<String>,

    /// Upper bound on cached live proxies (unbounded when absent)
    #[serde(default)]
    proxy_cache_capacity: Option<usize>,
}

fn default_state_path() -> PathBuf {
    PathBuf::from("state.json")
}

fn default_throttle_ms() -> u64 {
    3000
}

impl std::fmt::Debug for ImporterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImporterConfig")
            .field("guild_id", &self.guild_id)
            .field("state_path", &self.state_path)
            .field("throttle_ms", &self.throttle_ms)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("proxy_cache_capacity", &self.proxy_cache_capacity)
            .finish()
    }
}

impl ImporterConfig {
    /// Create a configuration for a guild with default settings.
    pub fn new(guild_id: impl Into<String>) -> Self {
        Self {
            guild_id: guild_id.into(),
            state_path: default_state_path(),
            throttle_ms: default_throttle_ms(),
            token: None,
            proxy_cache_capacity: None,
        }
    }

    /// Set the state file location.
    pub fn with_state_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_path = path.into();
        self
    }

    /// Set the post-send pause in milliseconds.
    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }

    /// Set the platform credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The post-send pause.
    pub fn throttle(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Proxy cache settings derived from this configuration.
    pub fn proxy_cache(&self) -> ProxyCacheConfig {
        ProxyCacheConfig::default().with_max_size(self.proxy_cache_capacity)
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it leaves
    /// `guild_id` unset.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ChronicleResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));
        Self::build(builder)
    }

    /// Load configuration from all sources with the documented precedence.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ChronicleResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/chronicle/chronicle.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("chronicle").required(false))
            .add_source(Environment::with_prefix("CHRONICLE"));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ChronicleResult<Self> {
        let config: Self = builder
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)?;

        if config.guild_id.trim().is_empty() {
            return Err(ConfigError::new(ConfigErrorKind::Invalid {
                field: "guild_id",
                reason: "must not be empty".to_string(),
            })
            .into());
        }
        Ok(config)
    }
}

fn load_error(err: config::ConfigError) -> ChronicleError {
    ConfigError::new(ConfigErrorKind::Load(err.to_string())).into()
}
