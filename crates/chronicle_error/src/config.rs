//! Importer configuration errors.

use derive_getters::Getters;

/// Kinds of configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ConfigErrorKind {
    /// The layered sources could not be merged or deserialized
    #[display("Failed to load configuration: {}", _0)]
    Load(String),
    /// A field was present but unusable
    #[display("Invalid {}: {}", field, reason)]
    Invalid {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
    /// Neither the configuration nor the environment supplied a bot token
    #[display("No token configured and {} is not set", _0)]
    MissingToken(&'static str),
}

/// Configuration error with source location.
///
/// # Examples
///
/// ```
/// use chronicle_error::{ConfigError, ConfigErrorKind};
///
/// let err = ConfigError::new(ConfigErrorKind::MissingToken("DISCORD_TOKEN"));
/// assert!(err.to_string().contains("DISCORD_TOKEN is not set"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Configuration Error: {} at line {} in {}", kind, line, file)]
pub struct ConfigError {
    kind: ConfigErrorKind,
    line: u32,
    file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError at the current location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
