//! Import error types.
//!
//! These cover every failure the importer surfaces to its caller: guild binding
//! problems at initialization, author registration, channel resolution, and
//! message delivery.

use derive_getters::Getters;

/// Import error variants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ImportErrorKind {
    /// The state file belongs to a different guild than the one requested.
    #[display(
        "guild id {stored} in state file {path} does not match requested guild {requested}; \
         to start fresh, delete the state file"
    )]
    ConfigMismatch {
        /// Guild id recorded in the state file
        stored: String,
        /// Guild id the importer was asked to bind to
        requested: String,
        /// Location of the state file
        path: String,
    },

    /// The guild is not accessible to the current session.
    #[display("could not find guild {_0}")]
    GuildNotFound(String),

    /// The author tag is already registered.
    #[display("user {_0} already configured")]
    DuplicateAuthor(String),

    /// An avatar URL, path or data URI could not be turned into image data.
    #[display("could not resolve avatar {avatar}: {reason}")]
    AvatarResolution {
        /// The avatar reference as supplied by the caller
        avatar: String,
        /// Why resolution failed
        reason: String,
    },

    /// A post referenced an author tag that was never registered.
    #[display("unknown user {_0}; add them with add_user first")]
    UnknownAuthor(String),

    /// A post referenced a channel id absent from the guild's channel snapshot.
    #[display("unknown channel {_0}; pass a channel id as returned by find_channel_named")]
    UnknownChannel(String),

    /// The channel exists but cannot carry proxied text messages.
    #[display("{channel_id} is not a text channel (is instead {kind})")]
    WrongChannelKind {
        /// The offending channel id
        channel_id: String,
        /// The kind of channel actually found
        kind: String,
    },

    /// A channel name failed the naming policy.
    #[display("{_0:?} is not a valid channel name")]
    InvalidChannelName(String),

    /// A platform id could not be parsed by the platform adapter.
    #[display("invalid platform id: {_0}")]
    InvalidId(String),

    /// The platform or network rejected a request. The message is passed through verbatim.
    #[display("{_0}")]
    Transport(String),
}

/// Import error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("Import Error: {} at line {} in {}", kind, line, file)]
pub struct ImportError {
    kind: ImportErrorKind,
    line: u32,
    #[getter(skip)]
    file: &'static str,
}

impl ImportError {
    /// Get field `file` from instance of `ImportError`.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// Create a new ImportError with automatic location tracking.
    ///
    /// # Example
    /// ```
    /// use chronicle_error::{ImportError, ImportErrorKind};
    ///
    /// let err = ImportError::new(ImportErrorKind::UnknownAuthor("ghost".to_string()));
    /// assert!(err.to_string().contains("unknown user ghost"));
    /// ```
    #[track_caller]
    pub fn new(kind: ImportErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
