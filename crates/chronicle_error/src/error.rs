//! Top-level error wrapper types.

use crate::{ConfigError, ImportError, ImportErrorKind, JsonError, StorageError};

/// Every error condition a Chronicle operation can produce.
///
/// # Examples
///
/// ```
/// use chronicle_error::{ChronicleError, JsonError, JsonErrorKind};
///
/// let err: ChronicleError = JsonError::new(JsonErrorKind::Parse, "state.json", "trailing comma").into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ChronicleErrorKind {
    /// Importer operation error
    #[from(ImportError)]
    Import(ImportError),
    /// State file I/O error
    #[from(StorageError)]
    Storage(StorageError),
    /// State document parse or encode error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Chronicle error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Chronicle Error: {}", _0)]
pub struct ChronicleError(Box<ChronicleErrorKind>);

impl ChronicleError {
    /// Create a new error from a kind.
    pub fn new(kind: ChronicleErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChronicleErrorKind {
        &self.0
    }

    /// The import error kind, when this error came from an importer operation.
    pub fn import_kind(&self) -> Option<&ImportErrorKind> {
        match self.kind() {
            ChronicleErrorKind::Import(err) => Some(err.kind()),
            _ => None,
        }
    }
}

impl<T> From<T> for ChronicleError
where
    T: Into<ChronicleErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Chronicle operations.
pub type ChronicleResult<T> = std::result::Result<T, ChronicleError>;
