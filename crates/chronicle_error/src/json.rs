//! State document encoding errors.

use derive_getters::Getters;

/// Which direction of the state document conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum JsonErrorKind {
    /// The file on disk is not a valid state document
    #[display("Malformed state file")]
    Parse,
    /// The in-memory state could not be encoded
    #[display("Could not encode state for")]
    Serialize,
}

/// A state document failed to parse or encode.
///
/// Carries the state file it concerns so a malformed file can be found and
/// repaired by hand.
///
/// # Examples
///
/// ```
/// use chronicle_error::{JsonError, JsonErrorKind};
///
/// let err = JsonError::new(JsonErrorKind::Parse, "run/state.json", "expected `,` at line 3");
/// assert_eq!(err.path(), "run/state.json");
/// assert!(err.to_string().contains("Malformed state file run/state.json"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error, Getters)]
#[display("JSON Error: {} {}: {} at line {} in {}", kind, path, message, line, file)]
pub struct JsonError {
    kind: JsonErrorKind,
    path: String,
    message: String,
    line: u32,
    file: &'static str,
}

impl JsonError {
    /// Create a new JsonError for the state file at `path`.
    #[track_caller]
    pub fn new(kind: JsonErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
