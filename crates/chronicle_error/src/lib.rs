//! Error types for the Chronicle importer.
//!
//! This crate provides the error types used throughout the Chronicle workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
//!
//! fn register(tag: &str) -> ChronicleResult<()> {
//!     Err(ImportError::new(ImportErrorKind::DuplicateAuthor(tag.to_string())))?
//! }
//!
//! let err = register("alice#1").unwrap_err();
//! assert_eq!(
//!     err.import_kind(),
//!     Some(&ImportErrorKind::DuplicateAuthor("alice#1".to_string()))
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod import;
mod json;
mod storage;

pub use config::{ConfigError, ConfigErrorKind};
pub use error::{ChronicleError, ChronicleErrorKind, ChronicleResult};
pub use import::{ImportError, ImportErrorKind};
pub use json::{JsonError, JsonErrorKind};
pub use storage::{StorageError, StorageErrorKind};
