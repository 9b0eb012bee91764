//! Persisted state for the Chronicle importer.
//!
//! One JSON document per import records which guild the import is bound to,
//! the registered authors, and which proxy identity each author uses in each
//! channel. Every mutation is followed by a synchronous [`StateStore::save`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod state;
mod store;

pub use state::{AuthorRecord, ImportState};
pub use store::StateStore;
