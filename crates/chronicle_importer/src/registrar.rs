//! Author registration.

use crate::{Importer, resolve_avatar};
use chronicle_error::{ChronicleResult, ImportError, ImportErrorKind};
use chronicle_interface::ImportPlatform;
use chronicle_state::AuthorRecord;
use tracing::{info, instrument};

impl<P: ImportPlatform> Importer<P> {
    /// Register an external author.
    ///
    /// `avatar` may be an http(s) URL, a local path or a data URI; it is
    /// resolved to a data URI before anything is stored. The state file is
    /// saved before this returns.
    ///
    /// # Errors
    ///
    /// - `ImportErrorKind::DuplicateAuthor` if `tag` is already registered
    /// - `ImportErrorKind::AvatarResolution` if the avatar cannot be resolved;
    ///   nothing is registered in that case
    #[instrument(skip(self, avatar), fields(has_avatar = avatar.is_some()))]
    pub async fn add_user(
        &mut self,
        tag: &str,
        name: &str,
        avatar: Option<&str>,
    ) -> ChronicleResult<()> {
        if self.store.state().contains_author(tag) {
            return Err(ImportError::new(ImportErrorKind::DuplicateAuthor(tag.to_string())).into());
        }

        let avatar = match avatar {
            Some(reference) => Some(resolve_avatar(&self.http, reference).await?),
            None => None,
        };

        self.store.add_author(tag, AuthorRecord::new(name, avatar))?;
        info!("Registered author");
        Ok(())
    }

    /// Whether an author tag is registered.
    pub fn has_user(&self, tag: &str) -> bool {
        self.store.state().contains_author(tag)
    }

    /// The stored record for an author tag.
    pub fn author(&self, tag: &str) -> Option<&AuthorRecord> {
        self.store.state().author(tag)
    }

    /// The persisted proxy handle for an author in a channel, if one was provisioned.
    pub fn proxy_handle(&self, channel_id: &str, tag: &str) -> Option<&str> {
        self.store.state().proxy_handle(channel_id, tag)
    }
}
