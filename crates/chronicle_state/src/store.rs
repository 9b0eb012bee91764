//! Loading and saving the state document.

use crate::{AuthorRecord, ImportState};
use chronicle_error::{
    ChronicleResult, ImportError, ImportErrorKind, JsonError, JsonErrorKind, StorageError,
    StorageErrorKind,
};
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// The state document together with the file it lives in.
///
/// Single-process only: there is no file locking, and every save overwrites
/// the whole file.
#[derive(Debug, Clone, Getters)]
pub struct StateStore {
    /// Location of the state file
    path: PathBuf,
    /// The in-memory state, identical to the file after every save
    state: ImportState,
}

impl StateStore {
    /// Loads the state for a guild, or starts a fresh one if the file is absent.
    ///
    /// A fresh state is not written until the first mutation.
    ///
    /// # Errors
    ///
    /// Fails with `ImportErrorKind::ConfigMismatch` when the file records a
    /// different guild. The file is left untouched in that case.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, guild_id: &str) -> ChronicleResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("No existing state file, starting fresh");
            return Ok(Self {
                path,
                state: ImportState::new(guild_id),
            });
        }

        let state = Self::load(&path)?;
        if state.guild_id() != guild_id {
            warn!(
                stored = %state.guild_id(),
                requested = %guild_id,
                "State file belongs to another guild"
            );
            return Err(ImportError::new(ImportErrorKind::ConfigMismatch {
                stored: state.guild_id().clone(),
                requested: guild_id.to_string(),
                path: path.display().to_string(),
            })
            .into());
        }

        debug!(
            users = state.users().len(),
            proxies = state.proxy_count(),
            "Loaded state"
        );
        Ok(Self { path, state })
    }

    /// Reads and parses a state file.
    pub fn load(path: &Path) -> ChronicleResult<ImportState> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
        })?;

        let state = serde_json::from_str(&contents).map_err(|e| {
            JsonError::new(JsonErrorKind::Parse, path.display().to_string(), e.to_string())
        })?;
        Ok(state)
    }

    /// Writes the full state to disk, replacing the previous contents.
    ///
    /// Writes a sibling temporary file and renames it over the state file.
    pub fn save(&self) -> ChronicleResult<()> {
        let contents = serde_json::to_string_pretty(&self.state).map_err(|e| {
            JsonError::new(
                JsonErrorKind::Serialize,
                self.path.display().to_string(),
                e.to_string(),
            )
        })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let mut temp_name = self.path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        std::fs::write(&temp_path, contents).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;
        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        debug!(path = %self.path.display(), "Saved state");
        Ok(())
    }

    /// Registers an author and saves.
    ///
    /// # Errors
    ///
    /// `ImportErrorKind::DuplicateAuthor` if the tag is taken; the existing
    /// record is kept and nothing is written.
    pub fn add_author(&mut self, tag: &str, record: AuthorRecord) -> ChronicleResult<()> {
        if !self.state.insert_author(tag, record) {
            return Err(ImportError::new(ImportErrorKind::DuplicateAuthor(tag.to_string())).into());
        }
        self.save()
    }

    /// Records a proxy handle for a (channel, author) pair and saves.
    ///
    /// Returns the handle now associated with the pair. If one was already
    /// recorded it wins and nothing is written.
    pub fn record_proxy_handle(
        &mut self,
        channel_id: &str,
        tag: &str,
        handle: &str,
    ) -> ChronicleResult<String> {
        match self.state.record_proxy_handle(channel_id, tag, handle) {
            Ok(()) => {
                self.save()?;
                Ok(handle.to_string())
            }
            Err(existing) => {
                warn!(
                    channel_id,
                    tag,
                    existing = %existing,
                    discarded = handle,
                    "Proxy handle already recorded for this pair"
                );
                Ok(existing)
            }
        }
    }
}
