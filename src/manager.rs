//! Cached view of the recent files list
//!
//! The manager keeps a sorted, display-capped copy of the data file and only
//! rereads it when the file on disk has changed since the last access.

use std::path::Path;
use std::time::SystemTime;

use crate::error::{RecentFilesError, Result};
use crate::persistence::RecentFileStore;
use crate::recent::{self, RecentFile, RecentFileData};
use crate::settings::Settings;

/// Application lifecycle events that record the current file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A document finished loading
    DocumentLoaded,
    /// A document was written to disk
    DocumentSaved,
}

/// Handles accessing and updating the recent files list
#[derive(Debug)]
pub struct RecentFileManager {
    store: RecentFileStore,
    settings: Settings,
    files: Vec<RecentFile>,
    last_access_time: SystemTime,
}

impl RecentFileManager {
    /// Create a manager and load the current list from disk
    pub fn new(store: RecentFileStore, settings: Settings) -> Result<Self> {
        let mut manager = Self {
            store,
            settings,
            files: Vec::new(),
            last_access_time: SystemTime::UNIX_EPOCH,
        };
        manager.init_from_disk()?;
        Ok(manager)
    }

    /// Create a manager for the store location named by `settings`
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let store = RecentFileStore::from_settings(&settings)?;
        Self::new(store, settings)
    }

    /// Recent files, most recent first
    pub fn files(&self) -> &[RecentFile] {
        &self.files
    }

    pub fn last_access_time(&self) -> SystemTime {
        self.last_access_time
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &RecentFileStore {
        &self.store
    }

    /// Reload the list if the data file changed since it was last accessed.
    ///
    /// Returns `true` when the list was reloaded.
    pub fn refresh_data(&mut self) -> Result<bool> {
        let modified = self.store.modification_time()?;

        if modified > self.last_access_time {
            log::debug!("{} changed on disk, reloading", self.store.path().display());
            self.init_from_disk()?;
            return Ok(true);
        }

        Ok(false)
    }

    /// Add or update an entry, trim to the configured cap and write back.
    pub fn add_recent_file(&mut self, recent_file: RecentFile) -> Result<()> {
        // Merge against the latest on-disk state, not the cached view
        let mut data = self.store.read_file_data()?;

        let (key, record) = recent_file.as_record();
        log::info!("Recording {}", key);
        data.insert(key, record);

        let data = recent::reduce_entries(data, self.settings.max_recent_files);

        self.store.write_file_data(&data)?;
        self.update_last_access_time();
        self.init_from_data(&data);
        Ok(())
    }

    /// Record `path` as opened now.
    ///
    /// Relative paths are made absolute against the working directory so the
    /// same document always maps to one entry.
    pub fn add_current_file(&mut self, path: impl AsRef<Path>, save_version: Option<&str>) -> Result<()> {
        let path = path.as_ref();
        let absolute = std::path::absolute(path).map_err(|e| RecentFilesError::io(path, e))?;
        self.add_recent_file(RecentFile::now(absolute, save_version))
    }

    /// Hook for the host application's load and save events
    pub fn handle_session_event(
        &mut self,
        event: SessionEvent,
        path: impl AsRef<Path>,
        save_version: Option<&str>,
    ) -> Result<()> {
        log::debug!("Session event {:?} for {}", event, path.as_ref().display());
        match event {
            SessionEvent::DocumentLoaded | SessionEvent::DocumentSaved => {
                self.add_current_file(path, save_version)
            }
        }
    }

    fn init_from_data(&mut self, data: &RecentFileData) {
        self.files = recent::sorted_files(data, self.settings.max_display_files);
    }

    fn init_from_disk(&mut self) -> Result<()> {
        let data = self.store.read_file_data()?;
        self.update_last_access_time();
        self.init_from_data(&data);
        Ok(())
    }

    fn update_last_access_time(&mut self) {
        self.last_access_time = SystemTime::now();
    }
}
