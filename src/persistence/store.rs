use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use crate::consts;
use crate::error::{RecentFilesError, Result};
use crate::recent::RecentFileData;
use crate::settings::Settings;

/// Resolve the location of the source data file.
///
/// Uses the configured path if set, otherwise `$HOME/recent_files.json`.
pub fn source_file_path(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = &settings.source_file {
        return Ok(path.clone());
    }

    dirs::home_dir()
        .map(|home| home.join(consts::SOURCE_FILE_NAME))
        .ok_or(RecentFilesError::NoHomeDirectory)
}

/// JSON file holding the recent files data
#[derive(Debug, Clone)]
pub struct RecentFileStore {
    path: PathBuf,
}

impl RecentFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        source_file_path(settings).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the recent file data from disk.
    pub fn read_file_data(&self) -> Result<RecentFileData> {
        let content =
            fs::read_to_string(&self.path).map_err(|e| RecentFilesError::io(&self.path, e))?;
        let data: RecentFileData =
            serde_json::from_str(&content).map_err(|e| RecentFilesError::Parse {
                path: self.path.clone(),
                source: e,
            })?;

        log::debug!("Read {} entries from {}", data.len(), self.path.display());
        Ok(data)
    }

    /// Write the data to disk, replacing the previous contents.
    pub fn write_file_data(&self, data: &RecentFileData) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        data.serialize(&mut ser).map_err(|e| RecentFilesError::Parse {
            path: self.path.clone(),
            source: e,
        })?;

        let tmp = self.tmp_path();
        if let Err(e) = Self::replace_with(&tmp, &self.path, &buf) {
            // Leave no partial file behind
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }

        log::info!("Recent files saved ({} entries)", data.len());
        Ok(())
    }

    /// Modification time of the data file
    pub fn modification_time(&self) -> Result<SystemTime> {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| RecentFilesError::io(&self.path, e))
    }

    /// Create an empty data file if none exists yet.
    ///
    /// Returns `true` when a new file was written.
    pub fn initialize(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RecentFilesError::io(parent, e))?;
        }

        log::warn!("Creating empty recent files list at {}", self.path.display());
        self.write_file_data(&RecentFileData::new())?;
        Ok(true)
    }

    fn replace_with(tmp: &Path, target: &Path, contents: &[u8]) -> Result<()> {
        let mut file = fs::File::create(tmp).map_err(|e| RecentFilesError::io(tmp, e))?;
        file.write_all(contents)
            .and_then(|_| file.sync_all())
            .map_err(|e| RecentFilesError::io(tmp, e))?;
        drop(file);

        fs::rename(tmp, target).map_err(|e| RecentFilesError::io(target, e))
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
