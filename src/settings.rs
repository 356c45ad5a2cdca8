//! Recent files settings
//!
//! Defaults can be overridden from the environment.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::{RecentFilesError, Result};

/// Recent files settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Explicit location of the source data file
    pub source_file: Option<PathBuf>,
    /// Maximum number of entries kept in the file
    pub max_recent_files: usize,
    /// Maximum number of entries shown in the menu
    pub max_display_files: usize,
    /// strftime-style format used for the time column
    pub timestamp_format: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_file: None,
            max_recent_files: consts::MAX_RECENT_FILES,
            max_display_files: consts::MAX_DISPLAY_FILES,
            timestamp_format: consts::TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup, applying any
    /// overrides on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(path) = lookup(consts::SOURCE_FILE_VAR).filter(|p| !p.is_empty()) {
            settings.source_file = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup(consts::MAX_RECENT_FILES_VAR) {
            settings.max_recent_files = parse_cap(consts::MAX_RECENT_FILES_VAR, &value)?;
        }
        if let Some(value) = lookup(consts::MAX_DISPLAY_FILES_VAR) {
            settings.max_display_files = parse_cap(consts::MAX_DISPLAY_FILES_VAR, &value)?;
        }

        log::debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// Override the source file location
    pub fn with_source_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }
}

/// Caps must be at least 1, otherwise a newly added entry would be trimmed
/// away immediately.
fn parse_cap(name: &str, value: &str) -> Result<usize> {
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|cap| *cap > 0)
        .ok_or_else(|| RecentFilesError::InvalidSetting {
            name: name.to_string(),
            value: value.to_string(),
        })
}
