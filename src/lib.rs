//! Recent Files Menu - recently opened documents for a creative application
//!
//! Core modules:
//! - `recent`: Entry types, trimming and ordering
//! - `persistence`: JSON data file on disk
//! - `manager`: Cached, refresh-on-change view of the list
//! - `menu`: Display rows and menu items
//! - `settings`: Caps, formats and file location

pub mod error;
pub mod manager;
pub mod menu;
pub mod persistence;
pub mod recent;
pub mod settings;

pub use error::{RecentFilesError, Result};
pub use manager::{RecentFileManager, SessionEvent};
pub use menu::{build_display_table, build_recent_files_menu};
pub use persistence::RecentFileStore;
pub use recent::{EntryRecord, RecentFile, RecentFileData};
pub use settings::Settings;

/// Configuration constants
pub mod consts {
    /// Default data file name, placed in the user's home directory
    pub const SOURCE_FILE_NAME: &str = "recent_files.json";

    /// Environment variable pointing at the data file
    pub const SOURCE_FILE_VAR: &str = "RECENT_FILES_MENU_FILE";
    /// Environment variable overriding the stored entry cap
    pub const MAX_RECENT_FILES_VAR: &str = "RECENT_FILES_MENU_MAX_FILES";
    /// Environment variable overriding the displayed entry cap
    pub const MAX_DISPLAY_FILES_VAR: &str = "RECENT_FILES_MENU_MAX_DISPLAY";

    /// Maximum number of entries to keep in the file
    pub const MAX_RECENT_FILES: usize = 100;
    /// Maximum number of entries to display in the menu
    pub const MAX_DISPLAY_FILES: usize = 100;

    /// Timestamp format for the menu
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
}
