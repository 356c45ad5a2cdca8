//! Save/load of the recent files data file
//!
//! Features:
//! - Plain JSON map keyed by path
//! - Location from settings, environment or home directory
//! - Writes go through a temporary file (tmp → rename)
//! - Missing or malformed files are reported, never silently replaced

pub mod store;

pub use store::{RecentFileStore, source_file_path};
