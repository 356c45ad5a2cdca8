//! Menu building
//!
//! Turns the recent files list into aligned, human-readable rows and the flat
//! token/label list a host menu script consumes.

use std::fmt::Write;

use chrono::{Local, TimeZone};

use crate::error::{RecentFilesError, Result};
use crate::manager::RecentFileManager;
use crate::recent::{RecentFile, path_key};

/// Column separator used when aligning rows
const COLUMN_GAP: &str = "  ";

/// Shown in the version column when no version was recorded
const NO_VERSION: &str = "None";

/// Format a Unix timestamp (seconds) in local time
pub fn format_timestamp(timestamp: f64, format: &str) -> Result<String> {
    if !timestamp.is_finite() || timestamp.abs() >= i64::MAX as f64 {
        return Err(RecentFilesError::InvalidTimestamp(timestamp));
    }

    let secs = timestamp.floor();
    let nanos = (((timestamp - secs) * 1e9) as u32).min(999_999_999);
    let dt = Local
        .timestamp_opt(secs as i64, nanos)
        .single()
        .ok_or(RecentFilesError::InvalidTimestamp(timestamp))?;

    let mut out = String::new();
    write!(out, "{}", dt.format(format)).map_err(|_| RecentFilesError::InvalidSetting {
        name: "timestamp_format".to_string(),
        value: format.to_string(),
    })?;
    Ok(out)
}

/// Build one aligned row per file: `"N. path"`, `"(version)"`, time.
pub fn build_display_table(files: &[RecentFile], timestamp_format: &str) -> Result<Vec<String>> {
    let mut rows = Vec::with_capacity(files.len());

    for (idx, file) in files.iter().enumerate() {
        rows.push([
            format!("{}. {}", idx + 1, path_key(&file.path)),
            format!("({})", file.save_version.as_deref().unwrap_or(NO_VERSION)),
            format_timestamp(file.open_timestamp, timestamp_format)?,
        ]);
    }

    Ok(align_columns(&rows))
}

fn align_columns<const N: usize>(rows: &[[String; N]]) -> Vec<String> {
    let mut widths = [0usize; N];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, (cell, width)) in row.iter().zip(widths).enumerate() {
                if i > 0 {
                    line.push_str(COLUMN_GAP);
                }
                line.push_str(cell);
                let pad = width - cell.chars().count();
                line.extend(std::iter::repeat_n(' ', pad));
            }
            line.truncate(line.trim_end().len());
            line
        })
        .collect()
}

/// Build the menu items for an "Open Recent" menu.
///
/// The data is refreshed first. The result alternates the path to open with
/// its display label.
pub fn build_recent_files_menu(manager: &mut RecentFileManager) -> Result<Vec<String>> {
    manager.refresh_data()?;

    let labels = build_display_table(manager.files(), &manager.settings().timestamp_format)?;

    let mut menu = Vec::with_capacity(labels.len() * 2);
    for (file, label) in manager.files().iter().zip(labels) {
        menu.push(path_key(&file.path));
        menu.push(label);
    }

    log::debug!("Built recent files menu with {} items", menu.len() / 2);
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TIMESTAMP_FORMAT;
    use crate::persistence::RecentFileStore;
    use crate::recent::{EntryRecord, RecentFileData};
    use crate::settings::Settings;

    fn local(ts: f64) -> String {
        Local
            .timestamp_opt(ts.floor() as i64, 0)
            .unwrap()
            .format(TIMESTAMP_FORMAT)
            .to_string()
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp(1710886869.0176835, TIMESTAMP_FORMAT).unwrap(),
            local(1710886869.0)
        );
    }

    #[test]
    fn test_format_timestamp_malformed() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            assert!(matches!(
                format_timestamp(bad, TIMESTAMP_FORMAT),
                Err(RecentFilesError::InvalidTimestamp(_))
            ));
        }
    }

    #[test]
    fn test_format_timestamp_bad_format() {
        assert!(matches!(
            format_timestamp(0.0, "%Y-%"),
            Err(RecentFilesError::InvalidSetting { .. })
        ));
    }

    #[test]
    fn test_build_display_table() {
        let files = vec![
            RecentFile::new("/work/file1.hipnc", 1710886869.0176835, Some("20.5.178".into())),
            RecentFile::new("/home/user/file2.hipnc", 1738076128.2437088, None),
            RecentFile::new("/test/path/file3.hipnc", 1722337846.0559487, Some("20.5.310".into())),
        ];

        let rows = build_display_table(&files, TIMESTAMP_FORMAT).unwrap();

        assert_eq!(
            rows,
            vec![
                format!("1. /work/file1.hipnc       (20.5.178)  {}", local(1710886869.0)),
                format!("2. /home/user/file2.hipnc  (None)      {}", local(1738076128.0)),
                format!("3. /test/path/file3.hipnc  (20.5.310)  {}", local(1722337846.0)),
            ]
        );
    }

    #[test]
    fn test_build_display_table_empty() {
        assert!(build_display_table(&[], TIMESTAMP_FORMAT).unwrap().is_empty());
    }

    #[test]
    fn test_build_display_table_propagates_bad_timestamp() {
        let files = vec![RecentFile::new("/a.hip", f64::NAN, None)];
        assert!(build_display_table(&files, TIMESTAMP_FORMAT).is_err());
    }

    #[test]
    fn test_build_recent_files_menu() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecentFileStore::new(tmp.path().join("recent.json"));

        let mut data = RecentFileData::new();
        data.insert(
            "/p/old.hip".into(),
            EntryRecord {
                open_timestamp: 1700000000.0,
                save_version: Some("20.0.1".into()),
            },
        );
        data.insert(
            "/p/new.hip".into(),
            EntryRecord {
                open_timestamp: 1710000000.0,
                save_version: Some("20.5.1".into()),
            },
        );
        store.write_file_data(&data).unwrap();

        let mut manager = RecentFileManager::new(store, Settings::default()).unwrap();
        let menu = build_recent_files_menu(&mut manager).unwrap();

        assert_eq!(menu.len(), 4);
        assert_eq!(menu[0], "/p/new.hip");
        assert!(menu[1].starts_with("1. /p/new.hip  (20.5.1)  "));
        assert_eq!(menu[2], "/p/old.hip");
        assert!(menu[3].starts_with("2. /p/old.hip  (20.0.1)  "));
    }
}
