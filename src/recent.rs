//! Recent file entries
//!
//! The on-disk data is a map of path to [`EntryRecord`]; the in-memory view
//! is a list of [`RecentFile`] sorted most recent first.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// The persisted value for a single path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryRecord {
    /// Unix timestamp (seconds) when the file was last opened or saved
    pub open_timestamp: f64,
    /// Application version the file was saved with
    #[serde(default)]
    pub save_version: Option<String>,
}

/// Contents of the source data file, keyed by path
pub type RecentFileData = BTreeMap<String, EntryRecord>;

/// A recently opened file
#[derive(Debug, Clone, PartialEq)]
pub struct RecentFile {
    pub path: PathBuf,
    pub open_timestamp: f64,
    pub save_version: Option<String>,
}

impl RecentFile {
    pub fn new(path: impl Into<PathBuf>, open_timestamp: f64, save_version: Option<String>) -> Self {
        Self {
            path: path.into(),
            open_timestamp,
            save_version,
        }
    }

    /// Create an entry stamped with the current time.
    ///
    /// An empty version string is treated as no version.
    pub fn now(path: impl Into<PathBuf>, save_version: Option<&str>) -> Self {
        let save_version = save_version
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Self::new(path, unix_now(), save_version)
    }

    /// The key used for this entry in the data file (forward slashes)
    pub fn key(&self) -> String {
        path_key(&self.path)
    }

    /// Key/value pair to merge into the data file
    pub fn as_record(&self) -> (String, EntryRecord) {
        (
            self.key(),
            EntryRecord {
                open_timestamp: self.open_timestamp,
                save_version: self.save_version.clone(),
            },
        )
    }

    fn from_record(key: &str, record: &EntryRecord) -> Self {
        Self::new(key, record.open_timestamp, record.save_version.clone())
    }
}

/// Current time as fractional seconds since the Unix epoch
pub fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Path rendered with forward slashes
pub fn path_key(path: &Path) -> String {
    let key = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        key.into_owned()
    } else {
        key.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// Most recent first; equal timestamps fall back to path order
fn by_recency(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Reduce the number of entries to at most `max`.
///
/// When there are more entries than allowed the oldest ones are discarded.
/// Data already within the cap is returned untouched.
pub fn reduce_entries(data: RecentFileData, max: usize) -> RecentFileData {
    if data.len() <= max {
        return data;
    }

    let total = data.len();
    let mut items: Vec<(String, EntryRecord)> = data.into_iter().collect();
    items.sort_by(|a, b| {
        by_recency((a.0.as_str(), a.1.open_timestamp), (b.0.as_str(), b.1.open_timestamp))
    });
    items.truncate(max);

    log::info!("Trimmed recent files from {} to {} entries", total, items.len());
    items.into_iter().collect()
}

/// Build the display list: most recent first, at most `max_display` entries.
pub fn sorted_files(data: &RecentFileData, max_display: usize) -> Vec<RecentFile> {
    let mut items: Vec<(&String, &EntryRecord)> = data.iter().collect();
    items.sort_by(|a, b| {
        by_recency((a.0.as_str(), a.1.open_timestamp), (b.0.as_str(), b.1.open_timestamp))
    });

    items
        .into_iter()
        .take(max_display)
        .map(|(key, record)| RecentFile::from_record(key, record))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(ts: f64, version: Option<&str>) -> EntryRecord {
        EntryRecord {
            open_timestamp: ts,
            save_version: version.map(str::to_string),
        }
    }

    fn sample_data() -> RecentFileData {
        let mut data = RecentFileData::new();
        data.insert("/path/to/file1.hip".into(), record(10.0, Some("20.5.123")));
        data.insert("/path/to/file2.hip".into(), record(40.0, Some("20.5.456")));
        data.insert("/path/to/file3.hip".into(), record(25.0, Some("20.5.789")));
        data.insert("/path/to/file4.hip".into(), record(30.0, None));
        data
    }

    #[test]
    fn test_as_record() {
        let file = RecentFile::new("/path/to/file.hip", 123456.789, Some("20.5.456".into()));
        let (key, rec) = file.as_record();
        assert_eq!(key, "/path/to/file.hip");
        assert_eq!(rec, record(123456.789, Some("20.5.456")));
    }

    #[test]
    fn test_now_drops_empty_version() {
        let file = RecentFile::now("/a.hip", Some(""));
        assert_eq!(file.save_version, None);
        assert!(file.open_timestamp > 0.0);

        let file = RecentFile::now("/a.hip", Some("20.5.1"));
        assert_eq!(file.save_version.as_deref(), Some("20.5.1"));
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record(1.5, None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"open_timestamp": 1.5, "save_version": null})
        );

        // Missing version key is accepted
        let rec: EntryRecord = serde_json::from_str(r#"{"open_timestamp": 2}"#).unwrap();
        assert_eq!(rec, record(2.0, None));
    }

    #[test]
    fn test_reduce_entries_less_than() {
        let data = sample_data();
        assert_eq!(reduce_entries(data.clone(), 5), data);
    }

    #[test]
    fn test_reduce_entries_equal() {
        let data = sample_data();
        assert_eq!(reduce_entries(data.clone(), 4), data);
    }

    #[test]
    fn test_reduce_entries_greater_than() {
        let reduced = reduce_entries(sample_data(), 2);
        let keys: Vec<&str> = reduced.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["/path/to/file2.hip", "/path/to/file4.hip"]);
    }

    #[test]
    fn test_sorted_files_limits_display() {
        let files = sorted_files(&sample_data(), 3);
        let names: Vec<&str> = files
            .iter()
            .map(|f| f.path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["file2.hip", "file4.hip", "file3.hip"]);
        assert_eq!(files[1].save_version, None);
    }

    #[test]
    fn test_sorted_files_tie_break() {
        let mut data = RecentFileData::new();
        data.insert("/b.hip".into(), record(5.0, None));
        data.insert("/a.hip".into(), record(5.0, None));
        let files = sorted_files(&data, 10);
        assert_eq!(files[0].path, PathBuf::from("/a.hip"));
        assert_eq!(files[1].path, PathBuf::from("/b.hip"));
    }

    proptest! {
        #[test]
        fn reduce_keeps_most_recent(
            stamps in prop::collection::vec(0u32..1_000_000, 0..60),
            max in 0usize..40,
        ) {
            let data: RecentFileData = stamps
                .iter()
                .enumerate()
                .map(|(i, ts)| (format!("/f{i}.hip"), record(*ts as f64, None)))
                .collect();

            let reduced = reduce_entries(data.clone(), max);

            // Never drops more than necessary
            prop_assert_eq!(reduced.len(), data.len().min(max));

            // Nothing kept is older than anything dropped
            let oldest_kept = reduced
                .values()
                .map(|r| r.open_timestamp)
                .fold(f64::INFINITY, f64::min);
            for (key, rec) in &data {
                if !reduced.contains_key(key) {
                    prop_assert!(rec.open_timestamp <= oldest_kept);
                }
            }
        }

        #[test]
        fn sorted_files_descending(
            stamps in prop::collection::vec(0u32..1_000_000, 0..60),
            max in 0usize..40,
        ) {
            let data: RecentFileData = stamps
                .iter()
                .enumerate()
                .map(|(i, ts)| (format!("/f{i}.hip"), record(*ts as f64, None)))
                .collect();

            let files = sorted_files(&data, max);
            prop_assert_eq!(files.len(), data.len().min(max));
            for pair in files.windows(2) {
                prop_assert!(pair[0].open_timestamp >= pair[1].open_timestamp);
            }
        }
    }
}
