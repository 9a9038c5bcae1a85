//! Storage for the all-time best score
//!
//! The record lives in a small JSON key-value file, stored as a string the
//! way a browser keeps it in local storage. Other keys in the same file are
//! left alone when the record is written, whatever their values.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

/// Key under which the record is stored
pub const RECORD_KEY: &str = "snakeRecord";

/// Somewhere the record survives between sessions
pub trait RecordStore {
    /// Read the stored record, `None` when nothing usable is stored
    fn load(&self) -> Result<Option<u32>>;

    /// Replace the stored record
    fn save(&mut self, record: u32) -> Result<()>;
}

/// Record kept in a JSON key-value file on disk
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    path: PathBuf,
    key: String,
}

impl FileRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            key: RECORD_KEY.to_string(),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, Value>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let json = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read record file {:?}", self.path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse record file {:?}", self.path))
    }
}

impl RecordStore for FileRecordStore {
    fn load(&self) -> Result<Option<u32>> {
        let entries = self.read_entries()?;

        let Some(raw) = entries.get(&self.key) else {
            return Ok(None);
        };

        let record = match raw {
            Value::String(text) => text.trim().parse::<u32>().ok(),
            Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
            _ => None,
        };
        if record.is_none() {
            warn!(path = ?self.path, value = %raw, "ignoring unreadable record");
        }
        Ok(record)
    }

    fn save(&mut self, record: u32) -> Result<()> {
        // A corrupt file is replaced rather than blocking the new record
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            warn!(path = ?self.path, ?err, "overwriting unreadable record file");
            BTreeMap::new()
        });
        entries.insert(self.key.clone(), Value::String(record.to_string()));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create record directory {:?}", parent)
                })?;
            }
        }

        let json =
            serde_json::to_string_pretty(&entries).context("Failed to serialize record")?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write record file {:?}", tmp_path))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("Failed to replace record file {:?}", self.path))?;

        Ok(())
    }
}

/// Record kept only for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    record: Option<u32>,
    /// Every value passed to `save`, oldest first
    pub saved: Vec<u32>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: u32) -> Self {
        Self {
            record: Some(record),
            saved: Vec::new(),
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn load(&self) -> Result<Option<u32>> {
        Ok(self.record)
    }

    fn save(&mut self, record: u32) -> Result<()> {
        self.record = Some(record);
        self.saved.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_has_no_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileRecordStore::new(temp_dir.path().join("record.json"));

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("record.json");
        let mut store = FileRecordStore::new(&path);

        store.save(12).unwrap();
        assert_eq!(store.load().unwrap(), Some(12));

        // The value is kept as a string under the record key
        let json = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.get(RECORD_KEY).map(String::as_str), Some("12"));
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_save_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, r#"{ "theme": "dark", "snakeRecord": "3" }"#).unwrap();
        let mut store = FileRecordStore::new(&path);

        assert_eq!(store.load().unwrap(), Some(3));
        store.save(8).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(entries.get(RECORD_KEY).map(String::as_str), Some("8"));
    }

    #[test]
    fn test_numeric_record_keeps_other_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, r#"{ "theme": "dark", "volume": 3, "snakeRecord": 5 }"#).unwrap();
        let mut store = FileRecordStore::new(&path);

        assert_eq!(store.load().unwrap(), Some(5));
        store.save(8).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.get("theme"), Some(&Value::from("dark")));
        assert_eq!(entries.get("volume"), Some(&Value::from(3)));
        assert_eq!(entries.get(RECORD_KEY), Some(&Value::from("8")));
    }

    #[test]
    fn test_odd_record_value_is_absent_but_neighbours_survive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, r#"{ "theme": "dark", "snakeRecord": [1, 2] }"#).unwrap();
        let mut store = FileRecordStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        store.save(2).unwrap();

        let json = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(entries.get("theme"), Some(&Value::from("dark")));
        assert_eq!(store.load().unwrap(), Some(2));
    }

    #[test]
    fn test_unparsable_value_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, r#"{ "snakeRecord": "lots" }"#).unwrap();

        let store = FileRecordStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("record.json");
        std::fs::write(&path, "not json").unwrap();

        let mut store = FileRecordStore::new(&path);
        assert!(store.load().is_err());

        store.save(4).unwrap();
        assert_eq!(store.load().unwrap(), Some(4));
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryRecordStore::with_record(2);
        assert_eq!(store.load().unwrap(), Some(2));

        store.save(9).unwrap();
        assert_eq!(store.load().unwrap(), Some(9));
        assert_eq!(store.saved, vec![9]);
    }
}
