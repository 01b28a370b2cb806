use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Fixed relative path of the history file inside the target project.
pub const HISTORY_FILE: &str = ".gen_history.json";

/// One recorded generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339 timestamp of the run that generated the unit.
    pub created_at: String,
    /// Relative paths of the generated files, in generation order.
    pub files: Vec<String>,
}

/// Durable map from case-folded service name to generation record.
///
/// Reads and writes are whole-file (load, mutate in memory, write back).
/// There is no locking: concurrent invocations race on the file, which is
/// a documented limitation of the tool, not something this type prevents.
pub struct HistoryStore {
    path: PathBuf,
}

type HistoryMap = BTreeMap<String, HistoryEntry>;

impl HistoryStore {
    /// Create a store rooted at the target project directory.
    pub fn new(root: &Path) -> Self {
        Self {
            path: root.join(HISTORY_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a generation run for `key`, stamped with the current time.
    ///
    /// An absent or corrupt history file is treated as empty rather than
    /// an error, so a broken history never blocks generation.
    pub fn record(&self, key: &str, files: Vec<String>) -> Result<()> {
        self.record_at(key, &Utc::now().to_rfc3339(), files)
    }

    /// Record a generation run with an explicit timestamp.
    pub fn record_at(&self, key: &str, created_at: &str, files: Vec<String>) -> Result<()> {
        let mut history = self.load_lenient();
        history.insert(
            key.to_lowercase(),
            HistoryEntry {
                created_at: created_at.to_string(),
                files,
            },
        );
        self.save(&history)
    }

    /// Look up the files and creation time recorded for `key`.
    pub fn lookup(&self, key: &str) -> Result<(Vec<String>, DateTime<FixedOffset>)> {
        let history = self.load_strict()?;
        let entry = history
            .get(&key.to_lowercase())
            .ok_or_else(|| Error::NotFound {
                name: key.to_lowercase(),
            })?;

        let created_at = DateTime::parse_from_rfc3339(&entry.created_at).map_err(|_| {
            Error::InvalidTimestamp {
                name: key.to_lowercase(),
                value: entry.created_at.clone(),
            }
        })?;

        Ok((entry.files.clone(), created_at))
    }

    /// Delete the entry for `key`.
    pub fn forget(&self, key: &str) -> Result<()> {
        let mut history = self.load_strict()?;
        history.remove(&key.to_lowercase());
        self.save(&history)
    }

    fn load_lenient(&self) -> HistoryMap {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    fn load_strict(&self) -> Result<HistoryMap> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Missing {
                    path: self.path.clone(),
                }
            } else {
                Error::Io {
                    path: self.path.clone(),
                    source: e,
                }
            }
        })?;

        serde_json::from_str(&content).map_err(|e| Error::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, history: &HistoryMap) -> Result<()> {
        let content = serde_json::to_string_pretty(history).map_err(|e| Error::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        std::fs::write(&self.path, content).map_err(|e| Error::Io {
            path: self.path.clone(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn five_files(base: &str) -> Vec<String> {
        vec![
            format!("internal/repository/{base}_repository.go"),
            format!("internal/service/{base}_service.go"),
            format!("internal/handler/{base}_handler.go"),
            format!("internal/dto/{base}.go"),
            format!("test/unit/dto/{base}_input_test.go"),
        ]
    }

    #[test]
    fn test_record_then_lookup() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());

        store.record("rsvp", five_files("rsvp")).unwrap();

        let (files, created_at) = store.lookup("rsvp").unwrap();
        assert_eq!(files.len(), 5);
        assert_eq!(files[0], "internal/repository/rsvp_repository.go");
        // Round-trip through RFC 3339 parsing already happened in lookup.
        assert!(created_at.timestamp() > 0);
    }

    #[test]
    fn test_keys_are_case_folded() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());

        store.record("RSVP", five_files("rsvp")).unwrap();

        assert!(store.lookup("rsvp").is_ok());
        assert!(store.lookup("Rsvp").is_ok());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"rsvp\""));
        assert!(!raw.contains("\"RSVP\""));
    }

    #[test]
    fn test_lookup_missing_file() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());

        assert!(matches!(store.lookup("rsvp"), Err(Error::Missing { .. })));
    }

    #[test]
    fn test_lookup_unknown_key() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        store.record("guest", five_files("guest")).unwrap();

        assert!(matches!(store.lookup("rsvp"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_lookup_corrupt_json() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.lookup("rsvp"), Err(Error::Corrupt { .. })));
    }

    #[test]
    fn test_lookup_bad_timestamp() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        store
            .record_at("rsvp", "yesterday-ish", five_files("rsvp"))
            .unwrap();

        assert!(matches!(
            store.lookup("rsvp"),
            Err(Error::InvalidTimestamp { .. })
        ));
    }

    #[test]
    fn test_record_over_corrupt_file_starts_fresh() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        std::fs::write(store.path(), "{not json").unwrap();

        store.record("rsvp", five_files("rsvp")).unwrap();

        let (files, _) = store.lookup("rsvp").unwrap();
        assert_eq!(files.len(), 5);
    }

    #[test]
    fn test_forget_removes_only_named_entry() {
        let temp = TempDir::new().unwrap();
        let store = HistoryStore::new(temp.path());
        store.record("rsvp", five_files("rsvp")).unwrap();
        store.record("guest", five_files("guest")).unwrap();

        store.forget("RSVP").unwrap();

        assert!(matches!(store.lookup("rsvp"), Err(Error::NotFound { .. })));
        assert!(store.lookup("guest").is_ok());
    }
}
