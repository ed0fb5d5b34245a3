//! Memory store — a JSON array of saved posts on disk.
//!
//! Every append reads the whole log, pushes one record and rewrites the file.
//! The rewrite goes through a temp file in the same directory followed by a
//! rename, so a reader never observes a half-written log. Single process only.
//!
//! Reads for display fall back to an empty log; appends refuse to replace a
//! log they cannot parse.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::post::MemoryRecord;

#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the log as an empty array if it does not exist yet.
    pub fn ensure_exists(&self) -> Result<(), AppError> {
        if self.path.exists() {
            return Ok(());
        }
        info!("Initializing memory log at {}", self.path.display());
        self.write_all(&[])
    }

    /// All records in append order. Any read or parse failure yields an
    /// empty log.
    pub fn load(&self) -> Vec<MemoryRecord> {
        self.read_records().unwrap_or_else(|e| {
            debug!("Memory log {} unusable: {e}", self.path.display());
            Vec::new()
        })
    }

    /// Appends one record and rewrites the log. A log that exists but does
    /// not parse is left untouched and reported as a persistence error.
    pub fn append(&self, record: MemoryRecord) -> Result<usize, AppError> {
        let mut records = self.read_records()?;
        records.push(record);
        self.write_all(&records)?;
        debug!("Memory log now holds {} records", records.len());
        Ok(records.len())
    }

    /// Strict read: absent file is an empty log, anything else must parse.
    fn read_records(&self) -> Result<Vec<MemoryRecord>, AppError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            AppError::Persistence(format!(
                "{} is not a memory record array, not overwriting: {e}",
                self.path.display()
            ))
        })
    }

    fn write_all(&self, records: &[MemoryRecord]) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| AppError::Persistence(format!("cannot serialize memory log: {e}")))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path).map_err(|e| {
            AppError::Persistence(format!("cannot replace {}: {}", self.path.display(), e.error))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> MemoryStore {
        MemoryStore::new(dir.path().join("memory.json"))
    }

    #[test]
    fn test_absent_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store_in(&dir).load().is_empty());
    }

    #[test]
    fn test_ensure_exists_writes_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.trim(), "[]");
    }

    #[test]
    fn test_ensure_exists_keeps_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(MemoryRecord::new("kept", "b")).unwrap();
        store.ensure_exists().unwrap();
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_append_then_load_returns_saved_values_last() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(MemoryRecord::new("first post", "first bullets")).unwrap();
        let count = store
            .append(MemoryRecord::new("second post 🔥", "second bullets"))
            .unwrap();
        assert_eq!(count, 2);

        let records = store.load();
        let last = records.last().unwrap();
        assert_eq!(last.post, "second post 🔥");
        assert_eq!(last.bullets, "second bullets");
        assert_eq!(records[0].post, "first post");
    }

    #[test]
    fn test_non_ascii_is_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(MemoryRecord::new("Jai Hind 🇮🇳", "b")).unwrap();
        let content = std::fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("🇮🇳"));
    }

    #[test]
    fn test_corrupt_log_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ definitely not an array").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_refuses_to_overwrite_unparseable_log() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let original = r#"[
  {"post": "kept", "bullets": "b", "timestamp": "2025-01-30T08:00:00"},
  {"post": "edited", "bullets": "b", "timestamp": "2025-01-31T09:15:02+05:30"}
]"#;
        std::fs::write(store.path(), original).unwrap();

        let err = store.append(MemoryRecord::new("new", "b")).unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), original);
        // reads still fall back silently
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_append_to_corrupt_log_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ definitely not an array").unwrap();
        assert!(store.append(MemoryRecord::new("p", "b")).is_err());
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "{ definitely not an array"
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.append(MemoryRecord::new("same", "same")).unwrap();
        store.append(MemoryRecord::new("same", "same")).unwrap();
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_append_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = MemoryStore::new(dir.path().join("nested").join("memory.json"));
        store.append(MemoryRecord::new("p", "b")).unwrap();
        assert_eq!(store.load().len(), 1);
    }
}
