//! Persistence of the failed-files side file.
//!
//! The file's absence means the last run had no failures. Every call reads
//! or writes the file directly; nothing is cached between calls.

use crate::prelude::*;
use docgen_core::failed::{parse_records, serialize_records};
use std::fs;
use std::path::Path;

pub use docgen_core::failed::FailedFileRecord;

/// Records from the previous run. Missing or unparsable files yield none.
pub fn load(path: &Path) -> Vec<FailedFileRecord> {
    match fs::read_to_string(path) {
        Ok(content) => parse_records(&content),
        Err(_) => Vec::new(),
    }
}

/// Replace the side file with `records`, or delete it when there are none.
pub fn save(path: &Path, records: &[FailedFileRecord]) -> Result<()> {
    if records.is_empty() {
        clear(path)?;
        return Ok(());
    }

    let json = serialize_records(records).map_err(|e| eyre!(e))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// Delete the side file. Returns whether there was one to delete.
pub fn clear(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(path: &str) -> FailedFileRecord {
        FailedFileRecord {
            relative_path: path.to_string(),
            error: "boom".to_string(),
            timestamp: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load(&temp_dir.path().join("failed.json")).is_empty());
    }

    #[test]
    fn test_load_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");
        fs::write(&path, "[{oops").unwrap();

        assert!(load(&path).is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");
        let records = vec![record("a.md"), record("b/c.md")];

        save(&path, &records).unwrap();

        assert_eq!(load(&path), records);
    }

    #[test]
    fn test_save_replaces_previous_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");

        save(&path, &[record("a.md"), record("b.md")]).unwrap();
        save(&path, &[record("c.md")]).unwrap();

        assert_eq!(load(&path), vec![record("c.md")]);
    }

    #[test]
    fn test_save_empty_deletes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");
        save(&path, &[record("a.md")]).unwrap();

        save(&path, &[]).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_save_empty_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");

        save(&path, &[]).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_clear_reports_deletion() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("failed.json");
        fs::write(&path, "[]").unwrap();

        assert!(clear(&path).unwrap());
        assert!(!clear(&path).unwrap());
    }
}
