//! File system utilities.

use crate::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a JSON file, or return the default value when it does not exist.
pub fn read_json_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content)
        .map_err(|e| crate::Error::InvalidStateFile(format!("{}: {}", path.display(), e)))
}

/// Write a value as pretty JSON, keeping the previous file as `.backup`.
pub fn write_json_with_backup<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Backup existing file
    if path.exists() {
        let backup_path = path.with_extension("json.backup");
        fs::copy(path, &backup_path)?;
    }

    // Write to a sibling file first so a crash never leaves half a file.
    let tmp_path = path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(value)?;
    fs::write(&tmp_path, content)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_default() {
        let dir = TempDir::new().unwrap();
        let value: Vec<String> = read_json_or_default(&dir.path().join("none.json")).unwrap();
        assert!(value.is_empty());
    }

    #[test]
    fn test_write_keeps_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.json");

        write_json_with_backup(&path, &vec!["a"]).unwrap();
        write_json_with_backup(&path, &vec!["a", "b"]).unwrap();

        let current: Vec<String> = read_json_or_default(&path).unwrap();
        let backup: Vec<String> =
            read_json_or_default(&path.with_extension("json.backup")).unwrap();
        assert_eq!(current, vec!["a", "b"]);
        assert_eq!(backup, vec!["a"]);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let result: Result<Vec<String>> = read_json_or_default(&path);
        assert!(matches!(result, Err(crate::Error::InvalidStateFile(_))));
    }
}
