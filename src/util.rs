//! Utility functions for Chairside.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ChairsideError, Result};

/// Maximum input file size that can be read into memory (10 MB).
///
/// A year of daily activity for one profile is a few hundred kilobytes.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a file into a string, refusing files over `MAX_FILE_SIZE`.
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    read_to_string_with_limit(path, MAX_FILE_SIZE)
}

/// Read a file into a string with a custom size limit.
///
/// # Errors
///
/// Returns a storage error if the file cannot be read or exceeds `max_size`.
pub fn read_to_string_with_limit(path: &Path, max_size: u64) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| ChairsideError::storage(path, e))?;

    let size = metadata.len();
    if size > max_size {
        return Err(ChairsideError::storage(
            path,
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("file is too large ({} bytes, max {} bytes)", size, max_size),
            ),
        ));
    }

    fs::read_to_string(path).map_err(|e| ChairsideError::storage(path, e))
}

/// Read and deserialize a JSON file.
///
/// Parse errors name the file they came from.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_to_string_limited(path)?;
    serde_json::from_str(&content)
        .map_err(|e| ChairsideError::serde(format!("{}: {}", path.display(), e)))
}

/// Serialize a value as pretty JSON and write it via temp file + rename.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let temp_path = path.with_file_name(format!(".{}.tmp", file_name));

    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| ChairsideError::storage(&temp_path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| ChairsideError::storage(&temp_path, e))?;
        file.sync_all()
            .map_err(|e| ChairsideError::storage(&temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| ChairsideError::storage(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_atomic() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.json");

        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();

        let back: Vec<i32> = read_json(&path).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
        assert!(!temp.path().join(".out.json.tmp").exists());
    }

    #[test]
    fn test_read_to_string_limited_success() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("profile.json");
        fs::write(&path, "{}").unwrap();

        assert_eq!(read_to_string_limited(&path).unwrap(), "{}");
    }

    #[test]
    fn test_read_to_string_limited_nonexistent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");

        let err = read_to_string_limited(&path).unwrap_err();
        assert!(matches!(err, ChairsideError::Storage { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_read_to_string_with_limit_exceeds() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("large.json");

        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[b'x'; 1000]).unwrap();

        let err = read_to_string_with_limit(&path, 500).unwrap_err().to_string();
        assert!(err.contains("too large"));
        assert!(err.contains("1000 bytes"));
        assert!(err.contains("max 500 bytes"));
    }

    #[test]
    fn test_read_to_string_with_limit_at_boundary() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("boundary.json");
        fs::write(&path, "x".repeat(100)).unwrap();

        assert!(read_to_string_with_limit(&path, 100).is_ok());
        assert!(read_to_string_with_limit(&path, 99).is_err());
    }

    #[test]
    fn test_read_json_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, ChairsideError::Serde { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
