//! Common utility functions shared across the codebase.

use std::{fs, path::Path};

use anyhow::{Context, Result};

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Creates missing parent directories. Returns whether the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if fs::read_to_string(path).is_ok_and(|current| current == content) {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(true)
}

/// `"1 route"`, `"2 routes"`.
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use crate::utils::*;

    #[test]
    fn test_write_if_changed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("routes.tsx");

        assert!(write_if_changed(&path, "a").unwrap());
        assert!(!write_if_changed(&path, "a").unwrap());
        assert!(write_if_changed(&path, "b").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "b");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "1 file");
        assert_eq!(plural(0, "file", "files"), "0 files");
        assert_eq!(plural(3, "entry", "entries"), "3 entries");
    }
}
