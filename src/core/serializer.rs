//! Line-oriented interchange format for the route registry.
//!
//! Each record is `identifier|path` followed by a newline, in registry
//! order. The format is internal to the pipeline and carries no header.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use serde::Serialize;

use super::registry::{RouteEntry, RouteRegistry};

pub const DELIMITER: char = '|';

/// A registry entry that cannot be represented in the record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelimiterCollision {
    pub identifier: String,
    pub path: String,
    pub field: &'static str,
}

impl std::fmt::Display for DelimiterCollision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of \"{}\" -> \"{}\" contains the record delimiter '{}' or a line break",
            self.field, self.identifier, self.path, DELIMITER
        )
    }
}

/// Serialized records plus the entries that had to be left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serialized {
    pub text: String,
    pub rejected: Vec<DelimiterCollision>,
}

fn is_reserved(c: char) -> bool {
    c == DELIMITER || c == '\n' || c == '\r'
}

pub fn encode_entry(entry: &RouteEntry) -> std::result::Result<String, DelimiterCollision> {
    let collision = |field| DelimiterCollision {
        identifier: entry.identifier.clone(),
        path: entry.path.clone(),
        field,
    };
    if entry.identifier.contains(is_reserved) {
        return Err(collision("identifier"));
    }
    if entry.path.contains(is_reserved) {
        return Err(collision("path"));
    }
    Ok(format!("{}{}{}\n", entry.identifier, DELIMITER, entry.path))
}

/// Encode every entry; colliding entries are rejected one by one.
pub fn serialize(registry: &RouteRegistry) -> Serialized {
    let mut serialized = Serialized::default();
    for entry in registry.iter() {
        match encode_entry(entry) {
            Ok(line) => serialized.text.push_str(&line),
            Err(collision) => serialized.rejected.push(collision),
        }
    }
    serialized
}

/// Parse records back into a registry. Any malformed line fails the whole
/// read, naming its line number.
pub fn deserialize(text: &str) -> Result<RouteRegistry> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let Some((identifier, path)) = line.split_once(DELIMITER) else {
            bail!("Line {}: missing '{}' delimiter", index + 1, DELIMITER);
        };
        if identifier.is_empty() || path.is_empty() {
            bail!("Line {}: empty identifier or path", index + 1);
        }
        if path.contains(DELIMITER) {
            bail!("Line {}: more than one '{}' delimiter", index + 1, DELIMITER);
        }
        entries.push(RouteEntry::new(identifier, path));
    }

    RouteRegistry::try_from_entries(entries).context("Registry records are inconsistent")
}

pub fn write_registry(path: &Path, registry: &RouteRegistry) -> Result<Serialized> {
    let serialized = serialize(registry);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, &serialized.text)
        .with_context(|| format!("Failed to write registry file: {}", path.display()))?;
    Ok(serialized)
}

pub fn read_registry(path: &Path) -> Result<RouteRegistry> {
    let text = fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read registry file: {} (run `routegen scan` first)",
            path.display()
        )
    })?;
    deserialize(&text).with_context(|| format!("Failed to parse registry file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn registry(pairs: &[(&str, &str)]) -> RouteRegistry {
        RouteRegistry::try_from_entries(
            pairs
                .iter()
                .map(|(identifier, path)| RouteEntry::new(*identifier, *path))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_serialize_round_trip() {
        let original = registry(&[
            ("ToolsCalcPage", "/tools/calc"),
            ("GuidePage", "/guides/zs?ref=nav&x=1"),
            ("HomePage", "/"),
        ]);

        let serialized = serialize(&original);

        assert!(serialized.rejected.is_empty());
        assert_eq!(
            serialized.text,
            "HomePage|/\nGuidePage|/guides/zs?ref=nav&x=1\nToolsCalcPage|/tools/calc\n"
        );
        assert_eq!(deserialize(&serialized.text).unwrap(), original);
    }

    #[test]
    fn test_collision_rejects_only_that_record() {
        let original = registry(&[("Good", "/good"), ("Bad", "/a|b"), ("Odd|Name", "/odd")]);

        let serialized = serialize(&original);

        assert_eq!(serialized.text, "Good|/good\n");
        assert_eq!(
            serialized.rejected,
            vec![
                DelimiterCollision {
                    identifier: "Bad".to_string(),
                    path: "/a|b".to_string(),
                    field: "path",
                },
                DelimiterCollision {
                    identifier: "Odd|Name".to_string(),
                    path: "/odd".to_string(),
                    field: "identifier",
                },
            ]
        );
    }

    #[test]
    fn test_line_breaks_collide() {
        let entry = RouteEntry::new("Page", "/a\nb");
        assert_eq!(encode_entry(&entry).unwrap_err().field, "path");
    }

    #[test]
    fn test_deserialize_rejects_malformed_lines() {
        let err = deserialize("Good|/good\nnodelimiter\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"));

        assert!(deserialize("|/empty-identifier\n").is_err());
        assert!(deserialize("Page|/a|b\n").is_err());
        assert!(deserialize("A|/same\nB|/same\n").is_err());
    }

    #[test]
    fn test_deserialize_empty_text() {
        assert!(deserialize("").unwrap().is_empty());
    }

    #[test]
    fn test_write_and_read_registry_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".routegen").join("routes.txt");
        let original = registry(&[("A", "/a"), ("B", "/b")]);

        write_registry(&path, &original).unwrap();

        assert_eq!(read_registry(&path).unwrap(), original);
    }

    #[test]
    fn test_read_missing_registry_mentions_scan() {
        let dir = tempdir().unwrap();
        let err = read_registry(&dir.path().join("routes.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("routegen scan"));
    }
}
