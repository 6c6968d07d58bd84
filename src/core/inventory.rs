//! Router inventory.
//!
//! Reads the router source as text and recovers which page each lazily
//! imported route renders, plus the set of every path the router already
//! declares.

use std::{
    collections::{BTreeSet, HashMap},
    sync::LazyLock,
};

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;

use super::scanner::balanced_span;
use crate::config::Config;

static PATH_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bpath\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)')"#).unwrap());

/// A page the router mounts through a lazy import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryEntry {
    /// Page identifier, as named by the import specifier.
    pub identifier: String,
    /// Local binding in the router source.
    pub alias: String,
    pub path: String,
}

/// Start of a `const X = lazy(` declaration; the match ends on the `(`.
static LAZY_DECLARATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bconst\s+([A-Za-z_$][\w$]*)\s*=\s*lazy\s*\(").unwrap());

/// A dynamic `import("specifier")` call with a literal specifier.
static IMPORT_CALL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport\(\s*(?:"([^"\n]+)"|'([^'\n]+)'|`([^`$\n]+)`)\s*\)"#).unwrap()
});

#[derive(Debug, Clone)]
pub struct InventoryReader {
    import_prefix: String,
    route: Regex,
}

impl InventoryReader {
    /// `import_prefix` is the specifier prefix of the page directory,
    /// `boundary` the component wrapping each lazily rendered page.
    pub fn new(import_prefix: &str, boundary: &str) -> Result<Self> {
        let route = format!(
            r#"\bpath\s*=\s*["']([^"'\n]*)["']\s*element\s*=\s*\{{\s*<{b}\s*>\s*<([A-Za-z_$][\w$]*)\s*/>\s*</{b}\s*>"#,
            b = regex::escape(boundary)
        );

        Ok(Self {
            import_prefix: import_prefix.to_string(),
            route: Regex::new(&route).context("Failed to build route declaration pattern")?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.page_import_prefix, &config.lazy_boundary)
    }

    /// The page file named by an import specifier, if it points directly
    /// into the page directory.
    fn page_name<'a>(&self, specifier: &'a str) -> Option<&'a str> {
        specifier
            .strip_prefix(self.import_prefix.as_str())
            .filter(|name| !name.is_empty() && !name.contains('/'))
    }

    /// Join lazy imports with the routes that render them, in route order.
    ///
    /// Routes whose alias has no matching import are skipped. An empty
    /// result is valid.
    pub fn read(&self, source: &str) -> Vec<InventoryEntry> {
        let mut imports: HashMap<&str, &str> = HashMap::new();
        for caps in LAZY_DECLARATION_REGEX.captures_iter(source) {
            let (Some(alias), Some(whole)) = (caps.get(1), caps.get(0)) else {
                continue;
            };
            // Only the lazy call's own argument names the imported page
            let Some(call) = balanced_span(source, whole.end() - 1, b'(', b')') else {
                continue;
            };
            let specifier = IMPORT_CALL_REGEX
                .captures(call)
                .and_then(|c| c.get(1).or(c.get(2)).or(c.get(3)));
            if let Some(identifier) = specifier.and_then(|m| self.page_name(m.as_str())) {
                imports.entry(alias.as_str()).or_insert(identifier);
            }
        }

        self.route
            .captures_iter(source)
            .filter_map(|caps| {
                let path = caps.get(1)?.as_str();
                let alias = caps.get(2)?.as_str();
                let identifier = imports.get(alias)?;
                Some(InventoryEntry {
                    identifier: identifier.to_string(),
                    alias: alias.to_string(),
                    path: path.to_string(),
                })
            })
            .collect()
    }
}

/// Paths already wired into the router. Used only as a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingRouteSet {
    paths: BTreeSet<String>,
}

impl ExistingRouteSet {
    /// Every `path="..."` attribute in a router source.
    pub fn from_router_source(source: &str) -> Self {
        let paths = PATH_ATTRIBUTE_REGEX
            .captures_iter(source)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .collect();
        Self { paths }
    }

    /// One path per line; blank lines and `#` comments are skipped.
    pub fn from_path_list(text: &str) -> Self {
        let paths = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect();
        Self { paths }
    }

    pub fn merge(&mut self, other: ExistingRouteSet) {
        self.paths.extend(other.paths);
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExistingRouteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}
