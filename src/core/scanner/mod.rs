//! Page scanner.
//!
//! Walks the direct entries of a page directory and recovers each page's
//! declared path by trying an ordered list of [`PathExtractor`]s.

mod extractors;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::Serialize;
use walkdir::WalkDir;

pub use extractors::{
    BreadcrumbListExtractor, ExtractPath, InlineBreadcrumbsExtractor, PageConstantExtractor,
    PathExtractor, Strategy, TemplatePropExtractor,
};
pub(crate) use extractors::balanced_span;

use crate::config::Config;

/// A path recovered from a page file, with the convention that declared it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredRoute {
    pub path: String,
    pub strategy: Strategy,
}

/// One scanned page file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRecord {
    /// File stem, unique within one scan.
    pub identifier: String,
    pub file_path: String,
    /// `None` when no extractor matched.
    pub route: Option<DeclaredRoute>,
    pub source_size: u64,
}

impl PageRecord {
    pub fn path(&self) -> Option<&str> {
        self.route.as_ref().map(|r| r.path.as_str())
    }

    pub fn strategy(&self) -> Option<Strategy> {
        self.route.as_ref().map(|r| r.strategy)
    }
}

/// A page file that could not be read. The scan continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub file_path: String,
    pub error: String,
}

pub type ScanItem = std::result::Result<PageRecord, ScanWarning>;

#[derive(Debug, Clone)]
pub struct PageScanner {
    extractors: Vec<PathExtractor>,
    extension: String,
    ignores: Vec<Pattern>,
}

impl PageScanner {
    /// `extractors` are tried in order; the first match is authoritative.
    pub fn new(extractors: Vec<PathExtractor>, extension: impl Into<String>) -> Self {
        Self {
            extractors,
            extension: extension.into(),
            ignores: Vec::new(),
        }
    }

    pub fn with_ignores(mut self, ignores: Vec<Pattern>) -> Self {
        self.ignores = ignores;
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let ignores = config
            .ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(
            PathExtractor::default_chain(config)?,
            config.page_extension.clone(),
        )
        .with_ignores(ignores))
    }

    /// Try each extractor in order against `source`.
    pub fn extract(&self, source: &str) -> Option<DeclaredRoute> {
        self.extractors.iter().find_map(|extractor| {
            extractor.extract(source).map(|path| DeclaredRoute {
                path,
                strategy: extractor.strategy(),
            })
        })
    }

    /// Lazily scan the direct entries of `dir`, in file-name order.
    ///
    /// Fails if `dir` is missing or not a readable directory.
    pub fn scan(&self, dir: &Path) -> Result<PageScan<'_>> {
        if !dir.is_dir() {
            bail!("Page directory does not exist: {}", dir.display());
        }
        fs::read_dir(dir)
            .with_context(|| format!("Failed to read page directory: {}", dir.display()))?;

        let entries = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter();

        Ok(PageScan {
            scanner: self,
            entries,
        })
    }

    fn is_page_file(&self, path: &Path) -> bool {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return false;
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        !self.ignores.iter().any(|p| p.matches(&file_name))
    }

    fn read_page(&self, path: &Path) -> ScanItem {
        let file_path = path.to_string_lossy().to_string();
        let source = fs::read_to_string(path).map_err(|e| ScanWarning {
            file_path: file_path.clone(),
            error: e.to_string(),
        })?;
        let identifier = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        Ok(PageRecord {
            identifier,
            file_path,
            route: self.extract(&source),
            source_size: source.len() as u64,
        })
    }
}

/// Lazy sequence of scan items produced by [`PageScanner::scan`].
pub struct PageScan<'a> {
    scanner: &'a PageScanner,
    entries: walkdir::IntoIter,
}

impl Iterator for PageScan<'_> {
    type Item = ScanItem;

    fn next(&mut self) -> Option<ScanItem> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    return Some(Err(ScanWarning {
                        file_path: err
                            .path()
                            .map(Path::to_path_buf)
                            .unwrap_or_else(PathBuf::new)
                            .to_string_lossy()
                            .to_string(),
                        error: err.to_string(),
                    }));
                }
            };

            let path = entry.path();
            if path.is_file() && self.scanner.is_page_file(path) {
                return Some(self.scanner.read_page(path));
            }
        }
    }
}
