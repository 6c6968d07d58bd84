use std::path::PathBuf;

use crate::core::{DelimiterCollision, RouteScan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Scan,
    Routes,
    Sitemap,
    All,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Scan(ScanSummary),
    Routes(RoutesSummary),
    Sitemap(SitemapSummary),
    All {
        scan: ScanSummary,
        routes: RoutesSummary,
        sitemap: SitemapSummary,
    },
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ScanSummary {
    pub scan: RouteScan,
    pub pages_dir: PathBuf,
    pub registry_file: PathBuf,
    /// Entries left out of the registry file.
    pub rejected: Vec<DelimiterCollision>,
    /// Number of entries written to the registry file.
    pub registry_size: usize,
    pub json: bool,
}

#[derive(Debug)]
pub struct RoutesSummary {
    pub registry_size: usize,
    pub existing_count: usize,
    pub route_count: usize,
    /// `None` when the module went to stdout.
    pub output: Option<PathBuf>,
    pub written: bool,
    pub source: String,
}

#[derive(Debug)]
pub struct SitemapSummary {
    pub output_dir: PathBuf,
    /// `(file name, url count)` per emitted document, index last with 0 urls.
    pub files: Vec<(String, usize)>,
    pub url_count: usize,
    pub excluded: Vec<String>,
    pub written_count: usize,
    /// Category sitemaps deleted because the category is now empty.
    pub removed: Vec<String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running routegen commands
#[derive(Debug)]
pub struct CommandResult {
    pub kind: CommandKind,
    pub summary: CommandSummary,
    /// Records that could not be carried through the pipeline.
    pub error_count: usize,
    pub verbose: bool,
}
