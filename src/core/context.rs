use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        inventory::{ExistingRouteSet, InventoryReader},
        registry::{RegistryBuild, RegistryBuilder},
        scanner::{PageRecord, PageScanner, ScanWarning, Strategy},
    },
};

/// Everything learned from one scan of the page directory and router.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteScan {
    pub files_scanned: usize,
    /// Pages recovered per extraction strategy.
    pub by_strategy: BTreeMap<Strategy, usize>,
    /// Identifiers of pages with no recoverable path.
    pub unknown: Vec<String>,
    pub warnings: Vec<ScanWarning>,
    pub inventory_entries: usize,
    #[serde(flatten)]
    pub build: RegistryBuild,
}

/// Configuration and project root shared by every command.
///
/// Configuration priority, highest first:
/// 1. CLI arguments (e.g. `--pages-dir`)
/// 2. `.routegenrc.json`
/// 3. Built-in defaults
pub struct RunContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub verbose: bool,
}

impl RunContext {
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let verbose = common_args.verbose;
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if verbose && !config_result.from_file {
            eprintln!(
                "Note: No {} found, using default configuration",
                CONFIG_FILE_NAME
            );
        }

        let mut config = config_result.config;
        if let Some(ref pages_dir) = common_args.pages_dir {
            config.pages_dir = pages_dir.to_string_lossy().to_string();
        }
        if let Some(ref router_source) = common_args.router_source {
            config.router_source = router_source.to_string_lossy().to_string();
        }

        Ok(Self {
            config,
            root_dir,
            verbose,
        })
    }

    pub fn from_config(config: Config, root_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root_dir: root_dir.into(),
            verbose: false,
        }
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir.join(path)
        }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.resolve(&self.config.registry_file)
    }

    fn read_router_source(&self) -> Result<String> {
        let path = self.resolve(&self.config.router_source);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read router source: {}", path.display()))
    }

    /// Scan the page directory and router, then build the registry.
    ///
    /// A missing page directory or router source aborts the scan; unreadable
    /// page files are collected as warnings.
    pub fn scan(&self) -> Result<RouteScan> {
        let scanner = PageScanner::from_config(&self.config)?;
        let pages_dir = self.resolve(&self.config.pages_dir);

        let mut pages: Vec<PageRecord> = Vec::new();
        let mut warnings = Vec::new();
        for item in scanner.scan(&pages_dir)? {
            match item {
                Ok(page) => pages.push(page),
                Err(warning) => {
                    if self.verbose {
                        eprintln!(
                            "{} Cannot read {}: {}",
                            "warning:".bold().yellow(),
                            warning.file_path,
                            warning.error
                        );
                    }
                    warnings.push(warning);
                }
            }
        }

        let reader = InventoryReader::from_config(&self.config)?;
        let inventory = reader.read(&self.read_router_source()?);

        let mut by_strategy = BTreeMap::new();
        let mut unknown = Vec::new();
        for page in &pages {
            // An empty declared path recovers nothing
            match page.route.as_ref().filter(|route| !route.path.is_empty()) {
                Some(route) => *by_strategy.entry(route.strategy).or_insert(0) += 1,
                None => unknown.push(page.identifier.clone()),
            }
        }

        let build = RegistryBuilder::new().build(&pages, &inventory);

        Ok(RouteScan {
            files_scanned: pages.len() + warnings.len(),
            by_strategy,
            unknown,
            warnings,
            inventory_entries: inventory.len(),
            build,
        })
    }

    /// Paths declared by the router, plus the configured and extra path lists.
    pub fn existing_routes(&self, extra_list: Option<&Path>) -> Result<ExistingRouteSet> {
        let mut existing = ExistingRouteSet::from_router_source(&self.read_router_source()?);

        let configured = self
            .config
            .existing_routes_file
            .as_ref()
            .map(|p| self.resolve(p));
        for list in configured.iter().map(PathBuf::as_path).chain(extra_list) {
            let text = fs::read_to_string(list)
                .with_context(|| format!("Failed to read existing routes: {}", list.display()))?;
            existing.merge(ExistingRouteSet::from_path_list(&text));
        }

        Ok(existing)
    }
}
