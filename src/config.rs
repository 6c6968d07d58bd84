use std::{
    collections::{BTreeMap, HashSet},
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".routegenrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the page files, relative to the project root.
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,
    #[serde(default = "default_page_extension")]
    pub page_extension: String,
    /// Glob patterns matched against page file names.
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_router_source")]
    pub router_source: String,
    /// Import specifier prefix under which the router lazily imports pages.
    #[serde(default = "default_page_import_prefix")]
    pub page_import_prefix: String,
    #[serde(default = "default_lazy_boundary")]
    pub lazy_boundary: String,
    #[serde(default = "default_lazy_boundary_import")]
    pub lazy_boundary_import: String,
    #[serde(default = "default_path_constant")]
    pub path_constant: String,
    #[serde(default = "default_template_components")]
    pub template_components: Vec<String>,
    #[serde(default = "default_template_path_prop")]
    pub template_path_prop: String,
    #[serde(default = "default_breadcrumbs_name")]
    pub breadcrumbs_name: String,
    /// Number of leading characters searched for inline breadcrumb props.
    #[serde(default = "default_inline_breadcrumb_window")]
    pub inline_breadcrumb_window: usize,
    #[serde(default = "default_registry_file")]
    pub registry_file: String,
    /// Optional newline-separated list of paths already wired elsewhere.
    #[serde(default)]
    pub existing_routes_file: Option<String>,
    #[serde(default)]
    pub route_module: RouteModuleConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteModuleConfig {
    pub output: String,
    pub function_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SitemapConfig {
    pub site_url: String,
    pub output_dir: String,
    pub index_file_name: String,
    /// Paths always listed in the `pages` sitemap, in this order.
    pub static_paths: Vec<String>,
    pub static_changefreq: String,
    /// Ordered; the first matching prefix wins.
    pub categories: Vec<CategoryConfig>,
    pub priority_overrides: BTreeMap<String, f64>,
    pub default_priority: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub name: String,
    pub prefix: String,
    #[serde(default = "default_changefreq")]
    pub changefreq: String,
}

fn default_pages_dir() -> String {
    "src/pages/seo".to_string()
}

fn default_page_extension() -> String {
    "tsx".to_string()
}

fn default_router_source() -> String {
    "src/routes/SEORoutes.tsx".to_string()
}

fn default_page_import_prefix() -> String {
    "@/pages/seo/".to_string()
}

fn default_lazy_boundary() -> String {
    "LazyRoute".to_string()
}

fn default_lazy_boundary_import() -> String {
    "@/components/LazyRoute".to_string()
}

fn default_path_constant() -> String {
    "PAGE_PATH".to_string()
}

fn default_template_components() -> Vec<String> {
    [
        "SEOTemplate",
        "GuideTemplate",
        "ToolTemplate",
        "ComparisonTemplate",
        "CourseTemplate",
    ]
    .map(String::from)
    .to_vec()
}

fn default_template_path_prop() -> String {
    "pagePath".to_string()
}

fn default_breadcrumbs_name() -> String {
    "breadcrumbs".to_string()
}

fn default_inline_breadcrumb_window() -> usize {
    4000
}

fn default_registry_file() -> String {
    ".routegen/routes.txt".to_string()
}

fn default_changefreq() -> String {
    "weekly".to_string()
}

impl Default for RouteModuleConfig {
    fn default() -> Self {
        Self {
            output: "src/routes/GeneratedRoutes.tsx".to_string(),
            function_name: "getGeneratedRoutes".to_string(),
        }
    }
}

impl Default for SitemapConfig {
    fn default() -> Self {
        let category = |name: &str, prefix: &str, changefreq: &str| CategoryConfig {
            name: name.to_string(),
            prefix: prefix.to_string(),
            changefreq: changefreq.to_string(),
        };
        Self {
            site_url: "https://example.com".to_string(),
            output_dir: "public".to_string(),
            index_file_name: "sitemap.xml".to_string(),
            static_paths: ["/", "/pricing", "/features", "/about", "/contact"]
                .map(String::from)
                .to_vec(),
            static_changefreq: default_changefreq(),
            categories: vec![
                category("tools", "/tools/", "weekly"),
                category("guides", "/guides/", "monthly"),
                category("training", "/training/", "monthly"),
                category("compare", "/compare/", "monthly"),
            ],
            priority_overrides: [("/", 1.0), ("/pricing", 0.9), ("/features", 0.9)]
                .into_iter()
                .map(|(path, priority)| (path.to_string(), priority))
                .collect(),
            default_priority: 0.7,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            page_extension: default_page_extension(),
            ignores: Vec::new(),
            router_source: default_router_source(),
            page_import_prefix: default_page_import_prefix(),
            lazy_boundary: default_lazy_boundary(),
            lazy_boundary_import: default_lazy_boundary_import(),
            path_constant: default_path_constant(),
            template_components: default_template_components(),
            template_path_prop: default_template_path_prop(),
            breadcrumbs_name: default_breadcrumbs_name(),
            inline_breadcrumb_window: default_inline_breadcrumb_window(),
            registry_file: default_registry_file(),
            existing_routes_file: None,
            route_module: RouteModuleConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error naming the offending key for the first invalid value.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        if self.page_extension.is_empty() || self.page_extension.starts_with('.') {
            bail!(
                "'pageExtension' must be a bare extension like \"tsx\", got \"{}\"",
                self.page_extension
            );
        }

        for (key, value) in [
            ("pathConstant", &self.path_constant),
            ("templatePathProp", &self.template_path_prop),
            ("breadcrumbsName", &self.breadcrumbs_name),
            ("lazyBoundary", &self.lazy_boundary),
            ("routeModule.functionName", &self.route_module.function_name),
        ] {
            if !is_identifier(value) {
                bail!("'{}' must be an identifier, got \"{}\"", key, value);
            }
        }
        for component in &self.template_components {
            if !is_identifier(component) {
                bail!(
                    "Invalid component name in 'templateComponents': \"{}\"",
                    component
                );
            }
        }

        self.sitemap.validate()
    }
}

impl SitemapConfig {
    fn validate(&self) -> Result<()> {
        if !(self.site_url.starts_with("http://") || self.site_url.starts_with("https://")) {
            bail!(
                "'sitemap.siteUrl' must start with http:// or https://, got \"{}\"",
                self.site_url
            );
        }

        let mut names = HashSet::new();
        let mut prefixes = HashSet::new();
        for category in &self.categories {
            if category.name.is_empty() || category.prefix.is_empty() {
                bail!("Sitemap categories need a non-empty 'name' and 'prefix'");
            }
            if category.name == "pages" {
                bail!("Sitemap category name \"pages\" is reserved for static paths");
            }
            if !names.insert(category.name.as_str()) {
                bail!("Duplicate sitemap category name: \"{}\"", category.name);
            }
            if !prefixes.insert(category.prefix.as_str()) {
                bail!("Duplicate sitemap category prefix: \"{}\"", category.prefix);
            }
        }

        for path in &self.static_paths {
            if !path.starts_with('/') {
                bail!("Static sitemap paths must start with '/', got \"{}\"", path);
            }
        }

        let priorities = self
            .priority_overrides
            .iter()
            .map(|(path, priority)| (path.as_str(), *priority))
            .chain(std::iter::once(("defaultPriority", self.default_priority)));
        for (key, priority) in priorities {
            if !(0.0..=1.0).contains(&priority) {
                bail!(
                    "Sitemap priority for \"{}\" must be within 0.0..=1.0, got {}",
                    key,
                    priority
                );
            }
        }

        Ok(())
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
