//! Sitemap generator.
//!
//! Partitions registry paths into categories by URL prefix and renders one
//! sitemap-protocol `<urlset>` per non-empty category plus a
//! `<sitemapindex>` referencing them. Static paths always land in the
//! `pages` document. Paths that match no category are left out.

use std::{collections::HashSet, fmt::Write};

use chrono::NaiveDate;
use quick_xml::escape::escape;
use serde::Serialize;

use crate::config::SitemapConfig;

pub const STATIC_CATEGORY: &str = "pages";

const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapUrl {
    pub path: String,
    pub loc: String,
    pub changefreq: String,
    pub priority: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapDocument {
    pub category: String,
    pub file_name: String,
    pub urls: Vec<SitemapUrl>,
    #[serde(skip)]
    pub xml: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapSet {
    pub documents: Vec<SitemapDocument>,
    pub index_file_name: String,
    #[serde(skip)]
    pub index_xml: String,
    /// Registry paths that matched no category.
    pub excluded: Vec<String>,
}

impl SitemapSet {
    pub fn url_count(&self) -> usize {
        self.documents.iter().map(|d| d.urls.len()).sum()
    }

    pub fn document(&self, category: &str) -> Option<&SitemapDocument> {
        self.documents.iter().find(|d| d.category == category)
    }

    /// File names of configured categories that produced no document.
    pub fn omitted_file_names(&self, config: &SitemapConfig) -> Vec<String> {
        std::iter::once(STATIC_CATEGORY)
            .chain(config.categories.iter().map(|c| c.name.as_str()))
            .filter(|category| self.document(category).is_none())
            .map(sitemap_file_name)
            .collect()
    }
}

pub fn sitemap_file_name(category: &str) -> String {
    format!("sitemap-{}.xml", category)
}

/// Build the sitemap set. `today` is used as every `<lastmod>`.
pub fn generate_sitemaps<'a>(
    paths: impl IntoIterator<Item = &'a str>,
    config: &SitemapConfig,
    today: NaiveDate,
) -> SitemapSet {
    let site_url = config.site_url.trim_end_matches('/');
    let lastmod = today.format("%Y-%m-%d").to_string();
    let url = |path: &str, changefreq: &str| SitemapUrl {
        path: path.to_string(),
        loc: format!("{}{}", site_url, path),
        changefreq: changefreq.to_string(),
        priority: config
            .priority_overrides
            .get(path)
            .copied()
            .unwrap_or(config.default_priority),
    };

    let mut seen_static = HashSet::new();
    let static_urls: Vec<SitemapUrl> = config
        .static_paths
        .iter()
        .filter(|path| seen_static.insert(path.as_str()))
        .map(|path| url(path, &config.static_changefreq))
        .collect();

    let mut buckets: Vec<Vec<SitemapUrl>> = vec![Vec::new(); config.categories.len()];
    let mut excluded = Vec::new();
    for path in paths {
        if seen_static.contains(path) {
            continue;
        }
        match config
            .categories
            .iter()
            .position(|c| path.starts_with(&c.prefix))
        {
            Some(index) => {
                buckets[index].push(url(path, &config.categories[index].changefreq));
            }
            None => excluded.push(path.to_string()),
        }
    }

    let categories = std::iter::once((STATIC_CATEGORY, static_urls)).chain(
        config
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .zip(buckets),
    );

    let documents: Vec<SitemapDocument> = categories
        .filter(|(_, urls)| !urls.is_empty())
        .map(|(category, mut urls)| {
            urls.sort_by(|a, b| a.path.cmp(&b.path));
            let xml = render_urlset(&urls, &lastmod);
            SitemapDocument {
                category: category.to_string(),
                file_name: sitemap_file_name(category),
                urls,
                xml,
            }
        })
        .collect();

    let index_locs: Vec<String> = documents
        .iter()
        .map(|d| format!("{}/{}", site_url, d.file_name))
        .collect();

    SitemapSet {
        index_xml: render_index(&index_locs, &lastmod),
        index_file_name: config.index_file_name.clone(),
        documents,
        excluded,
    }
}

fn render_urlset(urls: &[SitemapUrl], lastmod: &str) -> String {
    let mut xml = String::new();
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(xml, r#"<urlset xmlns="{}">"#, SITEMAP_NAMESPACE);
    for url in urls {
        let _ = writeln!(xml, "  <url>");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(&url.loc));
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod);
        let _ = writeln!(
            xml,
            "    <changefreq>{}</changefreq>",
            escape(&url.changefreq)
        );
        let _ = writeln!(xml, "    <priority>{:.1}</priority>", url.priority);
        let _ = writeln!(xml, "  </url>");
    }
    let _ = writeln!(xml, "</urlset>");
    xml
}

fn render_index(locs: &[String], lastmod: &str) -> String {
    let mut xml = String::new();
    let _ = writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(xml, r#"<sitemapindex xmlns="{}">"#, SITEMAP_NAMESPACE);
    for loc in locs {
        let _ = writeln!(xml, "  <sitemap>");
        let _ = writeln!(xml, "    <loc>{}</loc>", escape(loc));
        let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod);
        let _ = writeln!(xml, "  </sitemap>");
    }
    let _ = writeln!(xml, "</sitemapindex>");
    xml
}
