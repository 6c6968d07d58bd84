//! Path extractors.
//!
//! Each extractor recognizes one authoring convention for declaring a page's
//! mount path and maps the page source text to an optional path. Extractors
//! are pure and know nothing about each other; priority between them is the
//! order in which the [`PageScanner`](super::PageScanner) receives them.

use std::{fmt, sync::LazyLock};

use anyhow::{Context, Result};
use enum_dispatch::enum_dispatch;
use regex::{Captures, Regex};
use serde::Serialize;

use crate::config::Config;

/// `href: "/x"`, `href: '/x'`, `"href": "/x"` or a template literal without
/// substitutions.
static HREF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']?\bhref["']?\s*:\s*(?:"([^"\n]*)"|'([^'\n]*)'|`([^`$\n]*)`)"#).unwrap()
});

/// Which convention declared a page's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    PageConstant,
    TemplateProp,
    BreadcrumbList,
    InlineBreadcrumbs,
}

impl Strategy {
    /// All strategies, in default priority order.
    pub fn all() -> [Self; 4] {
        [
            Self::PageConstant,
            Self::TemplateProp,
            Self::BreadcrumbList,
            Self::InlineBreadcrumbs,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PageConstant => "page-constant",
            Self::TemplateProp => "template-prop",
            Self::BreadcrumbList => "breadcrumb-list",
            Self::InlineBreadcrumbs => "inline-breadcrumbs",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recover a declared path from page source text.
#[enum_dispatch]
pub trait ExtractPath {
    fn strategy(&self) -> Strategy;

    /// Returns `None` when the convention does not occur in `source`.
    /// An empty literal is returned as `Some("")`.
    fn extract(&self, source: &str) -> Option<String>;
}

/// The closed set of supported conventions.
#[enum_dispatch(ExtractPath)]
#[derive(Debug, Clone)]
pub enum PathExtractor {
    PageConstant(PageConstantExtractor),
    TemplateProp(TemplatePropExtractor),
    BreadcrumbList(BreadcrumbListExtractor),
    InlineBreadcrumbs(InlineBreadcrumbsExtractor),
}

impl PathExtractor {
    /// Build the default extractor chain, highest priority first.
    pub fn default_chain(config: &Config) -> Result<Vec<Self>> {
        Ok(vec![
            PageConstantExtractor::new(&config.path_constant)?.into(),
            TemplatePropExtractor::new(&config.template_components, &config.template_path_prop)?
                .into(),
            BreadcrumbListExtractor::new(&config.breadcrumbs_name)?.into(),
            InlineBreadcrumbsExtractor::new(
                &config.breadcrumbs_name,
                config.inline_breadcrumb_window,
            )?
            .into(),
        ])
    }
}

// ============================================================
// Page constant
// ============================================================

/// Top-level `const NAME = "/path"`, optionally exported and typed.
#[derive(Debug, Clone)]
pub struct PageConstantExtractor {
    pattern: Regex,
}

impl PageConstantExtractor {
    pub fn new(name: &str) -> Result<Self> {
        let pattern = format!(
            r#"(?m)^(?:export[ \t]+)?const[ \t]+{}[ \t]*(?::[^=\n]+)?=[ \t]*(?:"([^"\n]*)"|'([^'\n]*)'|`([^`$\n]*)`)"#,
            regex::escape(name)
        );
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Failed to build page constant pattern for \"{}\"", name))?;
        Ok(Self { pattern })
    }
}

impl ExtractPath for PageConstantExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::PageConstant
    }

    fn extract(&self, source: &str) -> Option<String> {
        self.pattern
            .captures(source)
            .and_then(|caps| first_group(&caps))
    }
}

// ============================================================
// Template prop
// ============================================================

/// `<GuideTemplate pagePath="/path">` on one of the known template components.
#[derive(Debug, Clone)]
pub struct TemplatePropExtractor {
    /// `None` when no template components are configured.
    pattern: Option<Regex>,
}

impl TemplatePropExtractor {
    pub fn new(components: &[String], prop: &str) -> Result<Self> {
        if components.is_empty() {
            return Ok(Self { pattern: None });
        }

        let alternatives = components
            .iter()
            .map(|c| regex::escape(c))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            r#"<(?:{})\b[^>]*?\s{}\s*=\s*(?:"([^"\n]*)"|'([^'\n]*)'|\{{\s*["'`]([^"'`$\n]*)["'`]\s*\}})"#,
            alternatives,
            regex::escape(prop)
        );
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Failed to build template prop pattern for \"{}\"", prop))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }
}

impl ExtractPath for TemplatePropExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::TemplateProp
    }

    fn extract(&self, source: &str) -> Option<String> {
        self.pattern
            .as_ref()?
            .captures(source)
            .and_then(|caps| first_group(&caps))
    }
}

// ============================================================
// Breadcrumb list
// ============================================================

/// `const breadcrumbs = [{ href: "/a" }, { href: "/a/b" }]`; the last href wins.
#[derive(Debug, Clone)]
pub struct BreadcrumbListExtractor {
    start: Regex,
}

impl BreadcrumbListExtractor {
    pub fn new(name: &str) -> Result<Self> {
        let start = format!(r"\b{}\s*(?::[^=\n]*)?=\s*\[", regex::escape(name));
        let start = Regex::new(&start)
            .with_context(|| format!("Failed to build breadcrumb list pattern for \"{}\"", name))?;
        Ok(Self { start })
    }
}

impl ExtractPath for BreadcrumbListExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::BreadcrumbList
    }

    fn extract(&self, source: &str) -> Option<String> {
        let found = self.start.find(source)?;
        let list = balanced_brackets(source, found.end() - 1)?;
        last_href(list)
    }
}

// ============================================================
// Inline breadcrumbs
// ============================================================

/// `breadcrumbs={[ ... ]}` prop literal within the leading window of the file.
#[derive(Debug, Clone)]
pub struct InlineBreadcrumbsExtractor {
    start: Regex,
    window: usize,
}

impl InlineBreadcrumbsExtractor {
    pub fn new(name: &str, window: usize) -> Result<Self> {
        let start = format!(r"\b{}\s*=\s*\{{\s*\[", regex::escape(name));
        let start = Regex::new(&start).with_context(|| {
            format!("Failed to build inline breadcrumb pattern for \"{}\"", name)
        })?;
        Ok(Self { start, window })
    }
}

impl ExtractPath for InlineBreadcrumbsExtractor {
    fn strategy(&self) -> Strategy {
        Strategy::InlineBreadcrumbs
    }

    fn extract(&self, source: &str) -> Option<String> {
        let head = leading_chars(source, self.window);
        let found = self.start.find(head)?;
        let list = balanced_brackets(head, found.end() - 1)?;
        last_href(list)
    }
}

// ============================================================
// Helpers
// ============================================================

fn first_group(caps: &Captures<'_>) -> Option<String> {
    caps.iter()
        .skip(1)
        .flatten()
        .next()
        .map(|m| m.as_str().to_string())
}

fn last_href(list: &str) -> Option<String> {
    HREF_REGEX
        .captures_iter(list)
        .filter_map(|caps| first_group(&caps))
        .last()
}

/// The first `limit` characters of `text`, cut on a char boundary.
fn leading_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Slice from the `[` at byte `open` through its matching `]`.
///
/// Returns `None` if the list never closes.
fn balanced_brackets(text: &str, open: usize) -> Option<&str> {
    balanced_span(text, open, b'[', b']')
}

/// Slice from the `open_byte` at byte `open` through its matching
/// `close_byte`.
///
/// Delimiters inside string literals and `//` or `/* */` comments are
/// ignored.
pub(crate) fn balanced_span(
    text: &str,
    open: usize,
    open_byte: u8,
    close_byte: u8,
) -> Option<&str> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&open_byte) {
        return None;
    }

    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut escaped = false;
    let mut i = open;

    while i < bytes.len() {
        let byte = bytes[i];
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == q {
                quote = None;
            }
            i += 1;
            continue;
        }

        match (byte, bytes.get(i + 1)) {
            (b'/', Some(b'/')) => {
                i = find_byte(bytes, i, b'\n')?;
                continue;
            }
            (b'/', Some(b'*')) => {
                i = text[i + 2..].find("*/")? + i + 4;
                continue;
            }
            (b'"' | b'\'' | b'`', _) => quote = Some(byte),
            _ if byte == open_byte => depth += 1,
            _ if byte == close_byte => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open..=i]);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Index of the next `needle` at or after `from`.
fn find_byte(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes[from..]
        .iter()
        .position(|&b| b == needle)
        .map(|offset| from + offset)
}
