//! Report formatting and printing utilities.
//!
//! Separate from core logic so routegen can be used as a library. Every
//! printer has a `_to` variant taking a writer for tests.

use std::io::{self, Write};

use anyhow::{Context, Result};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CommandResult, CommandSummary, InitSummary, RoutesSummary, ScanSummary, SitemapSummary,
};
use crate::{
    config::CONFIG_FILE_NAME,
    core::{DuplicateReport, Strategy},
    utils::plural,
};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Maximum number of unknown pages listed without `-v`.
const MAX_UNKNOWN_DISPLAY: usize = 5;

pub fn print(result: &CommandResult) -> Result<()> {
    let stdout = &mut io::stdout().lock();
    let verbose = result.verbose;

    match &result.summary {
        CommandSummary::Scan(summary) if summary.json => print_scan_json_to(summary, stdout)?,
        CommandSummary::Scan(summary) => print_scan_to(summary, verbose, stdout),
        CommandSummary::Routes(summary) => print_routes_to(summary, stdout),
        CommandSummary::Sitemap(summary) => print_sitemap_to(summary, verbose, stdout),
        CommandSummary::All {
            scan,
            routes,
            sitemap,
        } => {
            print_scan_to(scan, verbose, stdout);
            let _ = writeln!(stdout);
            print_routes_to(routes, stdout);
            print_sitemap_to(sitemap, verbose, stdout);
        }
        CommandSummary::Init(summary) => print_init(summary),
    }

    Ok(())
}

// ============================================================
// Scan
// ============================================================

pub fn print_scan_json_to<W: Write>(summary: &ScanSummary, writer: &mut W) -> Result<()> {
    let mut json = serde_json::to_value(&summary.scan).context("Failed to serialize scan")?;
    if let Some(object) = json.as_object_mut() {
        object.insert(
            "rejected".to_string(),
            serde_json::to_value(&summary.rejected)?,
        );
        object.insert(
            "registryFile".to_string(),
            summary.registry_file.to_string_lossy().into(),
        );
    }
    serde_json::to_writer_pretty(&mut *writer, &json).context("Failed to write JSON")?;
    let _ = writeln!(writer);
    Ok(())
}

pub fn print_scan_to<W: Write>(summary: &ScanSummary, verbose: bool, writer: &mut W) {
    let scan = &summary.scan;
    let build = &scan.build;

    let _ = writeln!(
        writer,
        "Scanned {} in {}",
        plural(scan.files_scanned, "page file", "page files"),
        summary.pages_dir.display()
    );

    let labels: Vec<(&str, usize)> = Strategy::all()
        .iter()
        .map(|s| (s.as_str(), scan.by_strategy.get(s).copied().unwrap_or(0)))
        .chain([
            ("unknown", scan.unknown.len()),
            ("unreadable", scan.warnings.len()),
        ])
        .collect();
    let label_width = labels
        .iter()
        .map(|(label, _)| UnicodeWidthStr::width(*label))
        .max()
        .unwrap_or(0);
    for (label, count) in labels {
        let _ = writeln!(
            writer,
            "  {:<width$}  {}",
            label,
            count,
            width = label_width
        );
    }

    print_unknown(&scan.unknown, verbose, writer);

    let _ = writeln!(
        writer,
        "Router inventory: {}",
        plural(scan.inventory_entries, "lazy route", "lazy routes")
    );

    for report in &build.duplicates {
        print_duplicate(report, writer);
    }

    for mismatch in &build.mismatches {
        let _ = writeln!(
            writer,
            "\n{}: {}",
            "mismatch".bold().yellow(),
            mismatch.identifier
        );
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            "page:".bold(),
            mismatch.scanned_path
        );
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            "router:".bold(),
            mismatch.router_path
        );
    }

    for warning in &scan.warnings {
        let _ = writeln!(
            writer,
            "\n{}: cannot read page file",
            "warning".bold().yellow()
        );
        let _ = writeln!(writer, "  {} {}", "-->".blue(), warning.file_path);
        let _ = writeln!(
            writer,
            "  {} {} {}",
            "=".blue(),
            "note:".bold(),
            warning.error
        );
    }

    for collision in &summary.rejected {
        let _ = writeln!(writer, "\n{}: {}", "error".bold().red(), collision);
    }

    let _ = writeln!(writer);
    if summary.rejected.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Registry: {} ({} from page files, {} from router, {} resolved) -> {}",
                plural(summary.registry_size, "route", "routes"),
                build.from_scanner,
                build.from_inventory,
                plural(build.duplicates.len(), "duplicate", "duplicates"),
                summary.registry_file.display()
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} Registry: {}, {} -> {}",
            FAILURE_MARK.red(),
            plural(summary.registry_size, "route", "routes"),
            format!(
                "{} rejected",
                plural(summary.rejected.len(), "record", "records")
            )
            .red(),
            summary.registry_file.display()
        );
    }
}

fn print_unknown<W: Write>(unknown: &[String], verbose: bool, writer: &mut W) {
    if unknown.is_empty() {
        return;
    }

    let shown = if verbose {
        unknown.len()
    } else {
        unknown.len().min(MAX_UNKNOWN_DISPLAY)
    };
    let mut line = unknown[..shown].join(", ");
    if shown < unknown.len() {
        line.push_str(&format!(" (and {} more, use {})", unknown.len() - shown, "-v".cyan()));
    }
    let _ = writeln!(writer, "  {} {}", "unknown:".dimmed(), line);
}

fn print_duplicate<W: Write>(report: &DuplicateReport, writer: &mut W) {
    let _ = writeln!(
        writer,
        "\n{}: \"{}\"",
        "duplicate".bold().yellow(),
        report.path
    );

    let id_width = std::iter::once(&report.winner)
        .chain(report.losers.iter().map(|l| &l.claimant))
        .map(|c| UnicodeWidthStr::width(c.identifier.as_str()))
        .max()
        .unwrap_or(0);

    let _ = writeln!(
        writer,
        "  {} {:<9} {:<width$}  {} bytes",
        "=".blue(),
        "kept:".bold(),
        report.winner.identifier,
        report.winner.source_size,
        width = id_width
    );
    for loser in &report.losers {
        let _ = writeln!(
            writer,
            "  {} {:<9} {:<width$}  {}",
            "=".blue(),
            "excluded:".bold(),
            loser.claimant.identifier,
            loser.reason,
            width = id_width
        );
    }
}

// ============================================================
// Routes
// ============================================================

pub fn print_routes_to<W: Write>(summary: &RoutesSummary, writer: &mut W) {
    let Some(output) = &summary.output else {
        let _ = write!(writer, "{}", summary.source);
        return;
    };

    let status = if summary.written { "written" } else { "unchanged" };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Route module: {} of {} not yet wired ({} already declared) -> {} ({})",
            plural(summary.route_count, "route", "routes"),
            summary.registry_size,
            summary.existing_count,
            output.display(),
            status
        )
        .green()
    );
}

// ============================================================
// Sitemap
// ============================================================

pub fn print_sitemap_to<W: Write>(summary: &SitemapSummary, verbose: bool, writer: &mut W) {
    let name_width = summary
        .files
        .iter()
        .map(|(name, _)| UnicodeWidthStr::width(name.as_str()))
        .max()
        .unwrap_or(0);

    for (name, count) in &summary.files {
        let detail = if *count > 0 {
            plural(*count, "url", "urls")
        } else {
            "index".to_string()
        };
        let _ = writeln!(
            writer,
            "  {:<width$}  {}",
            name,
            detail,
            width = name_width
        );
    }

    if !summary.excluded.is_empty() {
        let _ = writeln!(
            writer,
            "  {} {} outside every sitemap category",
            "note:".bold(),
            plural(summary.excluded.len(), "path", "paths")
        );
        if verbose {
            for path in &summary.excluded {
                let _ = writeln!(writer, "    {}", path.dimmed());
            }
        }
    }

    for file_name in &summary.removed {
        let _ = writeln!(writer, "  {}  {}", file_name, "removed (empty)".dimmed());
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Sitemaps: {} in {} -> {} ({} changed)",
            plural(summary.url_count, "url", "urls"),
            plural(summary.files.len(), "file", "files"),
            summary.output_dir.display(),
            summary.written_count
        )
        .green()
    );
}

// ============================================================
// Init
// ============================================================

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}
