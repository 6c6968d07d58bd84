use std::fs;

use anyhow::{Context, Ok, Result};
use chrono::Local;

use super::super::args::{SitemapArgs, SitemapCommand};
use super::{CommandKind, CommandResult, CommandSummary, SitemapSummary};
use crate::{
    core::{RouteRegistry, RunContext, serializer},
    generate::generate_sitemaps,
    utils::write_if_changed,
};

pub fn sitemap(cmd: SitemapCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let registry = serializer::read_registry(&ctx.registry_path())?;
    let summary = emit_sitemaps(&ctx, &registry, &cmd.args)?;

    Ok(CommandResult {
        kind: CommandKind::Sitemap,
        summary: CommandSummary::Sitemap(summary),
        error_count: 0,
        verbose: ctx.verbose,
    })
}

pub(crate) fn emit_sitemaps(
    ctx: &RunContext,
    registry: &RouteRegistry,
    args: &SitemapArgs,
) -> Result<SitemapSummary> {
    // The only place the clock is read
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let set = generate_sitemaps(registry.paths(), &ctx.config.sitemap, today);

    let output_dir = match &args.out {
        Some(out) => out.clone(),
        None => ctx.resolve(&ctx.config.sitemap.output_dir),
    };

    let mut files = Vec::with_capacity(set.documents.len() + 1);
    let mut written_count = 0;
    for document in &set.documents {
        if write_if_changed(&output_dir.join(&document.file_name), &document.xml)? {
            written_count += 1;
        }
        files.push((document.file_name.clone(), document.urls.len()));
    }
    if write_if_changed(&output_dir.join(&set.index_file_name), &set.index_xml)? {
        written_count += 1;
    }
    files.push((set.index_file_name.clone(), 0));

    // Categories that emptied since the last run must not leave their file behind
    let mut removed = Vec::new();
    for file_name in set.omitted_file_names(&ctx.config.sitemap) {
        let path = output_dir.join(&file_name);
        if path.is_file() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove stale sitemap: {}", path.display()))?;
            removed.push(file_name);
        }
    }

    Ok(SitemapSummary {
        output_dir,
        files,
        url_count: set.url_count(),
        excluded: set.excluded,
        written_count,
        removed,
    })
}
