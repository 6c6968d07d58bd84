use anyhow::{Ok, Result};

use super::super::args::AllCommand;
use super::{
    CommandKind, CommandResult, CommandSummary, routes::emit_route_module, scan::scan_and_store,
    sitemap::emit_sitemaps,
};
use crate::core::RunContext;

pub fn all(cmd: AllCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;

    let (scan, registry) = scan_and_store(&ctx)?;
    let routes = emit_route_module(&ctx, &registry, &cmd.routes)?;
    let sitemap = emit_sitemaps(&ctx, &registry, &cmd.sitemap)?;

    Ok(CommandResult {
        kind: CommandKind::All,
        error_count: scan.rejected.len(),
        summary: CommandSummary::All {
            scan,
            routes,
            sitemap,
        },
        verbose: ctx.verbose,
    })
}
