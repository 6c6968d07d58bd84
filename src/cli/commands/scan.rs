use anyhow::{Ok, Result};

use super::super::args::ScanCommand;
use super::{CommandKind, CommandResult, CommandSummary, ScanSummary};
use crate::core::{RouteRegistry, RunContext, serializer};

pub fn scan(cmd: ScanCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let (mut summary, _) = scan_and_store(&ctx)?;
    summary.json = cmd.json;

    Ok(CommandResult {
        kind: CommandKind::Scan,
        error_count: summary.rejected.len(),
        summary: CommandSummary::Scan(summary),
        verbose: ctx.verbose,
    })
}

/// Scan, write the registry file, and hand back the registry as the
/// generators will read it.
pub(crate) fn scan_and_store(ctx: &RunContext) -> Result<(ScanSummary, RouteRegistry)> {
    let scan = ctx.scan()?;
    let registry_file = ctx.registry_path();
    let serialized = serializer::write_registry(&registry_file, &scan.build.registry)?;
    let registry = serializer::deserialize(&serialized.text)?;

    let summary = ScanSummary {
        pages_dir: ctx.resolve(&ctx.config.pages_dir),
        registry_file,
        rejected: serialized.rejected,
        registry_size: registry.len(),
        json: false,
        scan,
    };
    Ok((summary, registry))
}
