use anyhow::{Ok, Result};

use super::super::args::{RouteArgs, RoutesCommand};
use super::{CommandKind, CommandResult, CommandSummary, RoutesSummary};
use crate::{
    core::{RouteRegistry, RunContext, serializer},
    generate::{RouteModuleOptions, render_route_module},
    utils::write_if_changed,
};

pub fn routes(cmd: RoutesCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let registry = serializer::read_registry(&ctx.registry_path())?;
    let summary = emit_route_module(&ctx, &registry, &cmd.args)?;

    Ok(CommandResult {
        kind: CommandKind::Routes,
        summary: CommandSummary::Routes(summary),
        error_count: 0,
        verbose: ctx.verbose,
    })
}

pub(crate) fn emit_route_module(
    ctx: &RunContext,
    registry: &RouteRegistry,
    args: &RouteArgs,
) -> Result<RoutesSummary> {
    let existing = ctx.existing_routes(args.existing.as_deref())?;
    let options = RouteModuleOptions::from_config(&ctx.config);
    let module = render_route_module(registry, &existing, &options);

    let (output, written) = if args.stdout {
        (None, false)
    } else {
        let path = ctx.resolve(&ctx.config.route_module.output);
        let written = write_if_changed(&path, &module.source)?;
        (Some(path), written)
    };

    Ok(RoutesSummary {
        registry_size: registry.len(),
        existing_count: existing.len(),
        route_count: module.routes.len(),
        output,
        written,
        source: module.source,
    })
}
