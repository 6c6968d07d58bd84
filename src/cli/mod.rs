//! Command-line interface layer.
//!
//! - `args`: clap argument definitions
//! - `commands`: one handler per subcommand, returning a `CommandResult`
//! - `report`: human-readable and JSON output
//! - `exit_status`: process exit codes

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    let result = run::run(args)?;
    report::print(&result)?;

    Ok(if result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    })
}
