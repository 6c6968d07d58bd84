//! Dispatch to the command handler for the parsed arguments.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, all::all, init::init, routes::routes, scan::scan, sitemap::sitemap},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Routes(cmd)) => routes(cmd),
        Some(Command::Sitemap(cmd)) => sitemap(cmd),
        Some(Command::All(cmd)) => all(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
