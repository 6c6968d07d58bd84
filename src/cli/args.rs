//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Recover page routes, build the registry and store it
//! - `routes`: Generate the route module for routes not yet wired
//! - `sitemap`: Generate the sitemap set
//! - `all`: Run `scan`, `routes` and `sitemap` in one pass
//! - `init`: Initialize a routegen configuration file

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Scan(cmd)) => cmd.common.verbose,
            Some(Command::Routes(cmd)) => cmd.common.verbose,
            Some(Command::Sitemap(cmd)) => cmd.common.verbose,
            Some(Command::All(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Page directory (overrides config file)
    #[arg(long)]
    pub pages_dir: Option<PathBuf>,

    /// Router source file (overrides config file)
    #[arg(long)]
    pub router_source: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct RouteArgs {
    /// Extra newline-separated list of paths that are already wired
    #[arg(long)]
    pub existing: Option<PathBuf>,

    /// Print the module to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SitemapArgs {
    /// Date used for <lastmod>, YYYY-MM-DD (default: today)
    #[arg(long, env = "ROUTEGEN_TODAY")]
    pub today: Option<NaiveDate>,

    /// Output directory (overrides config file)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the scan summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct RoutesCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub args: RouteArgs,
}

#[derive(Debug, Args)]
pub struct SitemapCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub args: SitemapArgs,
}

#[derive(Debug, Args)]
pub struct AllCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(flatten)]
    pub routes: RouteArgs,

    #[command(flatten)]
    pub sitemap: SitemapArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Recover page routes and write the route registry
    Scan(ScanCommand),
    /// Generate the route module for registered pages the router does not declare yet
    Routes(RoutesCommand),
    /// Generate per-category sitemaps and the sitemap index
    Sitemap(SitemapCommand),
    /// Scan, then generate the route module and sitemaps
    All(AllCommand),
    /// Initialize a new .routegenrc.json configuration file
    Init,
}
