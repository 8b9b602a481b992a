use crate::commands;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pkgraph",
    about = "package dependency graphs for npm and GitHub dependencies",
    version,
    color = clap::ColorChoice::Auto
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the all/dev/main graphs and write the graph documents
    Build(commands::build::BuildArgs),
    /// Print per-scope package counts and depths
    Summary(commands::summary::SummaryArgs),
}
