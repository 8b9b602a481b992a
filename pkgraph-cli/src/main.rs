use anyhow::Result;
use clap::Parser;
use pkgraph_core::{GraphConfig, console};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let mut config = GraphConfig::from_env();
    if args.verbose {
        config.verbose = true;
    }

    init_tracing(config.verbose)?;
    console::set_verbose(config.verbose);

    let result = match args.command {
        Command::Build(command_args) => commands::build::run(command_args, &config).await,
        Command::Summary(command_args) => commands::summary::run(command_args, &config).await,
    };

    if let Err(err) = result {
        console::error(&format!("{:#}", err));
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default = if verbose { "warn,pkgraph_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
