pub mod build;
pub mod summary;

use anyhow::{Context, Result};
use clap::Args;
use pkgraph_core::{GraphConfig, GraphInput, Project, Resolution, console};
use std::env;
use std::path::{Path, PathBuf};

/// Input locations shared by every command that builds graphs.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Path to the project's package.json
    #[arg(long)]
    pub package: Option<PathBuf>,

    /// Path to the resolver snapshot (YAML or JSON)
    #[arg(long)]
    pub resolution: Option<PathBuf>,
}

pub fn load_input(args: &InputArgs, config: &GraphConfig) -> Result<GraphInput> {
    let cwd = env::current_dir()?;
    load_input_from(&cwd, args, config)
}

/// Locates the manifest and resolver snapshot relative to `cwd`.
///
/// Only the default manifest location falls back to walking up from `cwd`; a
/// path from the command line, an rc file or the environment must exist.
/// A relative `--resolution` is taken from `cwd`, a configured one from the
/// project root.
pub fn load_input_from(
    cwd: &Path,
    args: &InputArgs,
    config: &GraphConfig,
) -> Result<GraphInput> {
    let project = match &args.package {
        Some(path) => Project::from_manifest_path(cwd.join(path))?,
        None if config.has_explicit_package() => {
            Project::from_manifest_path(cwd.join(&config.package_path))?
        }
        None => Project::discover(cwd)?,
    };

    console::verbose(&format!("manifest: {}", project.manifest_path.display()));

    let resolution_path = match &args.resolution {
        Some(path) => cwd.join(path),
        None => project.root.join(&config.resolution_path),
    };

    console::verbose(&format!("resolution: {}", resolution_path.display()));

    let resolution = Resolution::read(&resolution_path)
        .with_context(|| format!("loading resolution for {}", project.root.display()))?;

    Ok(GraphInput::assemble(&project, resolution))
}
