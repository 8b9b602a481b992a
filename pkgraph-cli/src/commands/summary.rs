use super::{InputArgs, load_input};
use anyhow::Result;
use clap::Args;
use pkgraph_core::{GraphConfig, GraphSummary, console};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SummaryArgs, config: &GraphConfig) -> Result<()> {
    if !args.json {
        console::header("summary", env!("CARGO_PKG_VERSION"));
    }

    let input = load_input(&args.input, config)?;
    let graphs = input.build()?;
    let summary = GraphSummary::from_graphs(&input.root_package_name, &graphs);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);

    Ok(())
}

pub fn print_summary(summary: &GraphSummary) {
    console::info(&summary.title);

    for scope in &summary.scopes {
        console::scope(scope.scope.as_str(), scope.nodes, scope.links, scope.max_level);
    }

    if !summary.shared.is_empty() {
        println!();
        console::info(&format!(
            "shared by main and dev ({}):",
            summary.shared.len()
        ));
        for id in &summary.shared {
            println!("  {}", id);
        }
    }
}
