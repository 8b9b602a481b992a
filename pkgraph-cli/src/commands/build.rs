use super::{InputArgs, load_input};
use anyhow::{Context, Result};
use clap::Args;
use pkgraph_core::{GraphConfig, GraphSummary, console, output};
use std::path::PathBuf;
use tokio::fs;

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory for the graph documents (defaults to <destination>/graphs/jspm_packages)
    #[arg(short = 'o', long = "out")]
    pub out: Option<PathBuf>,

    /// Print the graphs as JSON instead of writing documents
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: BuildArgs, config: &GraphConfig) -> Result<()> {
    if !args.json {
        console::header("build", env!("CARGO_PKG_VERSION"));
    }

    let input = load_input(&args.input, config)?;

    if !args.json {
        console::step(&format!(
            "Building graphs for {} ({} top level packages)",
            input.root_package_name,
            input.top_level_packages.len()
        ));
    }

    let graphs = input.build()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graphs)?);
        return Ok(());
    }

    if graphs.all.nodes.is_empty() {
        console::warn("no npm or GitHub packages found; writing empty graphs");
    }

    let dir = args.out.unwrap_or_else(|| config.graph_dir());
    tracing::debug!(dir = %dir.display(), "writing graph documents");
    fs::create_dir_all(&dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    for document in output::render_documents(&input.root_package_name, &graphs)? {
        let path = document.path_in(&dir);
        fs::write(&path, document.contents)
            .await
            .with_context(|| format!("writing {}", path.display()))?;
        console::written(&path);
    }

    println!();
    super::summary::print_summary(&GraphSummary::from_graphs(
        &input.root_package_name,
        &graphs,
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    #[tokio::test]
    async fn writes_graph_documents_into_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("package.json");
        std_fs::write(
            &manifest,
            r#"{
                "name": "app",
                "dependencies": { "lodash": "npm:lodash@^4.0.0" },
                "devDependencies": { "mocha": "npm:mocha@^5.0.0" }
            }"#,
        )
        .unwrap();
        let snapshot = dir.path().join("resolution.yaml");
        std_fs::write(
            &snapshot,
            r#"
topLevelPackages:
  lodash: "npm:lodash@4.17.4"
  mocha: "npm:mocha@5.2.0"
childPackages:
  "npm:lodash@4.17.4":
    isarray: "npm:isarray@1.0.0"
"#,
        )
        .unwrap();
        let out = dir.path().join("site").join("graphs");

        let args = BuildArgs {
            input: InputArgs {
                package: Some(manifest),
                resolution: Some(snapshot),
            },
            out: Some(out.clone()),
            json: false,
        };

        run(args, &GraphConfig::default()).await.unwrap();

        for name in ["index.html", "style.css", "all.json", "dev.json", "main.json"] {
            assert!(out.join(name).is_file(), "{} was not written", name);
        }

        let main: serde_json::Value =
            serde_json::from_str(&std_fs::read_to_string(out.join("main.json")).unwrap()).unwrap();
        let ids: Vec<&str> = main["nodes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|node| node["id"].as_str().unwrap())
            .collect();

        assert_eq!(ids, vec!["npm-lodash-4-17-4", "npm-isarray-1-0-0"]);
        assert_eq!(main["maxLevel"], 1);
        assert_eq!(main["links"][0]["target"], 1);
    }
}
