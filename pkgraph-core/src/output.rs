use crate::graph::{ScopeGraph, ScopeGraphs};
use crate::{GraphError, Result};
use std::path::{Path, PathBuf};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const STYLE_SHEET: &str = include_str!("../templates/style.css");

/// A rendered file, relative to the graph directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: &'static str,
    pub contents: String,
}

impl Document {
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name)
    }
}

/// Renders the index page, its stylesheet and one pretty JSON file per scope.
pub fn render_documents(title: &str, graphs: &ScopeGraphs) -> Result<Vec<Document>> {
    Ok(vec![
        Document {
            file_name: "index.html",
            contents: render_index(title, graphs)?,
        },
        Document {
            file_name: "style.css",
            contents: STYLE_SHEET.to_string(),
        },
        Document {
            file_name: "all.json",
            contents: to_pretty_json(&graphs.all)?,
        },
        Document {
            file_name: "dev.json",
            contents: to_pretty_json(&graphs.dev)?,
        },
        Document {
            file_name: "main.json",
            contents: to_pretty_json(&graphs.main)?,
        },
    ])
}

/// Fills the bundled index template. Placeholders are substituted in a single
/// pass so graph data can never be re-expanded.
pub fn render_index(title: &str, graphs: &ScopeGraphs) -> Result<String> {
    let all = embed_json(&graphs.all)?;
    let dev = embed_json(&graphs.dev)?;
    let main = embed_json(&graphs.main)?;
    let title = escape_html(title);
    let max_level = graphs.all.max_level.to_string();

    let mut out = String::with_capacity(INDEX_TEMPLATE.len() + all.len() + dev.len() + main.len());
    let mut rest = INDEX_TEMPLATE;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        match &after[..end] {
            "title" => out.push_str(&title),
            "maxPackageLevel" => out.push_str(&max_level),
            "packageDataAll" => out.push_str(&all),
            "packageDataDev" => out.push_str(&dev),
            "packageDataMain" => out.push_str(&main),
            other => {
                out.push_str("{{");
                out.push_str(other);
                out.push_str("}}");
            }
        }

        rest = &after[end + 2..];
    }

    out.push_str(rest);

    Ok(out)
}

fn embed_json(graph: &ScopeGraph) -> Result<String> {
    let data = serde_json::to_string(graph).map_err(|e| GraphError::SerializeJson {
        reason: e.to_string(),
    })?;

    Ok(data.replace("</", "<\\/"))
}

fn to_pretty_json(graph: &ScopeGraph) -> Result<String> {
    serde_json::to_string_pretty(graph).map_err(|e| GraphError::SerializeJson {
        reason: e.to_string(),
    })
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }

    out
}
