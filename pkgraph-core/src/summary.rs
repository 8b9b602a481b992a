use crate::graph::{PackageScope, ScopeGraphs};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub scope: PackageScope,
    pub nodes: usize,
    pub links: usize,
    pub max_level: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub title: String,
    pub scopes: Vec<ScopeSummary>,
    /// Node ids reachable from both main and dev roots.
    pub shared: Vec<String>,
}

impl GraphSummary {
    pub fn from_graphs(title: &str, graphs: &ScopeGraphs) -> Self {
        let scopes = PackageScope::EVERY
            .iter()
            .map(|&scope| {
                let graph = graphs.get(scope);
                ScopeSummary {
                    scope,
                    nodes: graph.nodes.len(),
                    links: graph.links.len(),
                    max_level: graph.max_level,
                }
            })
            .collect();

        let main: BTreeSet<&str> = graphs.main.nodes.iter().map(|n| n.id.as_str()).collect();
        let shared = graphs
            .dev
            .nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| main.contains(id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        GraphSummary {
            title: title.to_string(),
            scopes,
            shared,
        }
    }

    pub fn scope(&self, scope: PackageScope) -> Option<&ScopeSummary> {
        self.scopes.iter().find(|entry| entry.scope == scope)
    }
}
