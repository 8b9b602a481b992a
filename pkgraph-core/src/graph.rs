use crate::package::{PackageDescriptor, SpecifierError, normalize, sanitize_id};
use crate::resolution::{ChildPackageMap, DependencyMap};
use crate::{GraphError, Result};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageScope {
    All,
    Dev,
    Main,
}

impl PackageScope {
    pub const EVERY: [PackageScope; 3] = [PackageScope::All, PackageScope::Dev, PackageScope::Main];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageScope::All => "all",
            PackageScope::Dev => "dev",
            PackageScope::Main => "main",
        }
    }
}

impl fmt::Display for PackageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageNode {
    pub id: String,
    pub index: usize,
    pub min_level: usize,
    pub package_scope: PackageScope,
    pub package_data: PackageDescriptor,
    /// Pin state owned by the renderer; always emitted unpinned.
    pub fixed: bool,
}

/// A traversed dependency edge. Edges are recorded once per traversal, so the
/// same pair can appear several times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageLink {
    pub source: usize,
    pub target: usize,
    pub min_level: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeGraph {
    pub max_level: usize,
    pub directed: bool,
    pub multigraph: bool,
    pub graph: Vec<serde_json::Value>,
    pub nodes: Vec<PackageNode>,
    pub links: Vec<PackageLink>,
}

impl ScopeGraph {
    pub fn node(&self, id: &str) -> Option<&PackageNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn links_into(&self, index: usize) -> impl Iterator<Item = &PackageLink> {
        self.links.iter().filter(move |link| link.target == index)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScopeGraphs {
    pub all: ScopeGraph,
    pub dev: ScopeGraph,
    pub main: ScopeGraph,
}

impl ScopeGraphs {
    pub fn get(&self, scope: PackageScope) -> &ScopeGraph {
        match scope {
            PackageScope::All => &self.all,
            PackageScope::Dev => &self.dev,
            PackageScope::Main => &self.main,
        }
    }
}

/// Builds the `all`, `dev` and `main` graphs.
///
/// Every scope is seeded with its top-level packages at level 0 and expanded
/// breadth-first through `child_packages`, one level at a time, so a node's
/// `min_level` is its shortest hop count from any seed of that scope.
///
/// A top-level key that is in neither `main_keys` nor `dev_keys`, or whose
/// specifier is malformed, aborts the build. Top-level packages of an
/// unsupported type are skipped: they are what the resolver reports for
/// registries the graph does not cover, and the manifest's declared maps
/// drop them by the same npm/GitHub prefix filter, so they are not unknown
/// packages.
///
/// Transitive dependencies that cannot be normalized are pruned, and
/// packages missing from `child_packages` are leaves.
pub fn build(
    top_level: &DependencyMap,
    main_keys: &BTreeSet<String>,
    dev_keys: &BTreeSet<String>,
    child_packages: &ChildPackageMap,
) -> Result<ScopeGraphs> {
    let mut all = ScopeBuilder::new(PackageScope::All);
    let mut dev = ScopeBuilder::new(PackageScope::Dev);
    let mut main = ScopeBuilder::new(PackageScope::Main);

    for (key, value) in top_level {
        let descriptor = match normalize(value, Some(key)) {
            Ok(descriptor) => descriptor,
            Err(SpecifierError::UnsupportedType { kind, .. }) => {
                debug!(key = %key, kind = %kind, "skipping top level package of unsupported type");
                continue;
            }
            Err(source) => {
                return Err(GraphError::InvalidSpecifier {
                    key: key.clone(),
                    source,
                });
            }
        };

        let in_main = main_keys.contains(key);
        let in_dev = dev_keys.contains(key);

        if !in_main && !in_dev {
            return Err(GraphError::UnknownTopLevelPackage { key: key.clone() });
        }

        let id = sanitize_id(value);

        all.seed(&id, &descriptor);

        if in_main {
            main.seed(&id, &descriptor);
        }

        if in_dev {
            dev.seed(&id, &descriptor);
        }
    }

    all.expand(child_packages);
    dev.expand(child_packages);
    main.expand(child_packages);

    Ok(ScopeGraphs {
        all: all.finish(),
        dev: dev.finish(),
        main: main.finish(),
    })
}

/// Per-scope build state. Owned by a single `build` call.
struct ScopeBuilder {
    scope: PackageScope,
    nodes: Vec<PackageNode>,
    ids: HashMap<String, usize>,
    links: Vec<PackageLink>,
    seeds: Vec<usize>,
}

impl ScopeBuilder {
    fn new(scope: PackageScope) -> Self {
        ScopeBuilder {
            scope,
            nodes: Vec::new(),
            ids: HashMap::new(),
            links: Vec::new(),
            seeds: Vec::new(),
        }
    }

    fn seed(&mut self, id: &str, descriptor: &PackageDescriptor) {
        if self.ids.contains_key(id) {
            return;
        }

        let index = self.insert(id.to_string(), descriptor.clone(), 0);
        self.seeds.push(index);

        debug!(scope = %self.scope, id = %id, index, "adding top level node");
    }

    fn insert(&mut self, id: String, descriptor: PackageDescriptor, level: usize) -> usize {
        let index = self.nodes.len();

        self.ids.insert(id.clone(), index);
        self.nodes.push(PackageNode {
            id,
            index,
            min_level: level,
            package_scope: self.scope,
            package_data: descriptor,
            fixed: false,
        });

        index
    }

    /// Drains one level completely before starting the next. The id map is
    /// also the visited set, so each node is expanded at most once and
    /// dependency cycles terminate.
    fn expand(&mut self, child_packages: &ChildPackageMap) {
        let mut frontier = std::mem::take(&mut self.seeds);
        let mut depth = 1;

        while !frontier.is_empty() {
            trace!(scope = %self.scope, depth, width = frontier.len(), "expanding level");

            let mut next = Vec::new();

            for parent in frontier {
                let Some(children) = child_packages.get(&self.nodes[parent].package_data.package)
                else {
                    continue;
                };

                for (key, value) in children {
                    let descriptor = match normalize(value, Some(key)) {
                        Ok(descriptor) => descriptor,
                        Err(err) => {
                            debug!(scope = %self.scope, depth, "pruning dependency: {}", err);
                            continue;
                        }
                    };

                    let id = sanitize_id(value);

                    let target = match self.ids.get(&id) {
                        Some(&existing) => {
                            let node = &mut self.nodes[existing];
                            if depth < node.min_level {
                                debug!(
                                    scope = %self.scope,
                                    id = %node.id,
                                    from = node.min_level,
                                    to = depth,
                                    "lowering min level"
                                );
                                node.min_level = depth;
                            }
                            existing
                        }
                        None => {
                            let index = self.insert(id, descriptor, depth);
                            debug!(scope = %self.scope, depth, index, "adding node");
                            next.push(index);
                            index
                        }
                    };

                    self.links.push(PackageLink {
                        source: parent,
                        target,
                        min_level: depth,
                    });
                }
            }

            frontier = next;
            depth += 1;
        }
    }

    fn finish(self) -> ScopeGraph {
        let node_max = self.nodes.iter().map(|node| node.min_level).max();
        let link_max = self.links.iter().map(|link| link.min_level).max();
        let max_level = node_max.max(link_max).unwrap_or(0);

        ScopeGraph {
            max_level,
            directed: true,
            multigraph: false,
            graph: Vec::new(),
            nodes: self.nodes,
            links: self.links,
        }
    }
}
