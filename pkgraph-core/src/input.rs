use crate::graph::{self, ScopeGraphs};
use crate::resolution::{ChildPackageMap, DependencyMap};
use crate::{Project, Resolution, Result};
use std::collections::BTreeSet;

/// Everything one graph build reads, gathered up front and passed explicitly.
#[derive(Debug, Clone, Default)]
pub struct GraphInput {
    pub root_package_name: String,
    pub top_level_packages: DependencyMap,
    pub main_keys: BTreeSet<String>,
    pub dev_keys: BTreeSet<String>,
    pub child_packages: ChildPackageMap,
}

impl GraphInput {
    pub fn assemble(project: &Project, resolution: Resolution) -> Self {
        GraphInput {
            root_package_name: project.root_package_name(),
            top_level_packages: resolution.top_level_packages,
            main_keys: project.main_dependencies().into_keys().collect(),
            dev_keys: project.dev_dependencies().into_keys().collect(),
            child_packages: resolution.child_packages,
        }
    }

    pub fn build(&self) -> Result<ScopeGraphs> {
        graph::build(
            &self.top_level_packages,
            &self.main_keys,
            &self.dev_keys,
            &self.child_packages,
        )
    }
}
