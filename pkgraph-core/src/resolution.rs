use crate::package::is_graphable_specifier;
use crate::{GraphError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Declared name -> raw specifier, in declaration order.
pub type DependencyMap = IndexMap<String, String>;

/// Raw specifier of a package -> that package's own direct dependencies.
pub type ChildPackageMap = IndexMap<String, DependencyMap>;

/// Output of the external resolver: the root's resolved top-level packages
/// and one level of expansion for every package it knows about.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(default)]
    pub top_level_packages: DependencyMap,
    #[serde(default)]
    pub child_packages: ChildPackageMap,
}

impl Resolution {
    /// Reads a snapshot from disk. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(GraphError::ResolutionMissing {
                path: path.to_path_buf(),
            });
        }

        let data = fs::read_to_string(path).map_err(|source| GraphError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let mut resolution: Resolution = if is_json {
            serde_json::from_str(&data).map_err(|source| GraphError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            serde_yaml::from_str(&data).map_err(|source| GraphError::ParseYaml {
                path: path.to_path_buf(),
                source,
            })?
        };

        resolution.retain_graphable();

        Ok(resolution)
    }

    /// Drops top-level packages that are neither npm nor GitHub packages.
    /// Child maps are left alone; the builder prunes those per edge.
    pub fn retain_graphable(&mut self) {
        self.top_level_packages
            .retain(|_, value| is_graphable_specifier(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SNAPSHOT: &str = r#"
topLevelPackages:
  react: "npm:react@16.0.0"
  lodash: "npm:lodash@4.0.0"
  local: "file:../local@0.0.0"
childPackages:
  "npm:lodash@4.0.0":
    isarray: "npm:isarray@1.0.0"
"#;

    #[test]
    fn reads_yaml_snapshot_in_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pkgraph-resolution.yaml");
        fs::write(&path, SNAPSHOT).unwrap();

        let resolution = Resolution::read(&path).unwrap();

        let keys: Vec<&str> = resolution
            .top_level_packages
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["react", "lodash"]);
        assert_eq!(
            resolution.child_packages["npm:lodash@4.0.0"]["isarray"],
            "npm:isarray@1.0.0"
        );
    }

    #[test]
    fn reads_json_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resolution.json");
        fs::write(
            &path,
            r#"{"topLevelPackages": {"lodash": "npm:lodash@4.0.0"}}"#,
        )
        .unwrap();

        let resolution = Resolution::read(&path).unwrap();

        assert_eq!(resolution.top_level_packages.len(), 1);
        assert!(resolution.child_packages.is_empty());
    }

    #[test]
    fn missing_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Resolution::read(&dir.path().join("nope.yaml")).unwrap_err();

        assert!(matches!(err, GraphError::ResolutionMissing { .. }));
    }
}
