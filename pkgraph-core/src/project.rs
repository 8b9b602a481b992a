use crate::package::is_graphable_specifier;
use crate::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclaredDependencies {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    pub jspm: Option<DeclaredDependencies>,
}

#[derive(Debug)]
pub struct Project {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub manifest: Manifest,
}

impl Project {
    pub fn discover(start: &Path) -> Result<Self> {
        let mut current = Some(start);

        while let Some(dir) = current {
            let candidate = dir.join("package.json");
            if candidate.is_file() {
                return Self::from_manifest_path(candidate);
            }
            current = dir.parent();
        }

        Err(GraphError::ManifestMissing {
            path: start.to_path_buf(),
        })
    }

    pub fn from_manifest_path(path: PathBuf) -> Result<Self> {
        if !path.is_file() {
            return Err(GraphError::ManifestMissing { path });
        }

        let data = fs::read_to_string(&path).map_err(|source| GraphError::ReadFile {
            path: path.clone(),
            source,
        })?;

        let manifest: Manifest =
            serde_json::from_str(&data).map_err(|source| GraphError::ParseJson {
                path: path.clone(),
                source,
            })?;

        let root = match path.parent() {
            Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
            Some(parent) => parent.to_path_buf(),
            None => {
                return Err(GraphError::ManifestInvalid {
                    path: path.clone(),
                    reason: "manifest has no parent directory".into(),
                });
            }
        };

        Ok(Project {
            root,
            manifest_path: path,
            manifest,
        })
    }

    /// Manifest name, or the project directory name when the manifest has none.
    pub fn root_package_name(&self) -> String {
        if let Some(name) = self.manifest.name.as_deref()
            && !name.is_empty()
        {
            return name.to_string();
        }

        let root = self
            .root
            .canonicalize()
            .unwrap_or_else(|_| self.root.clone());

        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string())
    }

    /// Main dependencies that can be graphed. The `jspm` section wins over
    /// the top-level maps when present.
    pub fn main_dependencies(&self) -> BTreeMap<String, String> {
        let declared = match &self.manifest.jspm {
            Some(jspm) => &jspm.dependencies,
            None => &self.manifest.dependencies,
        };

        filter_graphable(declared)
    }

    pub fn dev_dependencies(&self) -> BTreeMap<String, String> {
        let declared = match &self.manifest.jspm {
            Some(jspm) => &jspm.dev_dependencies,
            None => &self.manifest.dev_dependencies,
        };

        filter_graphable(declared)
    }
}

fn filter_graphable(map: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    map.iter()
        .filter(|(_, value)| is_graphable_specifier(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_manifest(dir: &Path, data: &str) -> PathBuf {
        let path = dir.join("package.json");
        fs::write(&path, data).unwrap();
        path
    }

    #[test]
    fn prefers_jspm_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_manifest(
            dir.path(),
            r#"{
                "name": "app",
                "dependencies": { "express": "^4.0.0" },
                "jspm": {
                    "dependencies": { "lodash": "npm:lodash@^4.0.0", "local": "file:../x" },
                    "devDependencies": { "react": "github:facebook/react@16.0.0" }
                }
            }"#,
        );

        let project = Project::from_manifest_path(path).unwrap();

        let main = project.main_dependencies();
        assert_eq!(main.len(), 1);
        assert!(main.contains_key("lodash"));
        assert!(project.dev_dependencies().contains_key("react"));
        assert_eq!(project.root_package_name(), "app");
    }

    #[test]
    fn falls_back_to_top_level_maps_and_directory_name() {
        let dir = tempfile::tempdir().unwrap();
        let project_dir = dir.path().join("my-project");
        fs::create_dir_all(&project_dir).unwrap();
        let path = write_manifest(
            &project_dir,
            r#"{ "devDependencies": { "mocha": "npm:mocha@5.0.0", "chai": "^4.0.0" } }"#,
        );

        let project = Project::from_manifest_path(path).unwrap();

        assert!(project.main_dependencies().is_empty());
        assert_eq!(
            project.dev_dependencies().keys().collect::<Vec<_>>(),
            vec!["mocha"]
        );
        assert_eq!(project.root_package_name(), "my-project");
    }

    #[test]
    fn discover_walks_up_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        write_manifest(dir.path(), r#"{ "name": "outer" }"#);
        let nested = dir.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(&nested).unwrap();

        assert_eq!(project.manifest.name.as_deref(), Some("outer"));
        assert_eq!(project.root, dir.path());
    }
}
