use crate::package::SpecifierError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Failed to read file {path:?}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },

    #[error("Failed to parse JSON in {path:?}: {source}")]
    ParseJson { path: PathBuf, source: serde_json::Error },

    #[error("Failed to parse YAML in {path:?}: {source}")]
    ParseYaml { path: PathBuf, source: serde_yaml::Error },

    #[error("Failed to serialize graph data: {reason}")]
    SerializeJson { reason: String },

    #[error("Project manifest package.json not found at {path:?}")]
    ManifestMissing { path: PathBuf },

    #[error("Invalid manifest in {path:?}: {reason}")]
    ManifestInvalid { path: PathBuf, reason: String },

    #[error("Resolution snapshot not found at {path:?}. Run the resolver first.")]
    ResolutionMissing { path: PathBuf },

    #[error("unknown top level package: {key}")]
    UnknownTopLevelPackage { key: String },

    #[error("invalid top level package {key}: {source}")]
    InvalidSpecifier { key: String, source: SpecifierError },
}
