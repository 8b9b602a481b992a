pub mod config;
pub mod console;
pub mod error;
pub mod graph;
pub mod input;
pub mod output;
pub mod package;
pub mod project;
pub mod resolution;
pub mod summary;

pub use config::GraphConfig;
pub use error::GraphError;
pub use graph::{PackageLink, PackageNode, PackageScope, ScopeGraph, ScopeGraphs};
pub use input::GraphInput;
pub use package::{PackageDescriptor, PackageType, SpecifierError};
pub use project::Project;
pub use resolution::Resolution;
pub use summary::GraphSummary;

pub type Result<T> = std::result::Result<T, GraphError>;
