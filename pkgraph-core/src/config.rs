use directories::BaseDirs;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

const RC_FILE: &str = ".pkgraphrc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    pub package_path: PathBuf,
    pub resolution_path: PathBuf,
    pub destination: PathBuf,
    pub verbose: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            package_path: PathBuf::from("package.json"),
            resolution_path: PathBuf::from("pkgraph-resolution.yaml"),
            destination: PathBuf::from("docs"),
            verbose: false,
        }
    }
}

impl GraphConfig {
    pub fn from_env() -> Self {
        let home = BaseDirs::new().map(|base| base.home_dir().to_path_buf());
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        Self::load(home.as_deref(), &cwd, read_env)
    }

    /// Layers defaults, `home/.pkgraphrc`, `cwd/.pkgraphrc` and the
    /// `PKGRAPH_*` variables returned by `lookup`, later layers winning.
    pub fn load(
        home: Option<&Path>,
        cwd: &Path,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut config = GraphConfig::default();

        if let Some(home) = home {
            config.apply_rc_file(&home.join(RC_FILE));
        }

        config.apply_rc_file(&cwd.join(RC_FILE));

        if let Some(value) = lookup("PKGRAPH_PACKAGE") {
            config.package_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("PKGRAPH_RESOLUTION") {
            config.resolution_path = PathBuf::from(value);
        }

        if let Some(value) = lookup("PKGRAPH_DESTINATION") {
            config.destination = PathBuf::from(value);
        }

        if let Some(value) = lookup("PKGRAPH_VERBOSE")
            && let Some(verbose) = parse_bool(&value)
        {
            config.verbose = verbose;
        }

        config
    }

    /// Whether the manifest location was set by an rc file or the environment.
    pub fn has_explicit_package(&self) -> bool {
        self.package_path != GraphConfig::default().package_path
    }

    /// Directory that receives the rendered graph documents.
    pub fn graph_dir(&self) -> PathBuf {
        self.destination.join("graphs").join("jspm_packages")
    }

    fn apply_rc_file(&mut self, path: &Path) {
        if !path.is_file() {
            return;
        }

        if let Ok(data) = fs::read_to_string(path) {
            self.apply_rc(&data);
        }
    }

    fn apply_rc(&mut self, data: &str) {
        for line in data.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let Some((key, value)) = trimmed.split_once('=') else {
                continue;
            };

            let key = key.trim();
            let value = value.trim();

            if value.is_empty() {
                continue;
            }

            match key {
                "package" => self.package_path = PathBuf::from(value),
                "resolution" => self.resolution_path = PathBuf::from(value),
                "destination" => self.destination = PathBuf::from(value),
                "verbose" => {
                    if let Some(verbose) = parse_bool(value) {
                        self.verbose = verbose;
                    }
                }
                _ => {}
            }
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let trimmed = value.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
