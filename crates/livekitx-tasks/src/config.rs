// ABOUTME: Optional TOML configuration for the livekitx tasks.
// ABOUTME: Output directory, protoc include paths and the tool fallback root.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::resolve::{workspace_root_or, ToolResolver};

/// Config file looked up in the working directory when none is named.
pub const CONFIG_FILE: &str = "livekitx-tasks.toml";

/// Directory the generated Go sources are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "livekitx";

/// Include paths of the development machine the bindings were first generated on.
pub const DEFAULT_INCLUDE_PATHS: &[&str] = &[
    "/home/go/go/bin",
    "/home/go/go/src/google",
    ".",
    "/home/go/go/src",
];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Output directory passed to every `--*_out` flag
    pub output_dir: PathBuf,

    /// protoc `-I` paths, in order
    pub include_paths: Vec<PathBuf>,

    /// Tool fallback root; GOPATH takes precedence when set
    pub workspace_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            include_paths: DEFAULT_INCLUDE_PATHS.iter().map(PathBuf::from).collect(),
            workspace_root: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config)
    }

    /// Load the named file, or `livekitx-tasks.toml` if present, or defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let default_path = Path::new(CONFIG_FILE);
        if default_path.is_file() {
            return Self::load(default_path);
        }

        Ok(Self::default())
    }

    /// Workspace root: flag, then GOPATH, then this config, then `~/go`.
    pub fn workspace_root(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| workspace_root_or(self.workspace_root.clone()))
    }

    /// Tool resolver over `PATH` with this config's workspace root.
    pub fn resolver(&self, flag: Option<PathBuf>) -> ToolResolver {
        let resolver = ToolResolver::from_env_or(self.workspace_root.clone());
        match flag {
            Some(root) => resolver.with_workspace_root(root),
            None => resolver,
        }
    }
}
