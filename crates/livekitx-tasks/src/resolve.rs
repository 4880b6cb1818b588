// ABOUTME: Locates external tool binaries such as protoc and its plugins.
// ABOUTME: Searches PATH first, then falls back to <workspace root>/bin.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, TaskError};

/// Environment variable naming the workspace root whose `bin/` holds installed tools.
pub const WORKSPACE_ROOT_ENV: &str = "GOPATH";

/// Workspace root used when neither the environment nor configuration sets one (`~/go`).
pub fn default_workspace_root() -> PathBuf {
    dirs::home_dir().map(|h| h.join("go")).unwrap_or_default()
}

/// Workspace root from `GOPATH`, if set and non-empty.
///
/// `GOPATH` may be a list; tools are installed under its first entry.
pub fn env_workspace_root() -> Option<PathBuf> {
    let value = std::env::var_os(WORKSPACE_ROOT_ENV).filter(|v| !v.is_empty())?;
    std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty())
}

/// Workspace root: GOPATH, then `configured`, then `~/go`.
pub fn workspace_root_or(configured: Option<PathBuf>) -> PathBuf {
    env_workspace_root()
        .or(configured)
        .unwrap_or_else(default_workspace_root)
}

/// Resolve a tool using the process environment.
pub fn resolve(name: &str) -> Result<PathBuf> {
    ToolResolver::from_env().resolve(name)
}

/// One-shot tool lookup over a search path and a fallback directory.
#[derive(Debug, Clone)]
pub struct ToolResolver {
    search_path: Option<OsString>,
    workspace_root: PathBuf,
}

impl ToolResolver {
    pub fn new(search_path: Option<OsString>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            search_path,
            workspace_root: workspace_root.into(),
        }
    }

    /// Resolver over `PATH` and `GOPATH` (or `~/go`).
    pub fn from_env() -> Self {
        Self::from_env_or(None)
    }

    /// Like `from_env`, with `configured` used when GOPATH is unset.
    pub fn from_env_or(configured: Option<PathBuf>) -> Self {
        Self::new(std::env::var_os("PATH"), workspace_root_or(configured))
    }

    pub fn with_workspace_root(mut self, workspace_root: impl Into<PathBuf>) -> Self {
        self.workspace_root = workspace_root.into();
        self
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// Directory checked when the search path has no match.
    pub fn fallback_dir(&self) -> PathBuf {
        self.workspace_root.join("bin")
    }

    /// Find `name` on the search path, then under the fallback directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        if let Some(path) = self.search(name) {
            debug!(tool = name, path = %path.display(), "resolved on search path");
            return Ok(path);
        }

        let fallback_dir = self.fallback_dir();
        let candidate = fallback_dir.join(name);
        if candidate.exists() {
            debug!(tool = name, path = %candidate.display(), "resolved in workspace root");
            return Ok(candidate);
        }

        Err(TaskError::ToolNotFound {
            name: name.to_string(),
            fallback_dir,
        })
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        // Names with a separator are paths already and are not searched.
        if Path::new(name).components().count() > 1 {
            return executable_candidate(Path::new(name));
        }

        // Empty entries would mean the current directory; those matches are refused.
        let search_path = self.search_path.as_ref()?;
        std::env::split_paths(search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .find_map(|dir| executable_candidate(&dir.join(name)))
    }
}

fn executable_candidate(path: &Path) -> Option<PathBuf> {
    if is_executable(path) {
        return Some(path.to_path_buf());
    }

    #[cfg(windows)]
    {
        let mut exe = path.as_os_str().to_owned();
        exe.push(".exe");
        let exe = PathBuf::from(exe);
        if is_executable(&exe) {
            return Some(exe);
        }
    }

    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
