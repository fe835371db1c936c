//! Configuration file discovery.

use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "COMMIT_LINTER_CONFIG_DIR";

/// Default project configuration directory.
pub const DEFAULT_CONFIG_DIR: &str = ".commit-linter";

/// Returns `$XDG_CONFIG_HOME/commit-linter/`, or `$HOME/.config/commit-linter/`
/// when the variable is unset.
///
/// Reads the variable directly because `dirs::config_dir()` points at
/// `~/Library/Application Support/` on macOS.
fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_home.is_empty() {
            return Some(PathBuf::from(xdg_home).join("commit-linter"));
        }
    }

    dirs::home_dir().map(|home| home.join(".config").join("commit-linter"))
}

/// Where a configuration file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given on the command line.
    Explicit(PathBuf),
    /// `{dir}/local/{filename}`.
    LocalOverride(PathBuf),
    /// `{dir}/{filename}`.
    Project(PathBuf),
    /// `$XDG_CONFIG_HOME/commit-linter/{filename}`.
    Xdg(PathBuf),
    /// `$HOME/.commit-linter/{filename}`.
    Global(PathBuf),
    /// Not found at any tier.
    NotFound,
}

impl ConfigSource {
    /// Path of the file, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p)
            | Self::LocalOverride(p)
            | Self::Project(p)
            | Self::Xdg(p)
            | Self::Global(p) => Some(p),
            Self::NotFound => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "Explicit: {}", p.display()),
            Self::LocalOverride(p) => write!(f, "Local override: {}", p.display()),
            Self::Project(p) => write!(f, "Project: {}", p.display()),
            Self::Xdg(p) => write!(f, "Global (XDG): {}", p.display()),
            Self::Global(p) => write!(f, "Global: {}", p.display()),
            Self::NotFound => write!(f, "(not found)"),
        }
    }
}

/// Resolves the configuration directory.
///
/// Priority:
/// 1. `override_dir` (from `--config-dir`)
/// 2. `COMMIT_LINTER_CONFIG_DIR`
/// 3. `.commit-linter`
pub fn resolve_config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }

    if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV) {
        if !env_dir.is_empty() {
            return PathBuf::from(env_dir);
        }
    }

    PathBuf::from(DEFAULT_CONFIG_DIR)
}

/// Finds `filename` by checking, in order, `{dir}/local/`, `{dir}/`, the
/// XDG config directory and `$HOME/.commit-linter/`.
pub fn locate_config_file(dir: &Path, filename: &str) -> ConfigSource {
    let local_path = dir.join("local").join(filename);
    if local_path.exists() {
        return ConfigSource::LocalOverride(local_path);
    }

    let project_path = dir.join(filename);
    if project_path.exists() {
        return ConfigSource::Project(project_path);
    }

    if let Some(xdg_dir) = xdg_config_dir() {
        let xdg_path = xdg_dir.join(filename);
        if xdg_path.exists() {
            return ConfigSource::Xdg(xdg_path);
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_path = home_dir.join(DEFAULT_CONFIG_DIR).join(filename);
        if home_path.exists() {
            return ConfigSource::Global(home_path);
        }
    }

    ConfigSource::NotFound
}
