//! commit-msg hook installation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::GitRepository;

/// Script written to `.git/hooks/commit-msg`.
pub const HOOK_SCRIPT: &str = r#"#!/bin/sh
commit_msg_file="$1"

# Run the linter with the commit message file
commit-linter lint-file "$commit_msg_file" || exit 1
"#;

/// What an installation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInstall {
    /// Path of the installed hook.
    pub path: PathBuf,
    /// Whether an existing hook was overwritten.
    pub replaced: bool,
    /// Where `commit-msg.sample` was moved, if it existed.
    pub sample_backup: Option<PathBuf>,
}

/// Installs the commit-msg hook.
///
/// Refuses to overwrite an existing hook unless `force` is set.
pub fn install_hook(repo: &GitRepository, force: bool) -> Result<HookInstall> {
    let hooks_dir = repo.path().join("hooks");
    fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("Failed to create hooks directory: {}", hooks_dir.display()))?;

    let hook_path = hooks_dir.join("commit-msg");
    let replaced = hook_path.exists();
    if replaced && !force {
        anyhow::bail!(
            "A commit-msg hook already exists at {}. Re-run with --force to overwrite it.",
            hook_path.display()
        );
    }

    fs::write(&hook_path, HOOK_SCRIPT)
        .with_context(|| format!("Failed to write hook file: {}", hook_path.display()))?;
    make_executable(&hook_path)?;
    info!("Installed commit-msg hook at {}", hook_path.display());

    let sample_path = hooks_dir.join("commit-msg.sample");
    let sample_backup = if sample_path.exists() {
        let backup_path = hooks_dir.join("commit-msg.sample.backup");
        match fs::rename(&sample_path, &backup_path) {
            Ok(()) => Some(backup_path),
            Err(e) => {
                warn!("Could not back up sample hook: {e}");
                None
            }
        }
    } else {
        None
    };

    Ok(HookInstall {
        path: hook_path,
        replaced,
        sample_backup,
    })
}

#[cfg(unix)]
fn make_executable(path: &std::path::Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to make hook executable: {}", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &std::path::Path) -> Result<()> {
    Ok(())
}
