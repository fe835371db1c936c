//! Install-hook command.

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::StandardStream;

use super::formatting::{color_choice, write_success, write_warning};
use crate::git::{install_hook, GitRepository};

/// Install-hook command options.
#[derive(Parser)]
pub struct InstallHookCommand {
    /// Overwrite an existing commit-msg hook.
    #[arg(long)]
    pub force: bool,
}

impl InstallHookCommand {
    /// Executes the install-hook command.
    pub fn execute(self) -> Result<i32> {
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let installed = install_hook(&repo, self.force)?;

        let mut stdout = StandardStream::stdout(color_choice());
        if installed.replaced {
            write_warning(&mut stdout, "Replaced the existing commit-msg hook")?;
        }
        if let Some(backup) = &installed.sample_backup {
            write_warning(
                &mut stdout,
                &format!("Moved the sample hook to {}", backup.display()),
            )?;
        }
        write_success(
            &mut stdout,
            &format!("Installed commit-msg hook at {}", installed.path.display()),
        )?;
        Ok(0)
    }
}
