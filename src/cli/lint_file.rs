//! Lint-file command: lints a message file before it is committed.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::check::print_report;
use super::ConfigArgs;
use crate::data::OutputFormat;
use crate::lint::{Commit, LintSession};

/// Line git writes above the diff in `commit --verbose` messages.
const SCISSORS_LINE: &str = "# ------------------------ >8 ------------------------";

/// Lint-file command options.
#[derive(Parser)]
pub struct LintFileCommand {
    /// Path to the commit message file (e.g. .git/COMMIT_EDITMSG).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl LintFileCommand {
    /// Executes the lint-file command.
    pub fn execute(self, config: &ConfigArgs) -> Result<i32> {
        let rules = config.load_rules()?;
        let contents = fs::read_to_string(&self.file)
            .with_context(|| format!("Failed to read message file: {}", self.file.display()))?;

        let commit = Commit::uncommitted(strip_comments(&contents));
        let report = LintSession::new(&rules).run(std::slice::from_ref(&commit));

        print_report(&report, &rules, self.format, None)?;
        Ok(report.exit_code())
    }
}

/// Drops git comment lines and everything below the scissors line, then
/// trims surrounding blank lines the way `git commit` cleans up messages.
pub(crate) fn strip_comments(contents: &str) -> String {
    contents
        .lines()
        .take_while(|line| *line != SCISSORS_LINE)
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
