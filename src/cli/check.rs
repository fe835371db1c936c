//! Check command: lints the commit messages in a range.

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::StandardStream;
use tracing::{debug, warn};

use super::formatting::{color_choice, write_report};
use super::ConfigArgs;
use crate::data::{to_yaml, OutputFormat};
use crate::git::GitRepository;
use crate::lint::{LintSession, Report, RuleSet};

/// Range checked when none is given.
pub const DEFAULT_RANGE: &str = "HEAD~1..HEAD";

/// Check command options.
#[derive(Parser)]
pub struct CheckCommand {
    /// Commit range to check (e.g. HEAD~3..HEAD, main..HEAD, HEAD).
    #[arg(value_name = "RANGE", default_value = DEFAULT_RANGE)]
    pub range: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Skip correction suggestions.
    #[arg(long)]
    pub no_suggestions: bool,
}

impl CheckCommand {
    /// Executes the check command.
    pub fn execute(self, config: &ConfigArgs) -> Result<i32> {
        let rules = config.load_rules()?;
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let commits = repo.commits_in_range(&self.range)?;
        if commits.is_empty() {
            warn!("No commits found in range {}", self.range);
        }
        debug!(range = %self.range, count = commits.len(), "Checking commits");

        let session = if self.no_suggestions {
            LintSession::without_suggestions(&rules)
        } else {
            LintSession::new(&rules)
        };
        let report = session.run(&commits);

        print_report(&report, &rules, self.format, repo.head_id().as_deref())?;
        Ok(report.exit_code())
    }
}

/// Prints a report to stdout in the requested format.
pub(crate) fn print_report(
    report: &Report,
    rules: &RuleSet,
    format: OutputFormat,
    head_id: Option<&str>,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            let mut stdout = StandardStream::stdout(color_choice());
            write_report(&mut stdout, report, rules, head_id)
                .context("Failed to write report")?;
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            print!("{}", to_yaml(report)?);
        }
    }
    Ok(())
}
