//! CLI interface for commit-linter.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::config::ConfigLoader;
use crate::lint::RuleSet;

pub mod check;
pub mod formatting;
pub mod install_hook;
pub mod lint_file;
pub mod suggest;

/// commit-linter: checks commit messages follow `type(scope): subject`.
#[derive(Parser)]
#[command(name = "commit-linter")]
#[command(about = "Lints commit messages and suggests corrections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration sources.
    #[command(flatten)]
    pub config: ConfigArgs,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Where rules and keywords are loaded from.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to the rule file (YAML). Defaults to the built-in rules.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the keyword file (YAML) used for suggestions.
    #[arg(long, global = true, value_name = "FILE")]
    pub keywords: Option<PathBuf>,

    /// Configuration directory (defaults to .commit-linter/).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,
}

impl ConfigArgs {
    /// Loads the rule set, keywords included.
    pub fn load_rules(&self) -> Result<RuleSet> {
        ConfigLoader::new(self.config_dir.as_deref())
            .load(self.config.as_deref(), self.keywords.as_deref())
    }
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Lints the commit messages in a range.
    Check(check::CheckCommand),
    /// Lints a commit message file (used by the commit-msg hook).
    #[command(name = "lint-file")]
    LintFile(lint_file::LintFileCommand),
    /// Suggests a commit message for the staged changes.
    Suggest(suggest::SuggestCommand),
    /// Installs the commit-msg hook in the current repository.
    #[command(name = "install-hook")]
    InstallHook(install_hook::InstallHookCommand),
}

impl Cli {
    /// Executes the CLI command and returns the process exit code.
    pub fn execute(self) -> Result<i32> {
        match self.command {
            Commands::Check(cmd) => cmd.execute(&self.config),
            Commands::LintFile(cmd) => cmd.execute(&self.config),
            Commands::Suggest(cmd) => cmd.execute(&self.config),
            Commands::InstallHook(cmd) => cmd.execute(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_global_config() {
        let cli = Cli::try_parse_from([
            "commit-linter",
            "check",
            "HEAD~3..HEAD",
            "--config",
            "rules.yaml",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.config.config, Some(PathBuf::from("rules.yaml")));
        match cli.command {
            Commands::Check(cmd) => {
                assert_eq!(cmd.range, "HEAD~3..HEAD");
                assert_eq!(cmd.format, crate::data::OutputFormat::Json);
            }
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn check_range_defaults_to_latest_commit() {
        let cli = Cli::try_parse_from(["commit-linter", "check"]).unwrap();
        match cli.command {
            Commands::Check(cmd) => assert_eq!(cmd.range, check::DEFAULT_RANGE),
            _ => panic!("expected check"),
        }
    }

    #[test]
    fn lint_file_requires_path() {
        assert!(Cli::try_parse_from(["commit-linter", "lint-file"]).is_err());
    }
}
