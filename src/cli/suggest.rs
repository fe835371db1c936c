//! Suggest command: proposes a message for the staged changes.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use termcolor::{StandardStream, WriteColor};
use tracing::debug;

use super::formatting::{color_choice, write_suggestion, write_warning};
use super::ConfigArgs;
use crate::data::{to_yaml, OutputFormat};
use crate::git::GitRepository;
use crate::suggest::{analyze, Suggester, Suggestion};

/// Suggest command options.
#[derive(Parser)]
pub struct SuggestCommand {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl SuggestCommand {
    /// Executes the suggest command. Exits with 1 when nothing could be
    /// suggested, whatever the output format.
    pub fn execute(self, config: &ConfigArgs) -> Result<i32> {
        let rules = config.load_rules()?;
        let repo = GitRepository::open().context("Failed to open git repository")?;
        let staged = repo.staged_changes()?;

        let mut stdout = StandardStream::stdout(color_choice());
        let mut stderr = StandardStream::stderr(color_choice());

        let Some(analysis) = analyze(&staged.files, &staged.diff_lines) else {
            write_warning(&mut stderr, "No staged changes. Stage files with `git add` first.")?;
            return Ok(1);
        };
        debug!(?analysis, "Analyzed staged changes");

        let suggestion = Suggester::new(&rules.keywords).suggest_from_changes(&analysis);
        print_suggestion(&mut stdout, &mut stderr, self.format, suggestion.as_ref())
    }
}

/// Writes the suggestion to `out` and notices to `err`, returning the exit
/// code.
///
/// Structured formats print `null` when nothing is suggested so the output
/// always parses.
pub(crate) fn print_suggestion<O: WriteColor, E: WriteColor>(
    out: &mut O,
    err: &mut E,
    format: OutputFormat,
    suggestion: Option<&Suggestion>,
) -> Result<i32> {
    match format {
        OutputFormat::Text => {
            if let Some(suggestion) = suggestion {
                write_suggestion(out, suggestion)?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&suggestion)
                .context("Failed to serialize suggestion")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Yaml => {
            write!(out, "{}", to_yaml(&suggestion)?)?;
        }
    }

    if suggestion.is_none() {
        write_warning(err, "Could not determine a commit type for the staged changes.")?;
        return Ok(1);
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::Buffer;

    fn suggestion() -> Suggestion {
        Suggestion {
            commit_type: "docs".to_string(),
            scope: None,
            subject: "update documentation for README.md".to_string(),
            confidence: 0.8,
        }
    }

    fn run(format: OutputFormat, suggestion: Option<&Suggestion>) -> (i32, String, String) {
        let mut out = Buffer::no_color();
        let mut err = Buffer::no_color();
        let code = print_suggestion(&mut out, &mut err, format, suggestion).unwrap();
        (
            code,
            String::from_utf8(out.into_inner()).unwrap(),
            String::from_utf8(err.into_inner()).unwrap(),
        )
    }

    #[test]
    fn json_output_parses() {
        let (code, out, err) = run(OutputFormat::Json, Some(&suggestion()));
        assert_eq!(code, 0);
        assert!(err.is_empty());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["type"], "docs");
    }

    #[test]
    fn no_suggestion_exits_one_in_every_format() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
            let (code, _, err) = run(format, None);
            assert_eq!(code, 1, "{format}");
            assert!(err.contains("Could not determine a commit type"), "{format}");
        }
    }

    #[test]
    fn structured_output_stays_clean_without_suggestion() {
        let (_, out, _) = run(OutputFormat::Json, None);
        assert_eq!(out.trim(), "null");

        let (_, out, _) = run(OutputFormat::Text, None);
        assert!(out.is_empty());
    }
}
