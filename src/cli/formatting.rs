//! Terminal rendering of lint results.
//!
//! Everything here writes to a [`WriteColor`] so output can be captured in
//! a [`termcolor::Buffer`] for tests.

use std::io::{self, IsTerminal, Write};

use termcolor::{Color, ColorChoice, ColorSpec, WriteColor};

use crate::lint::{CommitFailure, Report, RuleSet, UNCOMMITTED};
use crate::suggest::Suggestion;

/// Color choice for stdout: colored only when attached to a terminal.
pub(crate) fn color_choice() -> ColorChoice {
    if io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Truncates a commit hash to [`SHORT_HASH_LEN`](crate::git::SHORT_HASH_LEN) characters.
pub(crate) fn truncate_hash(hash: &str) -> &str {
    let len = crate::git::SHORT_HASH_LEN;
    if hash.len() > len && hash.is_char_boundary(len) {
        &hash[..len]
    } else {
        hash
    }
}

fn write_styled<W: WriteColor>(out: &mut W, color: Color, bold: bool, text: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(out, "{text}")?;
    out.reset()
}

/// Writes a heading underlined with `=`.
pub(crate) fn write_section<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    write_styled(out, Color::Cyan, true, title)?;
    writeln!(out)?;
    writeln!(out, "{}", "=".repeat(title.chars().count()))
}

/// Writes a green success line.
pub(crate) fn write_success<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    write_styled(out, Color::Green, true, "✓ ")?;
    writeln!(out, "{text}")
}

/// Writes a yellow notice line.
pub(crate) fn write_warning<W: WriteColor>(out: &mut W, text: &str) -> io::Result<()> {
    write_styled(out, Color::Yellow, true, "! ")?;
    writeln!(out, "{text}")
}

/// Shell-quotes a message for a `git commit -m` example.
fn quote_message(message: &str) -> String {
    format!("\"{}\"", message.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Instructions for rewording a failing commit.
///
/// The latest commit can be amended; older ones need an interactive rebase.
pub(crate) fn fix_instructions(commit_id: &str, is_head: bool, suggested: Option<&str>) -> String {
    let example = quote_message(suggested.unwrap_or("type(scope): your message"));

    if commit_id == UNCOMMITTED {
        return format!("   Fix: edit the message, for example {example}\n");
    }

    if is_head {
        format!("   Fix (latest commit): amend it\n      git commit --amend -m {example}\n")
    } else {
        format!(
            "   Fix (older commit): use interactive rebase\n      git rebase -i {}~1\n      Change 'pick' to 'reword' for the target commit\n",
            truncate_hash(commit_id)
        )
    }
}

/// Writes one failure with its reason, suggestion and fix steps.
pub(crate) fn write_failure<W: WriteColor>(
    out: &mut W,
    failure: &CommitFailure,
    head_id: Option<&str>,
) -> io::Result<()> {
    let id = if failure.commit_id == UNCOMMITTED {
        UNCOMMITTED
    } else {
        truncate_hash(&failure.commit_id)
    };
    write_styled(out, Color::Red, true, "✗ ")?;
    writeln!(out, "{id} - \"{}\"", failure.message)?;
    write!(out, "   ")?;
    write_styled(out, Color::Red, false, &failure.reason.to_string())?;
    writeln!(out)?;

    if let Some(suggested) = &failure.suggested_message {
        writeln!(out, "   Suggested message:")?;
        write!(out, "      ")?;
        write_styled(out, Color::Green, false, suggested)?;
        writeln!(out)?;
    }

    let is_head = head_id == Some(failure.commit_id.as_str());
    write!(
        out,
        "{}",
        fix_instructions(&failure.commit_id, is_head, failure.suggested_message.as_deref())
    )
}

/// Reference block listing the accepted format and types.
pub(crate) fn reference_text(rules: &RuleSet) -> String {
    let scope = if rules.require_scope { "(scope)" } else { "[(scope)]" };
    format!(
        "Valid commit format: type{scope}: message (max {} chars)\nAllowed types: {}\n",
        rules.max_subject_length,
        rules.allowed_types.join(", ")
    )
}

/// One-line summary of a report.
pub(crate) fn summary_text(report: &Report) -> String {
    format!(
        "Summary: {} commits checked, {} passed, {} with issues",
        report.total_checked,
        report.passing(),
        report.failures.len()
    )
}

/// Writes a full lint report.
pub(crate) fn write_report<W: WriteColor>(
    out: &mut W,
    report: &Report,
    rules: &RuleSet,
    head_id: Option<&str>,
) -> io::Result<()> {
    if report.passed() {
        write_success(out, "All commits passed linting!")?;
        return writeln!(out, "{}", summary_text(report));
    }

    writeln!(out)?;
    write_section(out, "Linting Issues Found:")?;
    writeln!(out)?;
    for failure in &report.failures {
        write_failure(out, failure, head_id)?;
        writeln!(out)?;
    }

    write_section(out, "Reference Information:")?;
    write!(out, "{}", reference_text(rules))?;
    writeln!(out)?;
    writeln!(out, "{}", summary_text(report))
}

/// Writes a change-set suggestion.
pub(crate) fn write_suggestion<W: WriteColor>(out: &mut W, suggestion: &Suggestion) -> io::Result<()> {
    writeln!(out, "Suggested commit message:")?;
    write!(out, "   ")?;
    write_styled(out, Color::Green, true, &suggestion.header())?;
    writeln!(out)?;
    writeln!(out, "   (confidence {:.1})", suggestion.confidence)
}
