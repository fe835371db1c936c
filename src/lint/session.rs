//! Batch validation over a sequence of commits.

use serde::Serialize;
use tracing::{debug, info};

use super::parser::parse;
use super::rules::RuleSet;
use super::validator::{validate_message, ValidationOutcome, ValidationReason};
use crate::suggest::{format_header, SuggestError, Suggester, Suggestion};

/// Commit id used for messages that are not yet committed.
pub const UNCOMMITTED: &str = "UNCOMMITTED";

/// A commit message paired with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit hash or [`UNCOMMITTED`].
    pub id: String,
    /// Full message as written.
    pub raw_message: String,
}

impl Commit {
    /// Creates a commit record.
    pub fn new(id: impl Into<String>, raw_message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_message: raw_message.into(),
        }
    }

    /// Wraps a message that has not been committed yet.
    pub fn uncommitted(raw_message: impl Into<String>) -> Self {
        Self::new(UNCOMMITTED, raw_message)
    }

    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.raw_message.lines().next().unwrap_or("")
    }
}

/// A commit that failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitFailure {
    /// Identifier of the failing commit.
    pub commit_id: String,
    /// First line of the original message.
    pub message: String,
    /// First rule that failed.
    pub reason: ValidationReason,
    /// Keyword-based suggestion, when one could be made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
    /// Suggested replacement header.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_message: Option<String>,
}

/// Aggregated result of a lint run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Number of commits validated.
    pub total_checked: usize,
    /// Failures in input order.
    pub failures: Vec<CommitFailure>,
}

impl Report {
    /// True when no commit failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of commits that passed.
    pub fn passing(&self) -> usize {
        self.total_checked - self.failures.len()
    }

    /// Process exit code for the report.
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.passed())
    }
}

/// Validates commits against one rule set.
#[derive(Debug)]
pub struct LintSession<'a> {
    rules: &'a RuleSet,
    suggester: Option<Suggester<'a>>,
}

impl<'a> LintSession<'a> {
    /// Creates a session that attaches suggestions to failures.
    pub fn new(rules: &'a RuleSet) -> Self {
        let suggester = if rules.keywords.is_empty() {
            debug!("No commit type keywords available; suggestions are disabled");
            None
        } else {
            Some(Suggester::new(&rules.keywords))
        };
        Self { rules, suggester }
    }

    /// Creates a session that only validates.
    pub fn without_suggestions(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            suggester: None,
        }
    }

    /// Validates every commit once, in order, and collects the failures.
    pub fn run(&self, commits: &[Commit]) -> Report {
        let failures: Vec<CommitFailure> =
            commits.iter().filter_map(|c| self.check(c)).collect();

        info!(
            total = commits.len(),
            failed = failures.len(),
            "Lint run complete"
        );

        Report {
            total_checked: commits.len(),
            failures,
        }
    }

    /// Validates a single commit, returning the failure record if any.
    pub fn check(&self, commit: &Commit) -> Option<CommitFailure> {
        let ValidationOutcome::Invalid(reason) = validate_message(&commit.raw_message, self.rules)
        else {
            debug!(commit = %commit.id, "Commit passed");
            return None;
        };
        debug!(commit = %commit.id, %reason, "Commit failed");

        let suggestion = self.suggest(commit);
        let suggested_message = suggestion
            .as_ref()
            .map(|s| replacement_header(s, &commit.raw_message))
            .filter(|header| header != commit.summary().trim());

        Some(CommitFailure {
            commit_id: commit.id.clone(),
            message: commit.summary().to_string(),
            reason,
            suggestion,
            suggested_message,
        })
    }

    fn suggest(&self, commit: &Commit) -> Option<Suggestion> {
        let suggester = self.suggester.as_ref()?;
        match suggester.suggest_from_message(&commit.raw_message) {
            Ok(suggestion) => suggestion,
            Err(SuggestError::EmptyMessage) => {
                debug!(commit = %commit.id, "Empty message, no suggestion");
                None
            }
        }
    }
}

/// Header for a failure, keeping a scope the author already wrote.
fn replacement_header(suggestion: &Suggestion, raw_message: &str) -> String {
    let written_scope = parse(raw_message.trim())
        .ok()
        .map(|p| p.scope)
        .filter(|s| !s.is_empty());
    let scope = written_scope.as_deref().or(suggestion.scope.as_deref());
    format_header(&suggestion.commit_type, scope, &suggestion.subject)
}
