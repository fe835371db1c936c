//! Keyword-scored correction suggestions.
//!
//! Two entry points share the same idea of accumulating unnormalized
//! weights per candidate and keeping the first-declared best:
//!
//! - [`Suggester::suggest_from_message`] scores the text of a rejected
//!   message and always names a type, falling back to `chore`.
//! - [`Suggester::suggest_from_changes`] scores a change set and returns
//!   nothing when no type is confident enough.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::lint::parser::parse;
use crate::lint::rules::{KeywordDictionary, KeywordGroup};

pub mod analyzer;
pub mod templates;

pub use analyzer::{analyze, ChangeSetAnalysis};
pub use templates::{describe_major_change, SubjectTemplate, TemplateTable};

/// Minimum score for a candidate to be declared.
pub const CONFIDENCE_FLOOR: f64 = 0.3;

/// Type used when text scoring finds nothing confident.
pub const FALLBACK_TYPE: &str = "chore";

const PREFIX_WEIGHT: f64 = 0.6;
const CONTAINS_WEIGHT: f64 = 0.3;
const SCOPE_WEIGHT: f64 = 0.4;
const DOCS_PRIOR: f64 = 0.8;
const TEST_PRIOR: f64 = 0.8;
const STYLE_PRIOR: f64 = 0.6;
const ADDED_LINE_WEIGHT: f64 = 0.3;
const REMOVED_LINE_WEIGHT: f64 = 0.2;

/// Proposed replacement for a commit message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// Suggested commit type.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Suggested scope, if one scored high enough.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Subject line.
    pub subject: String,
    /// Raw accumulated score of the winning type. Not a probability.
    pub confidence: f64,
}

impl Suggestion {
    /// Formats the suggestion as a `type(scope): subject` header.
    pub fn header(&self) -> String {
        format_header(&self.commit_type, self.scope.as_deref(), &self.subject)
    }
}

/// Formats a header, omitting the scope segment when it is empty.
pub fn format_header(commit_type: &str, scope: Option<&str>, subject: &str) -> String {
    match scope {
        Some(scope) if !scope.is_empty() => format!("{commit_type}({scope}): {subject}"),
        _ => format!("{commit_type}: {subject}"),
    }
}

/// Suggester precondition failures.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestError {
    /// The message is empty or whitespace only.
    #[error("empty commit message")]
    EmptyMessage,
}

/// Scores messages and change sets against a keyword dictionary.
#[derive(Debug)]
pub struct Suggester<'a> {
    keywords: &'a KeywordDictionary,
    templates: TemplateTable,
}

impl<'a> Suggester<'a> {
    /// Creates a suggester with the built-in subject templates.
    pub fn new(keywords: &'a KeywordDictionary) -> Self {
        Self::with_templates(keywords, TemplateTable::default())
    }

    /// Creates a suggester with a custom template table.
    pub fn with_templates(keywords: &'a KeywordDictionary, templates: TemplateTable) -> Self {
        Self {
            keywords,
            templates,
        }
    }

    /// Suggests a type and scope for a rejected message.
    ///
    /// Returns `Ok(None)` when no keyword dictionary is available.
    pub fn suggest_from_message(&self, raw: &str) -> Result<Option<Suggestion>, SuggestError> {
        let message = raw.trim();
        if message.is_empty() {
            return Err(SuggestError::EmptyMessage);
        }
        if self.keywords.is_empty() {
            debug!("No keyword dictionary loaded, skipping text suggestion");
            return Ok(None);
        }

        let lowered = message.to_lowercase();

        let (commit_type, confidence) = match best_candidate(&self.keywords.types, |group| {
            text_type_score(&lowered, &group.keywords)
        }) {
            Some((group, score)) => (group.name.clone(), score),
            None => (FALLBACK_TYPE.to_string(), 0.0),
        };

        let scope = best_candidate(&self.keywords.scopes, |group| {
            text_scope_score(&lowered, &group.keywords)
        })
        .map(|(group, _)| group.name.clone());

        let first_line = message.lines().next().unwrap_or(message);
        let subject = match parse(first_line) {
            Ok(parsed) => parsed.subject,
            Err(_) => first_line.to_string(),
        };

        debug!(%commit_type, ?scope, confidence, "Text suggestion");

        Ok(Some(Suggestion {
            commit_type,
            scope,
            subject,
            confidence,
        }))
    }

    /// Suggests a full message for a change set, or `None` when no type
    /// reaches the confidence floor.
    pub fn suggest_from_changes(&self, analysis: &ChangeSetAnalysis) -> Option<Suggestion> {
        if analysis.changed_files.is_empty() {
            return None;
        }

        let (group, confidence) = best_candidate(&self.keywords.types, |group| {
            change_set_score(group, analysis)
        })?;

        let subject = self.templates.render(&group.name, analysis);
        debug!(commit_type = %group.name, confidence, %subject, "Change-set suggestion");

        Some(Suggestion {
            commit_type: group.name.clone(),
            scope: None,
            subject,
            confidence,
        })
    }
}

/// Returns the strictly highest-scoring group at or above the floor.
/// Earlier groups win ties.
fn best_candidate<F>(groups: &[KeywordGroup], score: F) -> Option<(&KeywordGroup, f64)>
where
    F: Fn(&KeywordGroup) -> f64,
{
    let mut best: Option<(&KeywordGroup, f64)> = None;
    for group in groups {
        let s = score(group);
        if best.map_or(true, |(_, b)| s > b) {
            best = Some((group, s));
        }
    }
    best.filter(|(_, s)| *s >= CONFIDENCE_FLOOR)
}

/// Lowercased keywords, blank entries dropped.
fn usable_keywords(keywords: &[String]) -> impl Iterator<Item = String> + '_ {
    keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase)
}

fn text_type_score(lowered: &str, keywords: &[String]) -> f64 {
    let mut score = 0.0;
    for keyword in usable_keywords(keywords) {
        if lowered.starts_with(&keyword) {
            score += PREFIX_WEIGHT;
        }
        if lowered.contains(&keyword) {
            score += CONTAINS_WEIGHT;
        }
    }
    score
}

fn text_scope_score(lowered: &str, keywords: &[String]) -> f64 {
    usable_keywords(keywords)
        .filter(|k| lowered.contains(k.as_str()))
        .count() as f64
        * SCOPE_WEIGHT
}

fn change_set_score(group: &KeywordGroup, analysis: &ChangeSetAnalysis) -> f64 {
    let mut score = match group.name.as_str() {
        "docs" if analysis.count(".md") > 0 => DOCS_PRIOR,
        "test" if analysis.count(analyzer::TEST_BUCKET) > 0 => TEST_PRIOR,
        "style" if analysis.count(".css") > 0 || analysis.count(".scss") > 0 => STYLE_PRIOR,
        _ => 0.0,
    };

    for keyword in &group.keywords {
        let Some(pattern) = whole_word(keyword) else {
            continue;
        };
        let added = analysis
            .added_lines
            .iter()
            .filter(|l| pattern.is_match(l))
            .count();
        let removed = analysis
            .removed_lines
            .iter()
            .filter(|l| pattern.is_match(l))
            .count();
        score += added as f64 * ADDED_LINE_WEIGHT + removed as f64 * REMOVED_LINE_WEIGHT;
    }

    score
}

/// Case-insensitive whole-word matcher for a keyword.
fn whole_word(keyword: &str) -> Option<Regex> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return None;
    }
    match RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            debug!("Skipping keyword {keyword:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> KeywordDictionary {
        KeywordDictionary {
            types: vec![
                KeywordGroup::new("feat", &["add", "implement", "new"]),
                KeywordGroup::new("fix", &["fix", "bug", "patch"]),
                KeywordGroup::new("docs", &["readme", "documentation"]),
                KeywordGroup::new("style", &["format", "whitespace"]),
                KeywordGroup::new("test", &["test", "assert"]),
                KeywordGroup::new("chore", &["bump", "release"]),
            ],
            scopes: vec![
                KeywordGroup::new("api", &["endpoint", "api"]),
                KeywordGroup::new("ui", &["button", "page"]),
            ],
        }
    }

    #[test]
    fn empty_message_is_an_error() {
        let dict = dictionary();
        let suggester = Suggester::new(&dict);
        assert_eq!(
            suggester.suggest_from_message("   \n"),
            Err(SuggestError::EmptyMessage)
        );
    }

    #[test]
    fn no_dictionary_means_no_suggestion() {
        let dict = KeywordDictionary::default();
        let suggester = Suggester::new(&dict);
        assert_eq!(suggester.suggest_from_message("fix the bug"), Ok(None));
    }

    #[test]
    fn prefix_and_contains_accumulate() {
        let dict = dictionary();
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("Fix bug in endpoint")
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.commit_type, "fix");
        // "fix": prefix 0.6 + contains 0.3, "bug": contains 0.3
        assert!((suggestion.confidence - 1.2).abs() < 1e-9);
        assert_eq!(suggestion.scope.as_deref(), Some("api"));
        assert_eq!(suggestion.subject, "Fix bug in endpoint");
        assert_eq!(suggestion.header(), "fix(api): Fix bug in endpoint");
    }

    #[test]
    fn falls_back_to_chore() {
        let dict = KeywordDictionary {
            types: vec![KeywordGroup::new("fix", &["fix", "bug", "patch"])],
            scopes: Vec::new(),
        };
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("oops forgot format")
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.commit_type, "chore");
        assert_eq!(suggestion.scope, None);
        assert!(suggestion.confidence.abs() < f64::EPSILON);
        assert_eq!(suggestion.header(), "chore: oops forgot format");
    }

    #[test]
    fn blank_keywords_never_match() {
        let dict = KeywordDictionary {
            types: vec![
                KeywordGroup::new("fix", &["fix"]),
                KeywordGroup::new("perf", &["", "  "]),
            ],
            scopes: vec![KeywordGroup::new("core", &[""])],
        };
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("totally unrelated words")
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.commit_type, "chore");
        assert!(suggestion.confidence.abs() < f64::EPSILON);
        assert_eq!(suggestion.scope, None);

        let analysis = analyze(&["src/lib.rs"], &["+totally unrelated words"]).unwrap();
        assert!(Suggester::new(&dict).suggest_from_changes(&analysis).is_none());
    }

    #[test]
    fn ties_go_to_first_declared() {
        let dict = KeywordDictionary {
            types: vec![
                KeywordGroup::new("refactor", &["cleanup"]),
                KeywordGroup::new("chore", &["cleanup"]),
            ],
            scopes: Vec::new(),
        };
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("some cleanup")
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.commit_type, "refactor");
    }

    #[test]
    fn reuses_parsed_subject() {
        let dict = dictionary();
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("feature: add login page\n\nbody text")
            .unwrap()
            .unwrap();
        assert_eq!(suggestion.commit_type, "feat");
        assert_eq!(suggestion.subject, "add login page");
        assert_eq!(suggestion.header(), "feat(ui): add login page");
    }

    #[test]
    fn confidence_is_unbounded() {
        let dict = dictionary();
        let suggestion = Suggester::new(&dict)
            .suggest_from_message("add new implement")
            .unwrap()
            .unwrap();
        assert!(suggestion.confidence > 1.0);
    }

    #[test]
    fn readme_change_suggests_docs() {
        let dict = dictionary();
        let analysis = analyze(&["README.md"], &[]).unwrap();
        let suggestion = Suggester::new(&dict).suggest_from_changes(&analysis).unwrap();
        assert_eq!(suggestion.commit_type, "docs");
        assert_eq!(suggestion.subject, "update documentation for README.md");
        assert!((suggestion.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_files_suggest_test() {
        let dict = dictionary();
        let analysis = analyze(&["src/parser.test.ts"], &[]).unwrap();
        let suggestion = Suggester::new(&dict).suggest_from_changes(&analysis).unwrap();
        assert_eq!(suggestion.header(), "test: add tests for parser.test");
    }

    #[test]
    fn stylesheets_suggest_style() {
        let dict = dictionary();
        let analysis = analyze(&["web/site.css", "web/theme.css"], &[]).unwrap();
        let suggestion = Suggester::new(&dict).suggest_from_changes(&analysis).unwrap();
        assert_eq!(suggestion.header(), "style: improve .css styling");
    }

    #[test]
    fn added_lines_outweigh_removed() {
        let dict = dictionary();
        let analysis = analyze(
            &["src/net/client.rs", "src/net/server.rs"],
            &["+// implement retry", "-// fix later"],
        )
        .unwrap();
        let suggestion = Suggester::new(&dict).suggest_from_changes(&analysis).unwrap();
        assert_eq!(suggestion.header(), "feat: add net module");
        assert!((suggestion.confidence - 0.3).abs() < 1e-9);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        let dict = dictionary();
        let analysis = analyze(&["src/lib.rs"], &["+let prefix = suffix;", "+debugger"]).unwrap();
        assert_eq!(Suggester::new(&dict).suggest_from_changes(&analysis), None);

        let analysis = analyze(&["src/lib.rs"], &["+FIX: handle Bug"]).unwrap();
        let suggestion = Suggester::new(&dict).suggest_from_changes(&analysis).unwrap();
        assert_eq!(suggestion.commit_type, "fix");
        assert!((suggestion.confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn removed_line_alone_is_below_floor() {
        let dict = dictionary();
        let analysis = analyze(&["src/lib.rs"], &["-old bug"]).unwrap();
        assert_eq!(Suggester::new(&dict).suggest_from_changes(&analysis), None);
    }

    #[test]
    fn empty_dictionary_has_no_change_suggestion() {
        let dict = KeywordDictionary::default();
        let analysis = analyze(&["README.md"], &[]).unwrap();
        assert_eq!(Suggester::new(&dict).suggest_from_changes(&analysis), None);
    }

    #[test]
    fn custom_templates_are_used() {
        let dict = dictionary();
        let mut templates = TemplateTable::default();
        templates.insert("docs", |_| "refresh docs".to_string());
        let suggester = Suggester::with_templates(&dict, templates);
        let analysis = analyze(&["README.md"], &[]).unwrap();
        assert_eq!(
            suggester.suggest_from_changes(&analysis).unwrap().subject,
            "refresh docs"
        );
    }

    #[test]
    fn header_omits_empty_scope() {
        assert_eq!(format_header("fix", Some(""), "x"), "fix: x");
        assert_eq!(format_header("fix", None, "x"), "fix: x");
        assert_eq!(format_header("fix", Some("db"), "x"), "fix(db): x");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn confidence_grows_with_matched_keywords(n in 1_usize..6) {
                let all = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
                let dict = KeywordDictionary {
                    types: vec![KeywordGroup::new("feat", &all)],
                    scopes: Vec::new(),
                };
                let suggester = Suggester::new(&dict);
                let fewer = suggester
                    .suggest_from_message(&format!("x {}", all[..n].join(" ")))
                    .unwrap()
                    .unwrap();
                let more = suggester
                    .suggest_from_message(&format!("x {}", all[..=n].join(" ")))
                    .unwrap()
                    .unwrap();
                prop_assert!(more.confidence >= fewer.confidence);
            }

            #[test]
            fn text_mode_always_names_a_type(msg in "[a-z ]{1,40}[a-z]") {
                let dict = dictionary();
                let suggestion = Suggester::new(&dict).suggest_from_message(&msg).unwrap();
                prop_assert!(suggestion.is_some());
            }
        }
    }
}
