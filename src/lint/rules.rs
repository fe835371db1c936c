//! Rule set and keyword dictionary shared by validation and suggestion.

use serde::{Deserialize, Serialize};

/// Types accepted when no rule file is configured.
pub const DEFAULT_TYPES: &[&str] = &["feat", "fix", "docs", "style", "refactor", "test", "chore"];

/// Subject length limit when no rule file is configured.
pub const DEFAULT_MAX_SUBJECT_LENGTH: usize = 72;

/// A named category together with the keywords that signal it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordGroup {
    /// Type or scope name (e.g. `fix`, `api`).
    pub name: String,
    /// Human-readable description of the category.
    #[serde(default)]
    pub description: String,
    /// Keywords in declaration order.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl KeywordGroup {
    /// Creates a group without a description.
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        }
    }
}

/// Keyword dictionaries for commit types and scopes.
///
/// Groups are kept in the order they were declared; that order breaks
/// scoring ties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordDictionary {
    /// Keyword groups for commit types.
    #[serde(default, rename = "commit_types")]
    pub types: Vec<KeywordGroup>,
    /// Keyword groups for commit scopes.
    #[serde(default, rename = "commit_scopes")]
    pub scopes: Vec<KeywordGroup>,
}

impl KeywordDictionary {
    /// Returns true when no type keywords are available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

/// Validated lint configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleSet {
    /// Accepted commit types, in declaration order.
    pub allowed_types: Vec<String>,
    /// Whether every message must carry a `(scope)`.
    pub require_scope: bool,
    /// Maximum subject length in characters.
    pub max_subject_length: usize,
    /// Keyword dictionaries used for suggestions.
    #[serde(skip)]
    pub keywords: KeywordDictionary,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            allowed_types: DEFAULT_TYPES.iter().map(|t| (*t).to_string()).collect(),
            require_scope: false,
            max_subject_length: DEFAULT_MAX_SUBJECT_LENGTH,
            keywords: KeywordDictionary::default(),
        }
    }
}

impl RuleSet {
    /// Replaces the keyword dictionary.
    #[must_use]
    pub fn with_keywords(mut self, keywords: KeywordDictionary) -> Self {
        self.keywords = keywords;
        self
    }

    /// Returns true if `commit_type` is an exact match for an allowed type.
    pub fn allows_type(&self, commit_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == commit_type)
    }
}
