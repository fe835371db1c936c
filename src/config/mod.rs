//! Rule and keyword configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::data::{from_yaml, read_yaml_file};
use crate::lint::rules::{KeywordDictionary, RuleSet, DEFAULT_MAX_SUBJECT_LENGTH, DEFAULT_TYPES};

pub mod discovery;

pub use discovery::{locate_config_file, resolve_config_dir, ConfigSource};

/// Rule file name looked up in the configuration directory.
pub const RULES_FILE: &str = "config.yaml";

/// Keyword file name looked up in the configuration directory.
pub const KEYWORDS_FILE: &str = "common_keywords.yaml";

/// Keyword dictionary used when no keyword file is found.
const DEFAULT_KEYWORDS: &str = include_str!("../../config/common_keywords.yaml");

/// Rule file contents.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LintConfig {
    /// Allowed commit types.
    #[serde(default = "default_types")]
    pub types: Vec<String>,
    /// Rule switches.
    #[serde(default)]
    pub rules: RulesConfig,
}

/// The `rules:` section of a rule file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Whether a `(scope)` is mandatory.
    #[serde(default)]
    pub require_scope: bool,
    /// Maximum subject length in characters.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

fn default_types() -> Vec<String> {
    DEFAULT_TYPES.iter().map(|t| (*t).to_string()).collect()
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_SUBJECT_LENGTH
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            require_scope: false,
            max_message_length: DEFAULT_MAX_SUBJECT_LENGTH,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            types: default_types(),
            rules: RulesConfig::default(),
        }
    }
}

impl LintConfig {
    /// Validates the file contents and builds a rule set without keywords.
    pub fn into_rule_set(self) -> Result<RuleSet> {
        if self.types.is_empty() {
            anyhow::bail!("No commit types configured: `types` must list at least one type");
        }
        if self.rules.max_message_length == 0 {
            anyhow::bail!("`rules.max_message_length` must be greater than zero");
        }

        Ok(RuleSet {
            allowed_types: self.types,
            require_scope: self.rules.require_scope,
            max_subject_length: self.rules.max_message_length,
            keywords: KeywordDictionary::default(),
        })
    }
}

/// Loads rules and keywords through the discovery chain.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ConfigLoader {
    /// Creates a loader rooted at the resolved configuration directory.
    pub fn new(override_dir: Option<&Path>) -> Self {
        Self {
            config_dir: resolve_config_dir(override_dir),
        }
    }

    /// Finds the rule file, preferring an explicit path.
    pub fn rules_source(&self, explicit: Option<&Path>) -> ConfigSource {
        match explicit {
            Some(path) => ConfigSource::Explicit(path.to_path_buf()),
            None => locate_config_file(&self.config_dir, RULES_FILE),
        }
    }

    /// Finds the keyword file, preferring an explicit path.
    pub fn keywords_source(&self, explicit: Option<&Path>) -> ConfigSource {
        match explicit {
            Some(path) => ConfigSource::Explicit(path.to_path_buf()),
            None => locate_config_file(&self.config_dir, KEYWORDS_FILE),
        }
    }

    /// Loads the complete rule set, keywords included.
    pub fn load(&self, rules_path: Option<&Path>, keywords_path: Option<&Path>) -> Result<RuleSet> {
        let rules = self.load_rules(rules_path)?;
        Ok(rules.with_keywords(self.load_keywords(keywords_path)))
    }

    /// Loads and validates the rule file, or returns the default rules
    /// when none is found.
    pub fn load_rules(&self, explicit: Option<&Path>) -> Result<RuleSet> {
        let source = self.rules_source(explicit);
        let Some(path) = source.path() else {
            debug!("No rule file found, using default rules");
            return LintConfig::default().into_rule_set();
        };

        info!("Loading rules from {source}");
        let config: LintConfig = read_yaml_file(path)
            .with_context(|| format!("Failed to load rule file: {}", path.display()))?;
        config
            .into_rule_set()
            .with_context(|| format!("Invalid rule file: {}", path.display()))
    }

    /// Loads the keyword dictionary.
    ///
    /// Never fails: a keyword file that cannot be read or parsed is
    /// reported once and an empty dictionary is returned, which disables
    /// suggestions without affecting validation. When no file is found the
    /// bundled dictionary is used.
    pub fn load_keywords(&self, explicit: Option<&Path>) -> KeywordDictionary {
        let source = self.keywords_source(explicit);
        let Some(path) = source.path() else {
            debug!("No keyword file found, using bundled keywords");
            return default_keywords();
        };

        info!("Loading keywords from {source}");
        match read_yaml_file::<KeywordDictionary, _>(path) {
            Ok(dict) if dict.is_empty() => {
                warn!("Suggestions disabled, no commit types in {}", path.display());
                dict
            }
            Ok(dict) => dict,
            Err(e) => {
                warn!("Suggestions disabled, cannot load keywords from {}: {e:#}", path.display());
                KeywordDictionary::default()
            }
        }
    }
}

/// The bundled keyword dictionary.
pub fn default_keywords() -> KeywordDictionary {
    match from_yaml(DEFAULT_KEYWORDS) {
        Ok(dict) => dict,
        Err(e) => {
            warn!("Bundled keyword dictionary is invalid: {e:#}");
            KeywordDictionary::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn loader_in(temp: &TempDir) -> ConfigLoader {
        ConfigLoader::new(Some(temp.path()))
    }

    #[test]
    fn missing_rule_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let rules = loader_in(&temp).load_rules(None).unwrap();
        assert_eq!(rules, RuleSet::default());
    }

    #[test]
    fn loads_custom_rules() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.yaml");
        std::fs::write(
            &path,
            "types:\n  - feat\n  - fix\nrules:\n  require_scope: true\n  max_message_length: 50\n",
        )
        .unwrap();

        let rules = loader_in(&temp).load_rules(Some(&path)).unwrap();
        assert_eq!(rules.allowed_types, vec!["feat", "fix"]);
        assert!(rules.require_scope);
        assert_eq!(rules.max_subject_length, 50);
    }

    #[test]
    fn discovers_project_rule_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(RULES_FILE), "types: [build]\n").unwrap();

        let rules = loader_in(&temp).load_rules(None).unwrap();
        assert_eq!(rules.allowed_types, vec!["build"]);
        assert_eq!(rules.max_subject_length, 72);
    }

    #[test]
    fn rejects_empty_types() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yaml");
        std::fs::write(&path, "types: []\n").unwrap();

        let err = loader_in(&temp).load_rules(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("No commit types configured"));
    }

    #[test]
    fn rejects_zero_length() {
        let config = LintConfig {
            rules: RulesConfig {
                require_scope: false,
                max_message_length: 0,
            },
            ..LintConfig::default()
        };
        assert!(config.into_rule_set().is_err());
    }

    #[test]
    fn missing_explicit_rule_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        assert!(loader_in(&temp).load_rules(Some(&missing)).is_err());
    }

    #[test]
    fn bundled_keywords_cover_default_types() {
        let dict = default_keywords();
        for t in DEFAULT_TYPES {
            assert!(
                dict.types.iter().any(|g| g.name == *t && !g.keywords.is_empty()),
                "missing keywords for {t}"
            );
        }
        assert!(!dict.scopes.is_empty());
    }

    #[test]
    fn unreadable_keywords_disable_suggestions() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(loader_in(&temp).load_keywords(Some(&missing)).is_empty());

        let broken = temp.path().join("broken.yaml");
        std::fs::write(&broken, "commit_types: {not: [a list").unwrap();
        assert!(loader_in(&temp).load_keywords(Some(&broken)).is_empty());
    }

    #[test]
    fn keyword_file_without_types_disables_suggestions() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("scopes_only.yaml");
        std::fs::write(&path, "commit_scopes:\n  - name: api\n    keywords: [endpoint]\n").unwrap();

        let rules = loader_in(&temp).load(None, Some(&path)).unwrap();
        assert!(rules.keywords.is_empty());
        assert_eq!(rules.keywords.scopes.len(), 1);
    }

    #[test]
    fn loads_project_keywords() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(KEYWORDS_FILE),
            "commit_types:\n  - name: perf\n    keywords: [faster]\n",
        )
        .unwrap();

        let rules = loader_in(&temp).load(None, None).unwrap();
        assert_eq!(rules.keywords.types.len(), 1);
        assert_eq!(rules.keywords.types[0].name, "perf");
    }
}
