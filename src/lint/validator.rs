//! Rule checks applied to a parsed header.

use serde::Serialize;
use thiserror::Error;

use super::parser::{parse, ParsedMessage, StructureError};
use super::rules::RuleSet;

/// Why a message was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationReason {
    /// The header does not follow `type(scope): subject`.
    #[error("invalid format ({detail})")]
    MalformedStructure {
        /// Grammar element that failed.
        detail: StructureError,
    },
    /// The type is not in the allowed set.
    #[error("invalid type '{got}'")]
    UnknownType {
        /// Type token as written.
        got: String,
    },
    /// A scope is required but none was given.
    #[error("scope is required")]
    MissingRequiredScope,
    /// The subject exceeds the configured length.
    #[error("message too long ({actual} chars, max {max})")]
    SubjectTooLong {
        /// Subject length in characters.
        actual: usize,
        /// Configured maximum.
        max: usize,
    },
}

impl From<StructureError> for ValidationReason {
    fn from(detail: StructureError) -> Self {
        Self::MalformedStructure { detail }
    }
}

/// Result of validating one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// All checks passed.
    Valid,
    /// The first failing check.
    Invalid(ValidationReason),
}

impl ValidationOutcome {
    /// Returns true for [`ValidationOutcome::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the failure reason, if any.
    pub fn reason(&self) -> Option<&ValidationReason> {
        match self {
            Self::Valid => None,
            Self::Invalid(reason) => Some(reason),
        }
    }
}

/// Checks type membership, scope requirement and subject length, in that
/// order, stopping at the first failure.
pub fn validate(msg: &ParsedMessage, rules: &RuleSet) -> ValidationOutcome {
    if !rules.allows_type(&msg.commit_type) {
        return ValidationOutcome::Invalid(ValidationReason::UnknownType {
            got: msg.commit_type.clone(),
        });
    }

    if rules.require_scope && msg.scope.is_empty() {
        return ValidationOutcome::Invalid(ValidationReason::MissingRequiredScope);
    }

    let actual = msg.subject.chars().count();
    if actual > rules.max_subject_length {
        return ValidationOutcome::Invalid(ValidationReason::SubjectTooLong {
            actual,
            max: rules.max_subject_length,
        });
    }

    ValidationOutcome::Valid
}

/// Parses and validates a raw message.
pub fn validate_message(raw: &str, rules: &RuleSet) -> ValidationOutcome {
    match parse(raw) {
        Ok(msg) => validate(&msg, rules),
        Err(detail) => ValidationOutcome::Invalid(detail.into()),
    }
}
