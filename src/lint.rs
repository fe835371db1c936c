//! Commit message validation.

pub mod parser;
pub mod rules;
pub mod session;
pub mod validator;

pub use parser::{parse, ParsedMessage, StructureError};
pub use rules::{KeywordDictionary, KeywordGroup, RuleSet};
pub use session::{Commit, CommitFailure, LintSession, Report, UNCOMMITTED};
pub use validator::{validate, validate_message, ValidationOutcome, ValidationReason};
