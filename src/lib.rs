//! # commit-linter
//!
//! Checks commit messages against the `type(scope): subject` convention and
//! suggests corrections from a keyword dictionary.
//!
//! ## Quick Start
//!
//! ```rust
//! use commit_linter::lint::{validate_message, RuleSet};
//!
//! let rules = RuleSet::default();
//! assert!(validate_message("feat(auth): add login", &rules).is_valid());
//! assert!(!validate_message("added login", &rules).is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod git;
pub mod lint;
pub mod suggest;

pub use crate::cli::Cli;

/// The current version of commit-linter.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
