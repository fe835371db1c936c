//! Git operations: commit retrieval, staged changes and hook setup.

pub mod hook;
pub mod repository;

pub use hook::{install_hook, HookInstall, HOOK_SCRIPT};
pub use repository::{GitRepository, StagedChanges};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
