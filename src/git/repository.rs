//! Git repository operations

use std::path::Path;

use anyhow::{Context, Result};
use git2::{DiffFormat, DiffOptions, ErrorCode, Oid, Repository, Tree};
use tracing::debug;

use crate::lint::Commit;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

/// Paths and diff lines staged for the next commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedChanges {
    /// Paths with staged changes, in diff order
    pub files: Vec<String>,
    /// Patch lines, including `---`/`+++` file headers
    pub diff_lines: Vec<String>,
}

impl StagedChanges {
    /// Whether anything is staged
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl GitRepository {
    /// Open repository at current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::open(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Path of the `.git` directory
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Full hash of the commit HEAD points to, if any
    pub fn head_id(&self) -> Option<String> {
        self.repo
            .head()
            .ok()
            .and_then(|head| head.target())
            .map(|oid| oid.to_string())
    }

    /// Parse commit range and get commits, oldest first
    ///
    /// Accepts `HEAD`, `A..B`, or any single revision. Merge commits in a
    /// range are skipped.
    pub fn commits_in_range(&self, range: &str) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();

        if let Some((start_spec, end_spec)) = range.split_once("..") {
            if end_spec.contains("..") {
                anyhow::bail!("Invalid range format: {}", range);
            }
            let end_spec = if end_spec.is_empty() { "HEAD" } else { end_spec };

            let start_commit = self
                .repo
                .revparse_single(start_spec)
                .with_context(|| format!("Failed to parse start commit: {}", start_spec))?
                .peel_to_commit()
                .context("Failed to peel start object to commit")?;
            let end_commit = self
                .repo
                .revparse_single(end_spec)
                .with_context(|| format!("Failed to parse end commit: {}", end_spec))?
                .peel_to_commit()
                .context("Failed to peel end object to commit")?;

            // Walk from end_commit back to start_commit (exclusive)
            let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
            walker
                .push(end_commit.id())
                .context("Failed to push end commit")?;
            walker
                .hide(start_commit.id())
                .context("Failed to hide start commit")?;

            for oid in walker {
                let oid = oid.context("Failed to get commit OID from walker")?;
                let commit = self
                    .repo
                    .find_commit(oid)
                    .context("Failed to find commit")?;

                if commit.parent_count() > 1 {
                    debug!("Skipping merge commit {oid}");
                    continue;
                }

                commits.push(to_commit(oid, &commit));
            }

            // Reverse to get chronological order (oldest first)
            commits.reverse();
        } else {
            let commit = self
                .repo
                .revparse_single(range)
                .with_context(|| format!("Failed to parse commit: {}", range))?
                .peel_to_commit()
                .context("Failed to peel object to commit")?;
            commits.push(to_commit(commit.id(), &commit));
        }

        debug!("Found {} commits in {range}", commits.len());
        Ok(commits)
    }

    /// Changes staged in the index relative to HEAD
    ///
    /// In a repository without commits every staged file counts as added.
    pub fn staged_changes(&self) -> Result<StagedChanges> {
        let head_tree = self.head_tree()?;
        let index = self.repo.index().context("Failed to read index")?;

        let mut opts = DiffOptions::new();
        opts.context_lines(0);
        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))
            .context("Failed to diff index against HEAD")?;

        let files = diff
            .deltas()
            .filter_map(|delta| {
                delta
                    .new_file()
                    .path()
                    .or_else(|| delta.old_file().path())
                    .and_then(|p| p.to_str())
                    .map(str::to_string)
            })
            .collect();

        let mut diff_lines = Vec::new();
        diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
            let content = String::from_utf8_lossy(line.content());
            match line.origin() {
                origin @ ('+' | '-') => {
                    diff_lines.push(format!("{origin}{}", content.trim_end_matches('\n')));
                }
                'F' => diff_lines.extend(content.lines().map(str::to_string)),
                _ => {}
            }
            true
        })
        .context("Failed to format diff")?;

        Ok(StagedChanges { files, diff_lines })
    }

    fn head_tree(&self) -> Result<Option<Tree<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(
                head.peel_to_tree().context("Failed to peel HEAD to tree")?,
            )),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e).context("Failed to get HEAD reference"),
        }
    }
}

fn to_commit(oid: Oid, commit: &git2::Commit<'_>) -> Commit {
    Commit::new(
        oid.to_string(),
        String::from_utf8_lossy(commit.message_bytes()).into_owned(),
    )
}
