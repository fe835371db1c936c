//! Change-set feature extraction.

use std::collections::BTreeMap;
use std::path::Path;

/// Synthetic bucket counting test files.
pub const TEST_BUCKET: &str = "test";

/// Synthetic bucket counting documentation files.
pub const DOCS_BUCKET: &str = "docs";

const DOC_EXTENSIONS: &[&str] = &[".md", ".txt", ".rst"];

/// Features of a set of pending changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSetAnalysis {
    /// Changed paths in the order they were supplied.
    pub changed_files: Vec<String>,
    /// Diff lines added, marker stripped.
    pub added_lines: Vec<String>,
    /// Diff lines removed, marker stripped.
    pub removed_lines: Vec<String>,
    /// Extension histogram plus the `test` and `docs` buckets.
    pub extension_counts: BTreeMap<String, usize>,
}

impl ChangeSetAnalysis {
    /// Count for an extension (with leading dot) or synthetic bucket.
    pub fn count(&self, key: &str) -> usize {
        self.extension_counts.get(key).copied().unwrap_or(0)
    }

    /// Most frequent real file extension; ties resolve alphabetically.
    pub fn most_common_extension(&self) -> Option<&str> {
        let mut best: Option<(&str, usize)> = None;
        for (ext, &count) in &self.extension_counts {
            if !ext.starts_with('.') {
                continue;
            }
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((ext, count));
            }
        }
        best.map(|(ext, _)| ext)
    }
}

/// Suffix of the file name from its last dot, or an empty string.
///
/// Dotfiles count as all extension, so `.gitignore` yields `.gitignore`.
pub(crate) fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.')
        .map(|i| name[i..].to_string())
        .unwrap_or_default()
}

/// Builds the analysis for a change set.
///
/// Returns `None` when nothing changed, which callers treat as "nothing to
/// suggest".
pub fn analyze<S: AsRef<str>>(changed_files: &[S], diff_lines: &[S]) -> Option<ChangeSetAnalysis> {
    if changed_files.is_empty() {
        return None;
    }

    let mut analysis = ChangeSetAnalysis::default();

    for file in changed_files {
        let file = file.as_ref();
        let ext = extension_of(file);
        let base = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file);

        if base.contains(".test.") {
            *analysis.extension_counts.entry(TEST_BUCKET.to_string()).or_insert(0) += 1;
        }
        if base.contains(".spec.") {
            *analysis.extension_counts.entry(TEST_BUCKET.to_string()).or_insert(0) += 1;
        }
        if DOC_EXTENSIONS.contains(&ext.as_str()) {
            *analysis.extension_counts.entry(DOCS_BUCKET.to_string()).or_insert(0) += 1;
        }
        *analysis.extension_counts.entry(ext).or_insert(0) += 1;

        analysis.changed_files.push(file.to_string());
    }

    for line in diff_lines {
        let line = line.as_ref();
        if let Some(added) = line.strip_prefix('+') {
            if !line.starts_with("+++") {
                analysis.added_lines.push(added.to_string());
            }
        } else if let Some(removed) = line.strip_prefix('-') {
            if !line.starts_with("---") {
                analysis.removed_lines.push(removed.to_string());
            }
        }
    }

    Some(analysis)
}
