//! Subject templates for change-set suggestions.
//!
//! Each commit type maps to a function that turns an analysis into a
//! subject line. New types are added with [`TemplateTable::insert`].

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use super::analyzer::ChangeSetAnalysis;

/// Builds a subject line from a change set.
pub type SubjectTemplate = Box<dyn Fn(&ChangeSetAnalysis) -> String + Send + Sync>;

/// Mapping from commit type to subject template.
pub struct TemplateTable {
    templates: HashMap<String, SubjectTemplate>,
}

impl fmt::Debug for TemplateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TemplateTable").field("types", &names).finish()
    }
}

impl Default for TemplateTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("feat", |a| format!("add {}", describe_major_change(a)));
        table.insert("fix", |a| format!("fix {}", describe_major_change(a)));
        table.insert("docs", |a| match a.changed_files.as_slice() {
            [only] => format!("update documentation for {only}"),
            _ => "update documentation".to_string(),
        });
        table.insert("test", |a| {
            format!("add tests for {}", describe_major_change(a))
        });
        table.insert("style", |a| {
            format!("improve {} styling", a.most_common_extension().unwrap_or(""))
        });
        table.insert("refactor", |a| {
            format!("refactor {}", describe_major_change(a))
        });
        table
    }
}

impl TemplateTable {
    /// Creates a table with no templates; every type renders the fallback.
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Registers or replaces the template for `commit_type`.
    pub fn insert<F>(&mut self, commit_type: impl Into<String>, template: F)
    where
        F: Fn(&ChangeSetAnalysis) -> String + Send + Sync + 'static,
    {
        self.templates.insert(commit_type.into(), Box::new(template));
    }

    /// Renders the subject for `commit_type`, falling back to the major
    /// change descriptor for unregistered types.
    pub fn render(&self, commit_type: &str, analysis: &ChangeSetAnalysis) -> String {
        match self.templates.get(commit_type) {
            Some(template) => template(analysis),
            None => describe_major_change(analysis),
        }
    }
}

/// Short description of what a change set touches.
pub fn describe_major_change(analysis: &ChangeSetAnalysis) -> String {
    let Some(first) = analysis.changed_files.first() else {
        return "multiple files".to_string();
    };
    let path = Path::new(first);

    if analysis.changed_files.len() == 1 {
        return path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(first)
            .to_string();
    }

    match path
        .parent()
        .and_then(|p| p.file_name())
        .and_then(|n| n.to_str())
    {
        Some(dir) => format!("{dir} module"),
        None => "multiple files".to_string(),
    }
}
