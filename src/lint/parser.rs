//! Structural parsing of `type(scope): subject` headers.

use serde::Serialize;
use thiserror::Error;

/// Header split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Leading type token.
    pub commit_type: String,
    /// Parenthesized scope, empty when absent.
    pub scope: String,
    /// Everything after the `": "` separator, verbatim.
    pub subject: String,
}

/// Which part of the header grammar was violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureError {
    /// Nothing on the first line.
    #[error("message is empty")]
    EmptyMessage,
    /// The line does not start with a type token.
    #[error("missing type")]
    MissingType,
    /// The type token contains a character outside `[A-Za-z0-9_]`.
    #[error("type contains invalid characters")]
    InvalidTypeCharacter,
    /// `(` without a matching `)`.
    #[error("unclosed scope")]
    UnclosedScope,
    /// `()` with nothing inside.
    #[error("empty scope")]
    EmptyScope,
    /// The scope contains a character outside `[A-Za-z0-9_-]`.
    #[error("scope contains invalid characters")]
    InvalidScopeCharacter,
    /// No `": "` after the type and scope.
    #[error("missing \": \" separator")]
    MissingSeparator,
    /// Nothing after the separator.
    #[error("empty subject")]
    EmptySubject,
}

const SEPARATOR: &str = ": ";

fn is_type_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_scope_char(c: char) -> bool {
    is_type_char(c) || c == '-'
}

/// Parses the first line of `raw`; any following lines are body text.
pub fn parse(raw: &str) -> Result<ParsedMessage, StructureError> {
    let line = raw.lines().next().unwrap_or("");
    if line.is_empty() {
        return Err(StructureError::EmptyMessage);
    }

    let type_end = line.find(|c: char| !is_type_char(c)).unwrap_or(line.len());
    if type_end == 0 {
        return Err(StructureError::MissingType);
    }
    let commit_type = &line[..type_end];
    let mut rest = &line[type_end..];

    let mut scope = "";
    if let Some(after_paren) = rest.strip_prefix('(') {
        let close = after_paren.find(')').ok_or(StructureError::UnclosedScope)?;
        scope = &after_paren[..close];
        if scope.is_empty() {
            return Err(StructureError::EmptyScope);
        }
        if !scope.chars().all(is_scope_char) {
            return Err(StructureError::InvalidScopeCharacter);
        }
        rest = &after_paren[close + 1..];
    } else if !rest.starts_with(':') && rest.contains(SEPARATOR) {
        // Something like "feat!: x" or "my type: x".
        return Err(StructureError::InvalidTypeCharacter);
    }

    let subject = rest
        .strip_prefix(SEPARATOR)
        .ok_or(StructureError::MissingSeparator)?;
    if subject.is_empty() {
        return Err(StructureError::EmptySubject);
    }

    Ok(ParsedMessage {
        commit_type: commit_type.to_string(),
        scope: scope.to_string(),
        subject: subject.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(t: &str, s: &str, subj: &str) -> ParsedMessage {
        ParsedMessage {
            commit_type: t.to_string(),
            scope: s.to_string(),
            subject: subj.to_string(),
        }
    }

    #[test]
    fn parses_type_and_subject() {
        assert_eq!(
            parse("feat: add new feature"),
            Ok(parsed("feat", "", "add new feature"))
        );
    }

    #[test]
    fn parses_scope() {
        assert_eq!(
            parse("fix(auth-api): fix login issue"),
            Ok(parsed("fix", "auth-api", "fix login issue"))
        );
    }

    #[test]
    fn only_first_line_is_parsed() {
        assert_eq!(
            parse("docs: update readme\n\nLonger body: with colons"),
            Ok(parsed("docs", "", "update readme"))
        );
    }

    #[test]
    fn subject_is_verbatim() {
        assert_eq!(parse("feat:  padded "), Ok(parsed("feat", "", " padded ")));
    }

    #[test]
    fn rejects_missing_colon() {
        assert_eq!(
            parse("oops forgot format"),
            Err(StructureError::MissingSeparator)
        );
        assert_eq!(parse("oops"), Err(StructureError::MissingSeparator));
        assert_eq!(
            parse("oops forgot: format"),
            Err(StructureError::InvalidTypeCharacter)
        );
    }

    #[test]
    fn rejects_missing_space_after_colon() {
        assert_eq!(parse("feat:add"), Err(StructureError::MissingSeparator));
    }

    #[test]
    fn rejects_empty_subject() {
        assert_eq!(parse("feat: "), Err(StructureError::EmptySubject));
    }

    #[test]
    fn rejects_bad_type() {
        assert_eq!(parse(": subject"), Err(StructureError::MissingType));
        assert_eq!(parse("feat!: x"), Err(StructureError::InvalidTypeCharacter));
        assert_eq!(parse("feät: x"), Err(StructureError::InvalidTypeCharacter));
    }

    #[test]
    fn rejects_bad_scope() {
        assert_eq!(parse("fix(api: x"), Err(StructureError::UnclosedScope));
        assert_eq!(parse("fix(): x"), Err(StructureError::EmptyScope));
        assert_eq!(
            parse("fix(a b): x"),
            Err(StructureError::InvalidScopeCharacter)
        );
        assert_eq!(parse("fix(api)x: y"), Err(StructureError::MissingSeparator));
    }

    #[test]
    fn rejects_empty_message() {
        assert_eq!(parse(""), Err(StructureError::EmptyMessage));
        assert_eq!(parse("\nbody"), Err(StructureError::EmptyMessage));
    }
}
