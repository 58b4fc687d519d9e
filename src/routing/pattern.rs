//! Route pattern parsing and matching.
//!
//! # Responsibilities
//! - Parse pattern strings into segments
//! - Match a request path against the segments
//! - Bind named wildcard segments to variables
//!
//! # Design Decisions
//! - Leading/trailing slashes are insignificant (`wp-login.php` == `/wp-login.php`)
//! - Literal matching is case-sensitive
//! - `:name` binds exactly one non-empty segment
//! - `*` / `*name` is only valid as the last segment and consumes one or more segments
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Error raised when a pattern string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern '{0}': variable name must not be empty")]
    EmptyVariable(String),

    #[error("pattern '{pattern}': variable '{name}' is bound twice")]
    DuplicateVariable { pattern: String, name: String },

    #[error("pattern '{0}': wildcard must be the last segment")]
    WildcardNotLast(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Variable(String),
    Wildcard(Option<String>),
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

/// Split a path into its segments, ignoring surrounding slashes and whitespace.
pub(crate) fn path_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches(|c: char| c == '/' || c.is_whitespace());
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

impl RoutePattern {
    /// Parse a pattern string.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let raw = path_segments(pattern);
        let mut segments = Vec::with_capacity(raw.len());
        let mut names: Vec<String> = Vec::new();

        for (i, part) in raw.iter().enumerate() {
            let segment = if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::EmptyVariable(pattern.to_string()));
                }
                Segment::Variable(name.to_string())
            } else if let Some(name) = part.strip_prefix('*') {
                if i + 1 != raw.len() {
                    return Err(PatternError::WildcardNotLast(pattern.to_string()));
                }
                Segment::Wildcard((!name.is_empty()).then(|| name.to_string()))
            } else {
                Segment::Literal(part.to_string())
            };

            if let Segment::Variable(name) | Segment::Wildcard(Some(name)) = &segment {
                if names.contains(name) {
                    return Err(PatternError::DuplicateVariable {
                        pattern: pattern.to_string(),
                        name: name.clone(),
                    });
                }
                names.push(name.clone());
            }
            segments.push(segment);
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// The pattern as written at registration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names bound by this pattern, in order.
    pub fn variables(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Variable(name) | Segment::Wildcard(Some(name)) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Match a request path. Returns the bound variables on success.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts = path_segments(path);
        let mut vars = BTreeMap::new();

        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(expected) => {
                    if parts.get(i) != Some(&expected.as_str()) {
                        return None;
                    }
                }
                Segment::Variable(name) => match parts.get(i) {
                    Some(value) if !value.is_empty() => {
                        vars.insert(name.clone(), (*value).to_string());
                    }
                    _ => return None,
                },
                Segment::Wildcard(name) => {
                    if parts.len() <= i {
                        return None;
                    }
                    if let Some(name) = name {
                        vars.insert(name.clone(), parts[i..].join("/"));
                    }
                    return Some(vars);
                }
            }
        }

        (parts.len() == self.segments.len()).then_some(vars)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = PatternError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RoutePattern> for String {
    fn from(pattern: RoutePattern) -> Self {
        pattern.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_pattern() {
        let pattern = RoutePattern::parse("/").unwrap();
        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/status").is_none());
    }

    #[test]
    fn test_literal_is_case_sensitive() {
        let pattern = RoutePattern::parse("/status").unwrap();
        assert!(pattern.matches("/status").is_some());
        assert!(pattern.matches("/status/").is_some());
        assert!(pattern.matches("/Status").is_none());
        assert!(pattern.matches("/status/extra").is_none());
    }

    #[test]
    fn test_slashes_are_insignificant() {
        let bare = RoutePattern::parse("wp-login.php").unwrap();
        assert!(bare.matches("/wp-login.php").is_some());
        assert_eq!(bare.as_str(), "wp-login.php");
    }

    #[test]
    fn test_named_variable() {
        let pattern = RoutePattern::parse("/status/:package").unwrap();
        let vars = pattern.matches("/status/router").unwrap();
        assert_eq!(vars.get("package").map(String::as_str), Some("router"));

        assert!(pattern.matches("/status").is_none());
        assert!(pattern.matches("/status/router/extra").is_none());
        assert_eq!(pattern.variables(), vec!["package"]);
    }

    #[test]
    fn test_variable_does_not_span_segments() {
        let pattern = RoutePattern::parse("/:view").unwrap();
        assert!(pattern.matches("/about").is_some());
        assert!(pattern.matches("/status/router").is_none());
        assert!(pattern.matches("/").is_none());
    }

    #[test]
    fn test_trailing_wildcard() {
        let pattern = RoutePattern::parse("/administrator/*").unwrap();
        assert!(pattern.matches("/administrator/index.php").is_some());
        assert!(pattern.matches("/administrator/components/com_users").is_some());
        assert!(pattern.matches("/administrator").is_none());
        assert!(pattern.matches("/wp-admin/x").is_none());
    }

    #[test]
    fn test_named_wildcard_binds_remainder() {
        let pattern = RoutePattern::parse("/files/*rest").unwrap();
        let vars = pattern.matches("/files/a/b/c").unwrap();
        assert_eq!(vars.get("rest").map(String::as_str), Some("a/b/c"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            RoutePattern::parse("/a/:"),
            Err(PatternError::EmptyVariable("/a/:".into()))
        );
        assert_eq!(
            RoutePattern::parse("/*/tail"),
            Err(PatternError::WildcardNotLast("/*/tail".into()))
        );
        assert!(matches!(
            RoutePattern::parse("/:id/:id"),
            Err(PatternError::DuplicateVariable { .. })
        ));
    }

    #[test]
    fn test_serde_uses_source_string() {
        let pattern = RoutePattern::parse("/api/v1/packages/:package").unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"/api/v1/packages/:package\"");

        let back: RoutePattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
        assert!(serde_json::from_str::<RoutePattern>("\"/*/x\"").is_err());
    }
}
