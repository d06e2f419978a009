//! Route pattern compilation and matching
//!
//! A pattern like `/users/:id/posts/:post` compiles once, at registration, into
//! a list of segments. Matching a path is then a single pass over that list:
//!
//! - literal segments must be equal to the path segment
//! - `:name` segments capture exactly one non-empty path segment
//! - the path must have exactly as many segments as the pattern
//!
//! Empty segments are ignored on both sides, so `/users/` and `/users` are the
//! same path and `/` has no segments at all.

use crate::error::RouterError;
use crate::params::RouteParams;
use std::collections::HashSet;
use std::fmt;

/// Marker that introduces a parameter segment.
pub const PARAM_MARKER: char = ':';

/// A single segment in a route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Static text that must match exactly
    Literal(String),
    /// Parameter that captures one path segment
    Param(String),
}

/// A compiled route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern string
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidRoute`] when the pattern is empty, contains
    /// `//`, has a parameter marker without a name, uses characters other than
    /// alphanumerics and `_` in a parameter name, or repeats a parameter name.
    ///
    /// # Example
    ///
    /// ```
    /// use purnav::RoutePattern;
    ///
    /// let pattern = RoutePattern::parse("/a/:x/b/:y").unwrap();
    /// let params = pattern.matches("/a/1/b/2").unwrap();
    ///
    /// assert_eq!(params.get("x"), Some("1"));
    /// assert_eq!(params.get("y"), Some("2"));
    /// assert!(pattern.matches("/a/1/b").is_none());
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, RouterError> {
        let invalid = |reason: &str| RouterError::InvalidRoute {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("pattern cannot be empty"));
        }
        if pattern.contains("//") {
            return Err(invalid("pattern cannot contain consecutive slashes"));
        }

        let mut names = HashSet::new();
        let mut segments = Vec::new();

        for raw in pattern.split('/').filter(|s| !s.is_empty()) {
            let Some(name) = raw.strip_prefix(PARAM_MARKER) else {
                segments.push(Segment::Literal(raw.to_string()));
                continue;
            };

            if name.is_empty() {
                return Err(invalid("parameter name cannot be empty"));
            }
            if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(invalid(&format!(
                    "parameter '{}' must contain only alphanumeric characters and underscores",
                    name
                )));
            }
            if !names.insert(name) {
                return Err(invalid(&format!("duplicate parameter '{}'", name)));
            }

            segments.push(Segment::Param(name.to_string()));
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    /// A single literal segment, for reserved patterns known to be valid
    pub(crate) fn literal(text: &str) -> Self {
        Self {
            source: text.to_string(),
            segments: vec![Segment::Literal(text.to_string())],
        }
    }

    /// The pattern as it was registered
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match a path (without query string) against this pattern
    ///
    /// Returns the extracted parameters on success.
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        let mut path_segments = path.split('/').filter(|s| !s.is_empty());
        let mut params = RouteParams::new();

        for segment in &self.segments {
            let value = path_segments.next()?;
            match segment {
                Segment::Literal(expected) => {
                    if expected != value {
                        return None;
                    }
                }
                Segment::Param(name) => params.insert(name.as_str(), value),
            }
        }

        // Leftover path segments mean the counts differ
        if path_segments.next().is_some() {
            return None;
        }

        Some(params)
    }

    /// Build a concrete path by substituting parameter values
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingParam`] if a parameter has no value (or an
    /// empty one, which could never match).
    ///
    /// ```
    /// use purnav::{RouteParams, RoutePattern};
    ///
    /// let pattern = RoutePattern::parse("/users/:id/posts/:post").unwrap();
    /// let params: RouteParams = [("id", "7"), ("post", "hello world")].into_iter().collect();
    ///
    /// assert_eq!(pattern.to_url(&params).unwrap(), "/users/7/posts/hello%20world");
    /// ```
    pub fn to_url(&self, params: &RouteParams) -> Result<String, RouterError> {
        let mut url = String::new();

        for segment in &self.segments {
            url.push('/');
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Param(name) => match params.get(name) {
                    Some(value) if !value.is_empty() => {
                        url.push_str(&urlencoding::encode(value));
                    }
                    _ => {
                        return Err(RouterError::MissingParam {
                            pattern: self.source.clone(),
                            name: name.clone(),
                        })
                    }
                },
            }
        }

        if url.is_empty() {
            url.push('/');
        }
        Ok(url)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(pattern: &str) -> String {
        match RoutePattern::parse(pattern) {
            Err(RouterError::InvalidRoute { reason, .. }) => reason,
            other => panic!("expected InvalidRoute for '{}', got {:?}", pattern, other),
        }
    }

    #[test]
    fn test_segment_parsing() {
        let pattern = RoutePattern::parse("/users/:id").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string())
            ]
        );
        assert_eq!(pattern.as_str(), "/users/:id");
    }

    #[test]
    fn test_static_route_matching() {
        let pattern = RoutePattern::parse("/users").unwrap();

        assert!(pattern.matches("/users").is_some());
        assert!(pattern.matches("/users/").is_some());
        assert!(pattern.matches("/posts").is_none());
        assert!(pattern.matches("/users/123").is_none());
    }

    #[test]
    fn test_root_matches_only_root() {
        let pattern = RoutePattern::parse("/").unwrap();

        assert!(pattern.matches("/").is_some());
        assert!(pattern.matches("").is_some());
        assert!(pattern.matches("/home").is_none());
    }

    #[test]
    fn test_params_extracted_in_declaration_order() {
        let pattern = RoutePattern::parse("/a/:x/b/:y").unwrap();
        let params = pattern.matches("/a/1/b/2").unwrap();

        let pairs: Vec<(&str, &str)> = params.iter().collect();
        assert_eq!(pairs, vec![("x", "1"), ("y", "2")]);
    }

    #[test]
    fn test_segment_count_must_match() {
        let pattern = RoutePattern::parse("/a/:x/b/:y").unwrap();

        for path in ["/", "/a", "/a/1", "/a/1/b", "/a/1/b/2/c", "/a/1/b/2/c/3"] {
            assert!(pattern.matches(path).is_none(), "{} should not match", path);
        }
    }

    #[test]
    fn test_param_does_not_span_slashes() {
        let pattern = RoutePattern::parse("/files/:name").unwrap();

        assert!(pattern.matches("/files/a/b").is_none());
        assert!(pattern.matches("/files").is_none());
    }

    #[test]
    fn test_literal_mismatch_after_param() {
        let pattern = RoutePattern::parse("/users/:id/edit").unwrap();

        assert!(pattern.matches("/users/1/edit").is_some());
        assert!(pattern.matches("/users/1/view").is_none());
    }

    #[test]
    fn test_relative_pattern() {
        let pattern = RoutePattern::parse("about").unwrap();
        assert!(pattern.matches("/about").is_some());
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(reason("").contains("empty"));
        assert!(reason("/users/:").contains("parameter name cannot be empty"));
        assert!(reason("/users/:/posts").contains("parameter name cannot be empty"));
        assert!(reason("/users//profile").contains("consecutive slashes"));
        assert!(reason("/users/:user-id").contains("alphanumeric"));
        assert!(reason("/users/:id/posts/:id").contains("duplicate"));
    }

    #[test]
    fn test_param_names() {
        let pattern = RoutePattern::parse("/org/:org/repo/:repo").unwrap();
        let names: Vec<&str> = pattern.param_names().collect();
        assert_eq!(names, vec!["org", "repo"]);
    }

    #[test]
    fn test_to_url() {
        let pattern = RoutePattern::parse("/posts/:postId/comments/:commentId").unwrap();
        let params: RouteParams = [("postId", "42"), ("commentId", "99")]
            .into_iter()
            .collect();

        assert_eq!(pattern.to_url(&params).unwrap(), "/posts/42/comments/99");
        assert_eq!(
            RoutePattern::parse("/")
                .unwrap()
                .to_url(&RouteParams::new())
                .unwrap(),
            "/"
        );
    }

    #[test]
    fn test_to_url_missing_param() {
        let pattern = RoutePattern::parse("/users/:id").unwrap();
        let err = pattern.to_url(&RouteParams::new()).unwrap_err();

        assert!(matches!(
            err,
            RouterError::MissingParam { ref name, .. } if name == "id"
        ));
    }

    #[test]
    fn test_to_url_round_trips_through_matches() {
        let pattern = RoutePattern::parse("/users/:id").unwrap();
        let params: RouteParams = [("id", "abc")].into_iter().collect();

        let url = pattern.to_url(&params).unwrap();
        assert_eq!(pattern.matches(&url), Some(params));
    }
}
