//! Render context handed to route render functions

use crate::params::{QueryParams, RouteParams};
use crate::state::StateSnapshot;
use std::fmt;

/// Default attribute that marks an element as an in-app navigation link
pub const DEFAULT_LINK_ATTRIBUTE: &str = "data-link";

/// Widths up to this count as a mobile viewport
const MOBILE_BREAKPOINT: u32 = 768;

// ============================================================================
// Environment
// ============================================================================

/// Device information exposed to render functions
///
/// The host fills this in once (from `navigator.userAgent`, the window size and
/// touch support) and updates it through
/// [`Router::set_environment`](crate::Router::set_environment).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub touch: bool,
}

impl Environment {
    pub fn new(user_agent: impl Into<String>, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            user_agent: user_agent.into(),
            viewport_width,
            viewport_height,
            touch: false,
        }
    }

    pub fn with_touch(mut self, touch: bool) -> Self {
        self.touch = touch;
        self
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport_width <= MOBILE_BREAKPOINT
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new("", 1024, 768)
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Everything a render function may read
///
/// # Example
///
/// ```
/// use purnav::RenderContext;
///
/// let cx = RenderContext::for_path("/users/7");
/// assert_eq!(cx.link("/users?page=2&sort=name"), r#"href="/users?page=2&amp;sort=name" data-link"#);
/// ```
#[derive(Clone)]
pub struct RenderContext {
    /// Store contents at render time
    pub state: StateSnapshot,
    pub params: RouteParams,
    pub query: QueryParams,
    /// Resolved path without query string
    pub path: String,
    pub environment: Environment,
    link_attribute: String,
}

impl RenderContext {
    pub(crate) fn new(
        state: StateSnapshot,
        params: RouteParams,
        query: QueryParams,
        path: String,
        environment: Environment,
        link_attribute: &str,
    ) -> Self {
        Self {
            state,
            params,
            query,
            path,
            environment,
            link_attribute: link_attribute.to_string(),
        }
    }

    /// Bare context for a path, with no state, params or query
    ///
    /// Handy for rendering a route outside the router.
    pub fn for_path(path: impl Into<String>) -> Self {
        Self::new(
            StateSnapshot::default(),
            RouteParams::new(),
            QueryParams::new(),
            path.into(),
            Environment::default(),
            DEFAULT_LINK_ATTRIBUTE,
        )
    }

    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attributes for an anchor that the router intercepts
    ///
    /// The URL is escaped for a double-quoted attribute value.
    pub fn link(&self, url: &str) -> String {
        format!(
            "href=\"{}\" {}",
            html_escape::encode_double_quoted_attribute(url),
            self.link_attribute
        )
    }

    /// Whether `path` (query ignored) is the path being rendered
    pub fn is_current(&self, path: &str) -> bool {
        crate::params::split_url(path).0 == self.path
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("state", &self.state.len())
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_escapes_url() {
        let cx = RenderContext::for_path("/");
        assert_eq!(cx.link("/a\"b"), "href=\"/a&quot;b\" data-link");
    }

    #[test]
    fn test_link_uses_configured_attribute() {
        let cx = RenderContext::new(
            StateSnapshot::default(),
            RouteParams::new(),
            QueryParams::new(),
            "/".to_string(),
            Environment::default(),
            "data-nav",
        );
        assert_eq!(cx.link("/x"), "href=\"/x\" data-nav");
    }

    #[test]
    fn test_is_current_ignores_query() {
        let cx = RenderContext::for_path("/users");

        assert!(cx.is_current("/users"));
        assert!(cx.is_current("/users?page=2"));
        assert!(!cx.is_current("/users/1"));
    }

    #[test]
    fn test_builders() {
        let params: RouteParams = [("id", "3")].into_iter().collect();
        let cx = RenderContext::for_path("/users/3")
            .with_params(params)
            .with_query(QueryParams::from_query_string("tab=posts"));

        assert_eq!(cx.params.get("id"), Some("3"));
        assert_eq!(cx.query.get("tab"), Some("posts"));
    }

    #[test]
    fn test_environment_is_mobile() {
        assert!(!Environment::default().is_mobile());
        assert!(Environment::new("Mobile Safari", 390, 844)
            .with_touch(true)
            .is_mobile());
    }
}
