//! Error handling for router
//!
//! Registration problems and renderer failures are errors. A URL that matches
//! no route is not: it resolves to the not-found fallback and is reported as
//! [`NavigationResult::NotFound`].

use thiserror::Error;

// ============================================================================
// Navigation Result Types
// ============================================================================

/// Outcome of a resolution or navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationResult {
    /// A registered route matched and was rendered
    Success { url: String },
    /// No route matched; the not-found fallback was rendered
    NotFound { url: String },
    /// The URL equals the last resolution, nothing ran
    Unchanged { url: String },
    /// A newer navigation started while this one was mounting; its result was discarded
    Superseded { url: String },
}

impl NavigationResult {
    /// Check if navigation was successful
    pub fn is_success(&self) -> bool {
        matches!(self, NavigationResult::Success { .. })
    }

    /// Check if route was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationResult::NotFound { .. })
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, NavigationResult::Unchanged { .. })
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationResult::Superseded { .. })
    }

    /// Whether a view was rendered and the navigation state committed
    pub fn is_committed(&self) -> bool {
        self.is_success() || self.is_not_found()
    }

    /// The URL this result refers to
    pub fn url(&self) -> &str {
        match self {
            NavigationResult::Success { url }
            | NavigationResult::NotFound { url }
            | NavigationResult::Unchanged { url }
            | NavigationResult::Superseded { url } => url,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors that can occur while registering routes or navigating
#[derive(Debug, Error)]
pub enum RouterError {
    /// The route pattern is malformed; the route was not added
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidRoute { pattern: String, reason: String },

    /// The pattern does not name a registered route
    #[error("unknown route: {pattern}")]
    UnknownRoute { pattern: String },

    /// A parameter needed to build a URL has no value
    #[error("missing parameter '{name}' for route '{pattern}'")]
    MissingParam { pattern: String, name: String },

    /// The view renderer failed; there is no safe fallback to show
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Failure reported by a [`ViewRenderer`](crate::ViewRenderer)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to render into '{target}': {message}")]
pub struct RenderError {
    /// Mount target the renderer was asked to fill
    pub target: String,
    pub message: String,
}

impl RenderError {
    pub fn new(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_result_success() {
        let result = NavigationResult::Success {
            url: "/home".to_string(),
        };
        assert!(result.is_success());
        assert!(result.is_committed());
        assert!(!result.is_not_found());
        assert!(!result.is_unchanged());
        assert_eq!(result.url(), "/home");
    }

    #[test]
    fn test_navigation_result_not_found_is_committed() {
        let result = NavigationResult::NotFound {
            url: "/invalid".to_string(),
        };
        assert!(result.is_not_found());
        assert!(result.is_committed());
    }

    #[test]
    fn test_skipped_results_are_not_committed() {
        let unchanged = NavigationResult::Unchanged {
            url: "/a".to_string(),
        };
        let superseded = NavigationResult::Superseded {
            url: "/b".to_string(),
        };
        assert!(!unchanged.is_committed());
        assert!(!superseded.is_committed());
        assert!(superseded.is_superseded());
    }

    #[test]
    fn test_router_error_display() {
        let error = RouterError::UnknownRoute {
            pattern: "/missing".to_string(),
        };
        assert_eq!(error.to_string(), "unknown route: /missing");

        let error = RouterError::InvalidRoute {
            pattern: "/users/:".to_string(),
            reason: "parameter name cannot be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid route pattern '/users/:': parameter name cannot be empty"
        );
    }

    #[test]
    fn test_render_error_converts() {
        let error: RouterError = RenderError::new("#app", "detached").into();
        assert!(matches!(error, RouterError::Render(_)));
        assert_eq!(error.to_string(), "failed to render into '#app': detached");
    }
}
