//! # purnav
//!
//! A client-side router with:
//!
//! - **Route Matching** - `/users/:id` style patterns, first registered match wins
//! - **Lifecycle Hooks** - `on_unmount`, async `on_mount`, then render
//! - **Latest Navigation Wins** - a slow `on_mount` never renders over a newer navigation
//! - **History Sync** - push, replace and back/forward through a pluggable backend
//! - **Link Interception** - clicks and Enter/Space on marked links navigate in place
//! - **Active Links** - links to the current path get a class and `aria-current`
//! - **Error Handling** - custom `404` route with a default-route and built-in fallback
//!
//! The page itself is out of reach: history, rendering and the document are
//! collaborators behind [`HistoryBackend`], [`ViewRenderer`] and [`Document`].
//! In-memory implementations of all three ship with the crate.
//!
//! # Quick Start
//!
//! ```
//! use purnav::*;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), RouterError> {
//! let history = Rc::new(MemoryHistory::new("/"));
//! let renderer = Rc::new(MarkupRenderer::new(["#app"]));
//! let document = Rc::new(MemoryDocument::new());
//!
//! let mut router = Router::new(
//!     RouterConfig::new("My App"),
//!     history.clone(),
//!     renderer.clone(),
//!     document.clone(),
//! );
//!
//! router
//!     .add_route("/", RouteHandler::new(|cx| {
//!         View::markup(format!("<a {}>Profile</a>", cx.link("/users/1")))
//!     }))?
//!     .add_route("/users/:id", RouteHandler::new(|cx| {
//!         View::text(format!("User {}", cx.params.get("id").unwrap_or_default()))
//!     }).title("Profile"))?;
//!
//! let result = pollster::block_on(async {
//!     router.start().await?;
//!     router.navigate("/users/1").await
//! })?;
//!
//! assert!(result.is_success());
//! assert_eq!(document.title(), "Profile");
//! assert_eq!(history.current_url(), "/users/1");
//! # Ok(())
//! # }
//! ```
//!
//! # Async Mount
//!
//! `on_mount` may await. Rendering waits for it, and if another navigation
//! starts meanwhile the first one resolves to [`NavigationResult::Superseded`]
//! without rendering:
//!
//! ```ignore
//! RouteHandler::new(render_user).on_mount(|cx: MountContext| async move {
//!     let user = api::fetch_user(cx.params.get("id").unwrap_or_default()).await?;
//!     cx.store.set("user", user);
//!     Ok(())
//! })
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU cache in front of route matching

#![doc(html_root_url = "https://docs.rs/purnav/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod history;
pub mod matcher;
pub mod route;
pub mod router;
pub mod state;

// Error handling
pub mod error;

// Route lifecycle
pub mod lifecycle;

// Host collaborators
pub mod document;
pub mod events;
pub mod view;

// Other modules
pub mod config;
pub mod context;
pub mod params;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, CachedMatch, ResolutionCache};
pub use config::RouterConfig;
pub use context::{Environment, RenderContext};
pub use document::{Document, LinkId, MemoryDocument, NavLink, RootId};
pub use error::{NavigationResult, RenderError, RouterError};
pub use events::{EventKind, EventTarget, Modifiers, NavEvent};
pub use history::{HistoryBackend, HistoryListener, MemoryHistory};
pub use lifecycle::{ActionContext, HookResult, MountContext};
pub use matcher::{RoutePattern, Segment};
pub use params::{split_url, QueryParams, RouteParams};
pub use route::{Route, RouteHandler, RouteMeta, NOT_FOUND_PATTERN};
pub use router::{RouteChangeListener, Router};
pub use state::{NavigationState, StateSnapshot, Store, SubscriptionId};
pub use view::{Element, MarkupRenderer, View, ViewRenderer};

/// How a resolution was triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// First resolution after startup
    Initial,
    /// A new history entry was pushed
    Push,
    /// The current history entry was replaced
    Replace,
    /// History moved back or forward
    Pop,
    /// The current URL was resolved again on request
    Refresh,
}

/// Event emitted after a resolution commits.
///
/// # Example
///
/// ```
/// use purnav::{MarkupRenderer, MemoryDocument, MemoryHistory, NavigationKind, RouteHandler, Router, RouterConfig, View};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let mut router = Router::new(
///     RouterConfig::default(),
///     Rc::new(MemoryHistory::new("/")),
///     Rc::new(MarkupRenderer::new(["#app"])),
///     Rc::new(MemoryDocument::new()),
/// );
/// router.add_route("/", RouteHandler::new(|_| View::Empty)).unwrap();
///
/// let kinds = Rc::new(RefCell::new(Vec::new()));
/// let sink = kinds.clone();
/// router.on_route_change(move |event| sink.borrow_mut().push(event.kind));
///
/// pollster::block_on(router.start()).unwrap();
/// assert_eq!(*kinds.borrow(), vec![NavigationKind::Initial]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChangeEvent {
    /// Resolved path, without query string
    pub path: String,
    /// Path plus query string as read from history, fragment dropped
    pub url: String,
    pub params: RouteParams,
    /// Location of the previously committed state (None on the first resolution)
    pub from: Option<String>,
    pub kind: NavigationKind,
}
