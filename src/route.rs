//! Route definition and configuration

use crate::context::RenderContext;
use crate::error::RouterError;
use crate::lifecycle::{ActionContext, ActionFn, HookResult, MountContext, MountFn, UnmountFn};
use crate::matcher::RoutePattern;
use crate::params::RouteParams;
use crate::state::Store;
use crate::view::View;
use futures::FutureExt;
use indexmap::IndexMap;
use std::future::Future;
use std::rc::Rc;

/// Reserved pattern of the not-found route.
///
/// A route registered under this pattern is never matched against paths; it
/// is only used when nothing else matches.
pub const NOT_FOUND_PATTERN: &str = "404";

/// Render function of a route
pub type RenderFn = Rc<dyn Fn(&RenderContext) -> View>;

// ============================================================================
// RouteMeta
// ============================================================================

/// Document metadata applied when a route is entered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl RouteMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// ============================================================================
// RouteHandler
// ============================================================================

/// Everything a route does once its pattern matched
///
/// # Example
///
/// ```
/// use purnav::{RouteHandler, View};
///
/// let profile = RouteHandler::new(|cx| {
///     View::markup(format!(
///         "<h1>User {}</h1><a {}>Back</a>",
///         cx.params.get("id").unwrap_or("?"),
///         cx.link("/users"),
///     ))
/// })
/// .title("Profile")
/// .description("A single user")
/// .on_unmount(|store| {
///     store.remove("draft");
///     Ok(())
/// })
/// .action("follow", |cx| {
///     cx.store.set("following", true);
///     Ok(())
/// });
/// # let _ = profile;
/// ```
#[derive(Clone)]
pub struct RouteHandler {
    render: RenderFn,
    on_mount: Option<MountFn>,
    on_unmount: Option<UnmountFn>,
    meta: RouteMeta,
    actions: IndexMap<String, ActionFn>,
}

impl RouteHandler {
    /// Create a handler with a render function
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&RenderContext) -> View + 'static,
    {
        Self {
            render: Rc::new(render),
            on_mount: None,
            on_unmount: None,
            meta: RouteMeta::default(),
            actions: IndexMap::new(),
        }
    }

    /// Run a possibly asynchronous hook before the route renders
    ///
    /// Rendering waits for the returned future. If another navigation starts
    /// in the meantime, the result is discarded and this route never renders.
    pub fn on_mount<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(MountContext) -> Fut + 'static,
        Fut: Future<Output = HookResult> + 'static,
    {
        self.on_mount = Some(Rc::new(move |cx| hook(cx).boxed_local()));
        self
    }

    /// Run a hook when the route is left
    pub fn on_unmount<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Store) -> HookResult + 'static,
    {
        self.on_unmount = Some(Rc::new(hook));
        self
    }

    /// Set the document title used while this route is active
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    /// Set the document description used while this route is active
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.meta.description = Some(description.into());
        self
    }

    /// Replace the whole metadata block
    pub fn meta(mut self, meta: RouteMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Register a named action
    ///
    /// Actions are invoked through [`Router::dispatch_action`](crate::Router::dispatch_action)
    /// or by activating an element carrying the configured action attribute.
    pub fn action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&ActionContext) -> HookResult + 'static,
    {
        self.actions.insert(name.into(), Rc::new(action));
        self
    }

    pub fn metadata(&self) -> &RouteMeta {
        &self.meta
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Action names in registration order
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub(crate) fn on_mount_hook(&self) -> Option<&MountFn> {
        self.on_mount.as_ref()
    }

    pub(crate) fn on_unmount_hook(&self) -> Option<&UnmountFn> {
        self.on_unmount.as_ref()
    }

    pub(crate) fn action_hook(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    /// Build the view for a context
    pub fn render(&self, cx: &RenderContext) -> View {
        (self.render)(cx)
    }
}

impl std::fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteHandler")
            .field("meta", &self.meta)
            .field("on_mount", &self.on_mount.is_some())
            .field("on_unmount", &self.on_unmount.is_some())
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ============================================================================
// Route
// ============================================================================

/// A registered route: compiled pattern plus handler
pub struct Route {
    pattern: RoutePattern,
    handler: RouteHandler,
}

impl Route {
    /// Compile `pattern` and attach `handler`
    pub fn new(pattern: &str, handler: RouteHandler) -> Result<Self, RouterError> {
        Ok(Self {
            pattern: RoutePattern::parse(pattern)?,
            handler,
        })
    }

    /// Route under the reserved not-found pattern
    pub(crate) fn not_found(handler: RouteHandler) -> Self {
        Self {
            pattern: RoutePattern::literal(NOT_FOUND_PATTERN),
            handler,
        }
    }

    /// Built-in fallback used when there is no `404` route and no default route
    pub(crate) fn not_found_stub() -> Self {
        Self::not_found(
            RouteHandler::new(|_| {
                View::element("main")
                    .attr("class", "not-found")
                    .child(View::element("h1").child(View::text("404")))
                    .child(View::element("p").child(View::text("Page not found")))
                    .into()
            })
            .title("Not Found"),
        )
    }

    /// Whether this route sits under the reserved not-found pattern
    pub fn is_not_found(&self) -> bool {
        self.pattern.as_str() == NOT_FOUND_PATTERN
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    pub fn meta(&self) -> &RouteMeta {
        self.handler.metadata()
    }

    /// Match a path (without query) against this route
    pub fn matches(&self, path: &str) -> Option<RouteParams> {
        self.pattern.matches(path)
    }

    /// Build the view for this route
    pub fn render(&self, cx: &RenderContext) -> View {
        self.handler.render(cx)
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern.as_str())
            .field("handler", &self.handler)
            .finish()
    }
}
