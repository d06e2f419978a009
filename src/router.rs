//! The router
//!
//! [`Router`] owns the route table and the committed navigation state. Every
//! entry point (programmatic navigation, intercepted link activation, history
//! movement) ends in the same resolution: read the URL from history, match it,
//! run the lifecycle transition, render, commit.
//!
//! Resolutions may overlap, because `on_mount` can suspend. Each one takes a
//! new generation number; when its mount finishes it checks that no newer
//! resolution started meanwhile and otherwise gives up without rendering.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, CachedMatch, ResolutionCache};
use crate::config::RouterConfig;
use crate::context::{Environment, RenderContext};
use crate::document::Document;
use crate::error::{NavigationResult, RouterError};
use crate::events::{EventTarget, NavEvent};
use crate::history::HistoryBackend;
use crate::lifecycle::{self, ActionContext, MountContext};
use crate::params::{split_url, QueryParams, RouteParams};
use crate::route::{Route, RouteHandler, NOT_FOUND_PATTERN};
use crate::state::{NavigationState, Store, SubscriptionId};
use crate::view::ViewRenderer;
use crate::{debug_log, error_log, info_log, trace_log, warn_log};
use crate::{NavigationKind, RouteChangeEvent};
use futures::task::{LocalSpawn, LocalSpawnExt};
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback fired after every committed resolution
pub type RouteChangeListener = Rc<dyn Fn(&RouteChangeEvent)>;

/// Path plus query of a history URL, without its fragment
fn location(url: &str) -> String {
    match split_url(url) {
        (path, "") => path.to_string(),
        (path, query) => format!("{}?{}", path, query),
    }
}

/// Client-side router
///
/// Routes are registered on an owned router; once it is shared behind an
/// `Rc` the table is fixed.
///
/// # Example
///
/// ```
/// use purnav::{
///     MarkupRenderer, MemoryDocument, MemoryHistory, RouteHandler, Router, RouterConfig, View,
/// };
/// use std::rc::Rc;
///
/// # fn main() -> Result<(), purnav::RouterError> {
/// let renderer = Rc::new(MarkupRenderer::new(["#app"]));
/// let mut router = Router::new(
///     RouterConfig::new("Demo"),
///     Rc::new(MemoryHistory::new("/")),
///     renderer.clone(),
///     Rc::new(MemoryDocument::new()),
/// );
///
/// router
///     .add_route("/", RouteHandler::new(|_| View::text("home")))?
///     .add_route("/users/:id", RouteHandler::new(|cx| {
///         View::text(format!("user {}", cx.params.get("id").unwrap_or_default()))
///     }))?;
///
/// pollster::block_on(async {
///     router.start().await?;
///     router.navigate("/users/42").await?;
///     Ok::<_, purnav::RouterError>(())
/// })?;
///
/// assert_eq!(renderer.content("#app").as_deref(), Some("user 42"));
/// # Ok(())
/// # }
/// ```
pub struct Router {
    config: RouterConfig,
    history: Rc<dyn HistoryBackend>,
    renderer: Rc<dyn ViewRenderer>,
    document: Rc<dyn Document>,
    store: Rc<Store>,

    routes: Vec<Rc<Route>>,
    not_found: Option<Rc<Route>>,
    default_route: Option<usize>,
    stub: Rc<Route>,

    environment: RefCell<Environment>,
    current: RefCell<Option<NavigationState>>,
    mounted: RefCell<Option<Rc<Route>>>,
    /// Location of the most recently started resolution
    last_url: RefCell<Option<String>>,
    generation: Cell<u64>,
    /// Generation of the last resolution that rendered or failed to
    settled: Cell<u64>,
    listeners: RefCell<Vec<RouteChangeListener>>,
    store_binding: Cell<Option<SubscriptionId>>,

    #[cfg(feature = "cache")]
    cache: RefCell<ResolutionCache>,
}

impl Router {
    pub fn new(
        config: RouterConfig,
        history: Rc<dyn HistoryBackend>,
        renderer: Rc<dyn ViewRenderer>,
        document: Rc<dyn Document>,
    ) -> Self {
        Self {
            environment: RefCell::new(config.environment.clone()),
            #[cfg(feature = "cache")]
            cache: RefCell::new(ResolutionCache::with_capacity(config.cache_capacity)),
            config,
            history,
            renderer,
            document,
            store: Rc::new(Store::new()),
            routes: Vec::new(),
            not_found: None,
            default_route: None,
            stub: Rc::new(Route::not_found_stub()),
            current: RefCell::new(None),
            mounted: RefCell::new(None),
            last_url: RefCell::new(None),
            generation: Cell::new(0),
            settled: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            store_binding: Cell::new(None),
        }
    }

    /// Share an existing store instead of the router's own
    pub fn with_store(mut self, store: Rc<Store>) -> Self {
        self.store = store;
        self
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    /// Register a route
    ///
    /// The first route registered becomes the default route unless one is set
    /// explicitly. Registering a pattern that already exists replaces its
    /// handler and keeps its position in the scan order. The reserved `"404"`
    /// pattern registers the not-found route, which is never scanned.
    ///
    /// # Errors
    ///
    /// [`RouterError::InvalidRoute`] if the pattern does not compile.
    pub fn add_route(
        &mut self,
        pattern: &str,
        handler: RouteHandler,
    ) -> Result<&mut Self, RouterError> {
        if pattern == NOT_FOUND_PATTERN {
            return Ok(self.set_not_found(handler));
        }

        let route = Rc::new(Route::new(pattern, handler)?);

        if let Some(index) = self.position(pattern) {
            debug_log!("replacing handler of route '{}'", pattern);
            self.routes[index] = route;
        } else {
            debug_log!("registering route '{}'", pattern);
            self.routes.push(route);
            if self.default_route.is_none() {
                self.default_route = Some(self.routes.len() - 1);
            }
        }

        self.invalidate_cache();
        Ok(self)
    }

    /// Register the route rendered when nothing matches
    pub fn set_not_found(&mut self, handler: RouteHandler) -> &mut Self {
        debug_log!("registering not-found route");
        self.not_found = Some(Rc::new(Route::not_found(handler)));
        self
    }

    /// Make a registered route the default
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownRoute`] if no route has this pattern.
    pub fn set_default_route(&mut self, pattern: &str) -> Result<&mut Self, RouterError> {
        let index = self
            .position(pattern)
            .ok_or_else(|| RouterError::UnknownRoute {
                pattern: pattern.to_string(),
            })?;
        debug_log!("default route is now '{}'", pattern);
        self.default_route = Some(index);
        Ok(self)
    }

    fn position(&self, pattern: &str) -> Option<usize> {
        self.routes
            .iter()
            .position(|route| route.pattern().as_str() == pattern)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn store(&self) -> &Rc<Store> {
        &self.store
    }

    /// Registered patterns in scan order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|route| route.pattern().as_str())
    }

    pub fn route(&self, pattern: &str) -> Option<&Rc<Route>> {
        self.position(pattern).and_then(|index| self.routes.get(index))
    }

    pub fn default_route(&self) -> Option<&str> {
        self.default_route
            .and_then(|index| self.routes.get(index))
            .map(|route| route.pattern().as_str())
    }

    pub fn has_not_found(&self) -> bool {
        self.not_found.is_some()
    }

    /// The committed navigation state
    pub fn current(&self) -> Option<NavigationState> {
        self.current.borrow().clone()
    }

    pub fn current_url(&self) -> Option<String> {
        self.current.borrow().as_ref().map(|state| state.url.clone())
    }

    /// Pattern of the route whose lifecycle is active
    ///
    /// Runs ahead of [`current`](Self::current) while a mount is pending.
    pub fn mounted(&self) -> Option<String> {
        self.mounted
            .borrow()
            .as_ref()
            .map(|route| route.pattern().as_str().to_string())
    }

    /// Generation of the most recently started resolution
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    /// Whether the latest resolution is still waiting on its mount
    ///
    /// Superseded resolutions do not count, even while their mount is pending.
    pub fn is_transitioning(&self) -> bool {
        self.generation.get() != self.settled.get()
    }

    pub fn environment(&self) -> Environment {
        self.environment.borrow().clone()
    }

    /// Update device information and re-render the committed route
    ///
    /// Returns whether anything rendered, as [`rerender`](Self::rerender) does.
    pub fn set_environment(&self, environment: Environment) -> Result<bool, RouterError> {
        *self.environment.borrow_mut() = environment;
        self.rerender()
    }

    /// Build a URL for a registered pattern
    ///
    /// # Errors
    ///
    /// [`RouterError::UnknownRoute`] for an unregistered pattern,
    /// [`RouterError::MissingParam`] when `params` lacks a value.
    pub fn url_for(&self, pattern: &str, params: &RouteParams) -> Result<String, RouterError> {
        let route = self.route(pattern).ok_or_else(|| RouterError::UnknownRoute {
            pattern: pattern.to_string(),
        })?;
        route.pattern().to_url(params)
    }

    #[cfg(feature = "cache")]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats().clone()
    }

    // ------------------------------------------------------------------------
    // Matching
    // ------------------------------------------------------------------------

    #[cfg(feature = "cache")]
    fn invalidate_cache(&mut self) {
        self.cache.get_mut().clear();
    }

    #[cfg(not(feature = "cache"))]
    fn invalidate_cache(&mut self) {}

    fn scan(&self, path: &str) -> Option<(usize, RouteParams)> {
        trace_log!("scanning {} routes for '{}'", self.routes.len(), path);
        self.routes
            .iter()
            .enumerate()
            .find_map(|(index, route)| route.matches(path).map(|params| (index, params)))
    }

    #[cfg(feature = "cache")]
    fn lookup(&self, path: &str) -> Option<(usize, RouteParams)> {
        let cached = self.cache.borrow_mut().get(path);
        if let Some(hit) = cached {
            return hit.index.map(|index| (index, hit.params));
        }

        let found = self.scan(path);
        let entry = match &found {
            Some((index, params)) => CachedMatch {
                index: Some(*index),
                params: params.clone(),
            },
            None => CachedMatch {
                index: None,
                params: RouteParams::new(),
            },
        };
        self.cache.borrow_mut().insert(path, entry);
        found
    }

    #[cfg(not(feature = "cache"))]
    fn lookup(&self, path: &str) -> Option<(usize, RouteParams)> {
        self.scan(path)
    }

    /// Route for a path, falling back when nothing matches
    ///
    /// The boolean is false for fallbacks.
    fn match_path(&self, path: &str) -> (Rc<Route>, RouteParams, bool) {
        if let Some((index, params)) = self.lookup(path) {
            if let Some(route) = self.routes.get(index) {
                return (route.clone(), params, true);
            }
        }
        (self.fallback(), RouteParams::new(), false)
    }

    fn fallback(&self) -> Rc<Route> {
        if let Some(route) = &self.not_found {
            return route.clone();
        }
        self.default_route
            .and_then(|index| self.routes.get(index))
            .unwrap_or(&self.stub)
            .clone()
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Initial resolution of whatever URL history holds
    pub async fn start(&self) -> Result<NavigationResult, RouterError> {
        info_log!("router starting with {} routes", self.routes.len());
        self.resolve_as(NavigationKind::Initial, true).await
    }

    /// Resolve the current history URL
    ///
    /// Returns [`NavigationResult::Unchanged`] if it equals the URL of the
    /// last started resolution.
    pub async fn resolve(&self) -> Result<NavigationResult, RouterError> {
        self.resolve_as(NavigationKind::Pop, false).await
    }

    /// Resolve the current URL again, running the full lifecycle
    pub async fn refresh(&self) -> Result<NavigationResult, RouterError> {
        self.resolve_as(NavigationKind::Refresh, true).await
    }

    /// Push `url` onto history and resolve it
    ///
    /// Nothing happens when `url` names the current history location. The
    /// `#fragment` takes no part in that comparison.
    pub async fn navigate(&self, url: &str) -> Result<NavigationResult, RouterError> {
        let target = location(url);
        if location(&self.history.current_url()) == target {
            trace_log!("already at '{}'", target);
            return Ok(NavigationResult::Unchanged { url: target });
        }
        self.history.push(url);
        self.resolve_as(NavigationKind::Push, false).await
    }

    /// Replace the current history entry with `url` and resolve it
    pub async fn replace(&self, url: &str) -> Result<NavigationResult, RouterError> {
        self.history.replace(url);
        self.resolve_as(NavigationKind::Replace, false).await
    }

    async fn resolve_as(
        &self,
        kind: NavigationKind,
        force: bool,
    ) -> Result<NavigationResult, RouterError> {
        let url = location(&self.history.current_url());

        if !force && self.last_url.borrow().as_deref() == Some(url.as_str()) {
            trace_log!("'{}' is already resolved", url);
            return Ok(NavigationResult::Unchanged { url });
        }

        let (path, query_string) = split_url(&url);
        let path = path.to_string();
        let query = QueryParams::from_query_string(query_string);
        let (route, params, matched) = self.match_path(&path);

        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.last_url.borrow_mut() = Some(url.clone());

        debug_log!(
            "resolving '{}' to '{}' (generation {})",
            url,
            route.pattern(),
            generation
        );

        let previous = self.mounted.borrow_mut().take();
        if let Some(previous) = previous {
            lifecycle::run_unmount(&previous, &self.store);
        }

        self.apply_meta(&route);

        *self.mounted.borrow_mut() = Some(route.clone());
        let mount = MountContext {
            store: self.store.clone(),
            params: params.clone(),
            query: query.clone(),
            path: path.clone(),
            environment: self.environment(),
        };
        lifecycle::run_mount(&route, mount).await;

        if self.generation.get() != generation {
            debug_log!(
                "resolution of '{}' superseded by generation {}",
                url,
                self.generation.get()
            );
            return Ok(NavigationResult::Superseded { url });
        }

        let cx = self.render_context(params.clone(), query.clone(), path.clone());
        if let Err(err) = self
            .renderer
            .render(&self.config.mount_target, route.render(&cx))
        {
            error_log!("rendering '{}' failed: {}", url, err);
            self.settled.set(generation);
            let committed = self.current_url();
            *self.last_url.borrow_mut() = committed;
            return Err(err.into());
        }

        let state = NavigationState {
            url: url.clone(),
            path: path.clone(),
            query,
            route,
            params: params.clone(),
            generation,
            not_found: !matched,
        };
        let from = self.current.replace(Some(state)).map(|previous| previous.url);
        self.settled.set(generation);

        self.mark_active_links(&path);
        self.emit(&RouteChangeEvent {
            path,
            url: url.clone(),
            params,
            from,
            kind,
        });

        if matched {
            Ok(NavigationResult::Success { url })
        } else {
            warn_log!("no route matches '{}'", url);
            Ok(NavigationResult::NotFound { url })
        }
    }

    fn render_context(
        &self,
        params: RouteParams,
        query: QueryParams,
        path: String,
    ) -> RenderContext {
        RenderContext::new(
            self.store.snapshot(),
            params,
            query,
            path,
            self.environment(),
            &self.config.link_attribute,
        )
    }

    fn apply_meta(&self, route: &Route) {
        let meta = route.meta();
        self.document
            .set_title(meta.title.as_deref().unwrap_or(&self.config.app_title));
        self.document.set_description(
            meta.description
                .as_deref()
                .unwrap_or(&self.config.app_description),
        );
    }

    fn mark_active_links(&self, path: &str) {
        let links = self.document.nav_links(&self.config.link_attribute);
        trace_log!("marking {} navigation links for '{}'", links.len(), path);
        for link in links {
            let active = link.path() == path;
            self.document
                .set_link_active(link.id, active, &self.config.active_class);
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Intercept a click or key press
    ///
    /// Walks the composed path from the innermost target outwards and acts on
    /// the first element carrying the link or action attribute. Links navigate
    /// to their `href` (or the link attribute's value); actions run on the
    /// current route. In both cases the event's default is prevented.
    ///
    /// Returns the navigation outcome when the event navigated.
    pub async fn handle_event(
        &self,
        event: &mut NavEvent,
    ) -> Result<Option<NavigationResult>, RouterError> {
        if !event.is_activation() {
            return Ok(None);
        }

        let link_attribute = self.config.link_attribute.as_str();
        let action_attribute = self.config.action_attribute.as_str();
        let Some(target) = event.path.iter().find(|target| {
            target.has_attribute(link_attribute) || target.has_attribute(action_attribute)
        }) else {
            return Ok(None);
        };

        if let Some(action) = target.attribute(action_attribute) {
            let action = action.to_string();
            let target = target.clone();
            event.prevent_default();
            self.dispatch_action(&action, Some(&target));
            return Ok(None);
        }

        let url = target
            .attribute("href")
            .filter(|href| !href.is_empty())
            .or_else(|| target.attribute(link_attribute))
            .unwrap_or_default()
            .to_string();
        event.prevent_default();

        if url.is_empty() {
            warn_log!("navigation link without a target");
            return Ok(None);
        }
        self.navigate(&url).await.map(Some)
    }

    /// Run a named action of the committed route
    ///
    /// Returns false when there is no committed route or it has no such
    /// action. Action failures are logged.
    pub fn dispatch_action(&self, name: &str, target: Option<&EventTarget>) -> bool {
        let Some((route, params)) = self
            .current
            .borrow()
            .as_ref()
            .map(|state| (state.route.clone(), state.params.clone()))
        else {
            debug_log!("action '{}' dispatched before any route", name);
            return false;
        };

        let Some(action) = route.handler().action_hook(name) else {
            debug_log!("route '{}' has no action '{}'", route.pattern(), name);
            return false;
        };

        let cx = ActionContext {
            store: self.store.clone(),
            params,
            attributes: target
                .map(|target| target.attributes.clone())
                .unwrap_or_else(IndexMap::new),
        };
        if let Err(err) = action(&cx) {
            warn_log!(
                "action '{}' of '{}' failed: {:#}",
                name,
                route.pattern(),
                err
            );
        }
        true
    }

    /// Subscribe to history movement
    ///
    /// Every change spawns a resolution on `spawner`. Nothing is pushed.
    pub fn listen<S>(self: &Rc<Self>, spawner: S)
    where
        S: LocalSpawn + 'static,
    {
        let router = Rc::downgrade(self);
        self.history.on_change(Rc::new(move |url: &str| {
            let Some(router) = router.upgrade() else {
                return;
            };
            trace_log!("history moved to '{}'", url);

            let spawned = spawner.spawn_local(async move {
                if let Err(err) = router.resolve().await {
                    error_log!("resolution after history change failed: {}", err);
                }
            });
            if let Err(err) = spawned {
                error_log!("could not spawn resolution: {}", err);
            }
        }));
    }

    /// Render the committed route again with a fresh state snapshot
    ///
    /// No lifecycle hooks run. Skipped while the latest resolution is still
    /// mounting, since it renders a fresh snapshot itself. Returns whether
    /// anything rendered.
    pub fn rerender(&self) -> Result<bool, RouterError> {
        if self.is_transitioning() {
            trace_log!("skipping re-render during transition");
            return Ok(false);
        }
        let Some(state) = self.current() else {
            return Ok(false);
        };

        let cx = self.render_context(state.params, state.query, state.path);
        self.renderer
            .render(&self.config.mount_target, state.route.render(&cx))?;
        Ok(true)
    }

    /// Re-render on every store change
    ///
    /// Calling it twice keeps a single binding.
    pub fn bind_store(self: &Rc<Self>) -> SubscriptionId {
        if let Some(id) = self.store_binding.get() {
            return id;
        }

        let router = Rc::downgrade(self);
        let id = self.store.subscribe(move |key, _| {
            let Some(router) = router.upgrade() else {
                return;
            };
            trace_log!("store key '{}' changed", key);
            if let Err(err) = router.rerender() {
                error_log!("re-render after store change failed: {}", err);
            }
        });
        self.store_binding.set(Some(id));
        id
    }

    /// Stop re-rendering on store changes
    pub fn unbind_store(&self) -> bool {
        match self.store_binding.take() {
            Some(id) => self.store.unsubscribe(id),
            None => false,
        }
    }

    /// Register a listener for committed resolutions
    pub fn on_route_change<F>(&self, listener: F)
    where
        F: Fn(&RouteChangeEvent) + 'static,
    {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn emit(&self, event: &RouteChangeEvent) {
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(event);
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.patterns().collect::<Vec<_>>())
            .field("default_route", &self.default_route())
            .field("not_found", &self.not_found.is_some())
            .field("current", &self.current_url())
            .field("generation", &self.generation.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::history::MemoryHistory;
    use crate::view::{MarkupRenderer, View};

    fn router() -> Router {
        Router::new(
            RouterConfig::new("Test"),
            Rc::new(MemoryHistory::new("/")),
            Rc::new(MarkupRenderer::new(["#app"])),
            Rc::new(MemoryDocument::new()),
        )
    }

    fn page(text: &'static str) -> RouteHandler {
        RouteHandler::new(move |_| View::text(text))
    }

    #[test]
    fn test_first_route_is_default() {
        let mut router = router();
        router
            .add_route("/home", page("home"))
            .unwrap()
            .add_route("/about", page("about"))
            .unwrap();

        assert_eq!(router.default_route(), Some("/home"));
    }

    #[test]
    fn test_not_found_is_never_implicit_default() {
        let mut router = router();
        router.add_route("404", page("missing")).unwrap();
        router.add_route("/home", page("home")).unwrap();

        assert_eq!(router.default_route(), Some("/home"));
        assert!(router.has_not_found());
        assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["/home"]);
    }

    #[test]
    fn test_set_default_route() {
        let mut router = router();
        router.add_route("/a", page("a")).unwrap();
        router.add_route("/b", page("b")).unwrap();

        router.set_default_route("/b").unwrap();
        assert_eq!(router.default_route(), Some("/b"));

        let err = router.set_default_route("/c").unwrap_err();
        assert!(matches!(err, RouterError::UnknownRoute { ref pattern } if pattern == "/c"));
        assert_eq!(router.default_route(), Some("/b"));
    }

    #[test]
    fn test_duplicate_registration_replaces_in_place() {
        let mut router = router();
        router.add_route("/a", page("first")).unwrap();
        router.add_route("/b", page("b")).unwrap();
        router.add_route("/a", page("second")).unwrap();

        assert_eq!(router.patterns().collect::<Vec<_>>(), vec!["/a", "/b"]);
        let markup = router
            .route("/a")
            .unwrap()
            .render(&RenderContext::for_path("/a"))
            .to_markup();
        assert_eq!(markup, "second");
    }

    #[test]
    fn test_invalid_route_is_not_added() {
        let mut router = router();
        assert!(router.add_route("/users/:", page("x")).is_err());
        assert!(router.add_route("", page("x")).is_err());
        assert_eq!(router.patterns().count(), 0);
        assert_eq!(router.default_route(), None);
    }

    #[test]
    fn test_fallback_chain() {
        let mut router = router();
        assert!(router.fallback().is_not_found());

        router.add_route("/home", page("home")).unwrap();
        assert_eq!(router.fallback().pattern().as_str(), "/home");

        router.set_not_found(page("missing"));
        assert!(router.fallback().is_not_found());
        assert_eq!(
            router
                .fallback()
                .render(&RenderContext::for_path("/x"))
                .to_markup(),
            "missing"
        );
    }

    #[test]
    fn test_match_path_first_match_wins() {
        let mut router = router();
        router.add_route("/users/:id", page("param")).unwrap();
        router.add_route("/users/new", page("literal")).unwrap();

        let (route, params, matched) = router.match_path("/users/new");
        assert!(matched);
        assert_eq!(route.pattern().as_str(), "/users/:id");
        assert_eq!(params.get("id"), Some("new"));
    }

    #[test]
    fn test_url_for() {
        let mut router = router();
        router.add_route("/users/:id", page("user")).unwrap();

        let params: RouteParams = [("id", "9")].into_iter().collect();
        assert_eq!(router.url_for("/users/:id", &params).unwrap(), "/users/9");
        assert!(matches!(
            router.url_for("/posts/:id", &params),
            Err(RouterError::UnknownRoute { .. })
        ));
    }

    #[cfg(feature = "cache")]
    #[test]
    fn test_cache_invalidated_on_registration() {
        let mut router = router();
        router.add_route("/a", page("a")).unwrap();

        router.match_path("/b");
        router.match_path("/b");
        assert_eq!(router.cache_stats().hits, 1);

        router.add_route("/b", page("b")).unwrap();
        let (route, _, matched) = router.match_path("/b");
        assert!(matched);
        assert_eq!(route.pattern().as_str(), "/b");
        assert_eq!(router.cache_stats().invalidations, 2);
    }

    #[test]
    fn test_location_drops_fragment() {
        assert_eq!(location("/a#section"), "/a");
        assert_eq!(location("/search?q=rust#top"), "/search?q=rust");
        assert_eq!(location("?page=2"), "/?page=2");
        assert_eq!(location("#top"), "/");
    }

    #[test]
    fn test_not_transitioning_before_start() {
        assert!(!router().is_transitioning());
    }
}
