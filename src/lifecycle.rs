//! Route lifecycle hooks
//!
//! A transition from one route to the next runs, in order:
//!
//! 1. `on_unmount` of the route being left (synchronous)
//! 2. document metadata update
//! 3. `on_mount` of the route being entered (may suspend)
//! 4. render
//!
//! Hook failures are logged and never returned to the caller.

use crate::context::Environment;
use crate::params::{QueryParams, RouteParams};
use crate::route::Route;
use crate::state::Store;
use crate::warn_log;
use futures::future::LocalBoxFuture;
use indexmap::IndexMap;
use std::rc::Rc;

/// Result returned by hooks and actions
pub type HookResult = anyhow::Result<()>;

/// Pending `on_mount` computation
pub type MountFuture = LocalBoxFuture<'static, HookResult>;

/// `on_mount` hook. Receives an owned context so the returned future can outlive the call.
pub type MountFn = Rc<dyn Fn(MountContext) -> MountFuture>;

/// `on_unmount` hook
pub type UnmountFn = Rc<dyn Fn(&Store) -> HookResult>;

/// Named action handler of a route
pub type ActionFn = Rc<dyn Fn(&ActionContext) -> HookResult>;

/// What an `on_mount` hook gets to work with
///
/// Typical use is loading data and writing it into the store before the
/// route renders:
///
/// ```
/// use purnav::{MountContext, RouteHandler, View};
///
/// let handler = RouteHandler::new(|cx| View::text(cx.state.get_str("user").unwrap_or("...")))
///     .on_mount(|cx: MountContext| async move {
///         let id = cx.params.get("id").unwrap_or_default().to_string();
///         cx.store.set("user", format!("user #{}", id));
///         Ok(())
///     });
/// # let _ = handler;
/// ```
#[derive(Clone)]
pub struct MountContext {
    pub store: Rc<Store>,
    pub params: RouteParams,
    pub query: QueryParams,
    /// Resolved path, without query string
    pub path: String,
    pub environment: Environment,
}

/// What an action handler gets to work with
#[derive(Clone)]
pub struct ActionContext {
    pub store: Rc<Store>,
    /// Parameters of the currently committed route
    pub params: RouteParams,
    /// Attributes of the element that triggered the action; empty when
    /// dispatched programmatically
    pub attributes: IndexMap<String, String>,
}

impl ActionContext {
    /// Attribute of the triggering element
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Run the route's `on_unmount`, logging a failure instead of returning it.
pub(crate) fn run_unmount(route: &Route, store: &Store) {
    let Some(hook) = route.handler().on_unmount_hook() else {
        return;
    };
    if let Err(err) = hook(store) {
        warn_log!("on_unmount of '{}' failed: {:#}", route.pattern(), err);
    }
}

/// Await the route's `on_mount`, logging a failure instead of returning it.
pub(crate) async fn run_mount(route: &Route, cx: MountContext) {
    let Some(hook) = route.handler().on_mount_hook() else {
        return;
    };
    if let Err(err) = hook(cx).await {
        warn_log!("on_mount of '{}' failed: {:#}", route.pattern(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteHandler;
    use crate::View;
    use std::cell::Cell;

    fn mount_context(store: &Rc<Store>) -> MountContext {
        MountContext {
            store: store.clone(),
            params: RouteParams::new(),
            query: QueryParams::new(),
            path: "/".to_string(),
            environment: Environment::default(),
        }
    }

    #[test]
    fn test_run_unmount_calls_hook() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let handler = RouteHandler::new(|_| View::Empty).on_unmount(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });
        let route = Route::new("/", handler).unwrap();

        run_unmount(&route, &Store::new());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_run_unmount_swallows_errors() {
        let handler =
            RouteHandler::new(|_| View::Empty).on_unmount(|_| Err(anyhow::anyhow!("boom")));
        let route = Route::new("/", handler).unwrap();

        run_unmount(&route, &Store::new());
    }

    #[test]
    fn test_run_mount_awaits_hook() {
        let store = Rc::new(Store::new());
        let handler = RouteHandler::new(|_| View::Empty).on_mount(|cx: MountContext| async move {
            cx.store.set("loaded", true);
            Ok(())
        });
        let route = Route::new("/", handler).unwrap();

        pollster::block_on(run_mount(&route, mount_context(&store)));
        assert_eq!(store.get("loaded"), Some(serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_run_mount_swallows_errors() {
        let store = Rc::new(Store::new());
        let handler = RouteHandler::new(|_| View::Empty)
            .on_mount(|_cx: MountContext| async { Err(anyhow::anyhow!("network down")) });
        let route = Route::new("/", handler).unwrap();

        pollster::block_on(run_mount(&route, mount_context(&store)));
    }

    #[test]
    fn test_routes_without_hooks_are_noops() {
        let store = Rc::new(Store::new());
        let route = Route::new("/", RouteHandler::new(|_| View::Empty)).unwrap();

        run_unmount(&route, &store);
        pollster::block_on(run_mount(&route, mount_context(&store)));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_action_context_attribute() {
        let mut attributes = IndexMap::new();
        attributes.insert("data-id".to_string(), "7".to_string());
        let cx = ActionContext {
            store: Rc::new(Store::new()),
            params: RouteParams::new(),
            attributes,
        };

        assert_eq!(cx.attribute("data-id"), Some("7"));
        assert_eq!(cx.attribute("data-missing"), None);
    }
}
