//! Application and navigation state

use crate::params::{QueryParams, RouteParams};
use crate::route::Route;
use crate::trace_log;
use indexmap::IndexMap;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback fired after a store key changes
pub type StoreListener = Rc<dyn Fn(&str, &Value)>;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

// ============================================================================
// Store
// ============================================================================

/// Shared key/value store
///
/// Writes go through [`Store::set`], which notifies every subscriber
/// synchronously before returning. There is no interception of plain field
/// access; a change that does not go through `set` is not observed.
///
/// ```
/// use purnav::Store;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let store = Store::new();
/// let changes = Rc::new(Cell::new(0));
///
/// let counter = changes.clone();
/// store.subscribe(move |_, _| counter.set(counter.get() + 1));
///
/// store.set("theme", "dark");
/// assert_eq!(store.get_str("theme").as_deref(), Some("dark"));
/// assert_eq!(changes.get(), 1);
/// ```
#[derive(Default)]
pub struct Store {
    values: RefCell<IndexMap<String, Value>>,
    subscribers: RefCell<Vec<(SubscriptionId, StoreListener)>>,
    next_id: Cell<u64>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a value and notify subscribers
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        trace_log!("store set '{}'", key);

        self.values.borrow_mut().insert(key.clone(), value.clone());

        // Subscribers may read or write the store
        let subscribers: Vec<StoreListener> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in subscribers {
            listener(&key, &value);
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.borrow().get(key).cloned()
    }

    /// String value of a key, if it holds a string
    pub fn get_str(&self, key: &str) -> Option<String> {
        self.values
            .borrow()
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// Remove a key without notifying subscribers
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.borrow_mut().shift_remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.borrow().contains_key(key)
    }

    /// Copy of every value, in insertion order
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            values: self.values.borrow().clone(),
        }
    }

    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&str, &Value) + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.subscribers.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("values", &self.values.borrow())
            .field("subscribers", &self.subscribers.borrow().len())
            .finish()
    }
}

/// Read-only copy of the store taken at render time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    values: IndexMap<String, Value>,
}

impl StateSnapshot {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

// ============================================================================
// NavigationState
// ============================================================================

/// The committed result of a resolution
///
/// Replaced wholesale every time a resolution commits.
#[derive(Debug, Clone)]
pub struct NavigationState {
    /// Path plus query string as read from history, fragment dropped
    pub url: String,
    pub path: String,
    pub query: QueryParams,
    pub route: Rc<Route>,
    pub params: RouteParams,
    /// Generation of the resolution that committed this state
    pub generation: u64,
    /// Whether `route` is a fallback rather than a real match
    pub not_found: bool,
}

impl NavigationState {
    /// Registered pattern of the resolved route
    pub fn pattern(&self) -> &str {
        self.route.pattern().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_and_get() {
        let store = Store::new();
        store.set("count", 3);
        store.set("user", json!({ "name": "ada" }));

        assert_eq!(store.get("count"), Some(json!(3)));
        assert_eq!(store.get("user").unwrap()["name"], "ada");
        assert_eq!(store.get("missing"), None);
        assert!(store.contains("count"));
    }

    #[test]
    fn test_get_str_only_for_strings() {
        let store = Store::new();
        store.set("name", "ada");
        store.set("age", 36);

        assert_eq!(store.get_str("name").as_deref(), Some("ada"));
        assert_eq!(store.get_str("age"), None);
    }

    #[test]
    fn test_set_notifies_synchronously() {
        let store = Store::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        store.subscribe(move |key, value| sink.borrow_mut().push((key.to_string(), value.clone())));

        store.set("a", 1);
        store.set("a", 2);

        assert_eq!(
            *seen.borrow(),
            vec![("a".to_string(), json!(1)), ("a".to_string(), json!(2))]
        );
    }

    #[test]
    fn test_subscriber_can_write_store() {
        let store = Rc::new(Store::new());
        let weak = Rc::downgrade(&store);
        store.subscribe(move |key, _| {
            if key == "source" {
                if let Some(store) = weak.upgrade() {
                    store.set("derived", true);
                }
            }
        });

        store.set("source", 1);
        assert_eq!(store.get("derived"), Some(json!(true)));
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::new();
        let calls = Rc::new(Cell::new(0));

        let counter = calls.clone();
        let id = store.subscribe(move |_, _| counter.set(counter.get() + 1));
        store.set("x", 1);

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set("x", 2);

        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_remove_does_not_notify() {
        let store = Store::new();
        store.set("draft", "text");

        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        store.subscribe(move |_, _| counter.set(counter.get() + 1));

        assert_eq!(store.remove("draft"), Some(json!("text")));
        assert!(store.remove("draft").is_none());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = Store::new();
        store.set("a", 1);
        let snapshot = store.snapshot();
        store.set("b", 2);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("a"), Some(&json!(1)));
        assert!(snapshot.get("b").is_none());
        assert_eq!(snapshot.iter().map(|(k, _)| k).collect::<Vec<_>>(), vec!["a"]);
    }
}
