//! Navigation history
//!
//! The router never owns the URL. It asks a [`HistoryBackend`] for the current
//! URL and tells it about pushes and replacements. In a browser that backend
//! wraps `history.pushState` and `popstate`; [`MemoryHistory`] keeps the stack
//! in memory for tests and headless hosts.

use crate::trace_log;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Callback fired with the new URL when the user moves through history.
pub type HistoryListener = Rc<dyn Fn(&str)>;

/// Source of truth for the current URL.
///
/// `push` and `replace` must not notify listeners; only back/forward style
/// movement (the equivalent of `popstate`) does.
pub trait HistoryBackend {
    /// Add a new entry and make it current
    fn push(&self, url: &str);

    /// Overwrite the current entry
    fn replace(&self, url: &str);

    /// Path plus query string of the current entry
    fn current_url(&self) -> String;

    /// Register a listener for back/forward movement
    fn on_change(&self, listener: HistoryListener);
}

/// In-memory history stack
///
/// Pushing truncates forward entries. The stack is bounded; the oldest
/// entries are dropped once `max_size` is exceeded (0 = unlimited).
///
/// # Example
///
/// ```
/// use purnav::{HistoryBackend, MemoryHistory};
///
/// let history = MemoryHistory::new("/");
/// history.push("/users");
/// history.push("/users/1");
///
/// assert_eq!(history.back().as_deref(), Some("/users"));
/// assert_eq!(history.current_url(), "/users");
/// ```
pub struct MemoryHistory {
    entries: RefCell<Vec<String>>,
    current: Cell<usize>,
    max_size: usize,
    listeners: RefCell<Vec<HistoryListener>>,
}

impl MemoryHistory {
    const DEFAULT_MAX_SIZE: usize = 1000;

    /// Create a new history with initial URL
    pub fn new(initial_url: impl Into<String>) -> Self {
        Self::with_max_size(initial_url, Self::DEFAULT_MAX_SIZE)
    }

    /// Create with custom max size
    pub fn with_max_size(initial_url: impl Into<String>, max_size: usize) -> Self {
        Self {
            entries: RefCell::new(vec![initial_url.into()]),
            current: Cell::new(0),
            max_size,
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Go back one entry and notify listeners
    ///
    /// Returns the new current URL, or `None` at the start of history.
    pub fn back(&self) -> Option<String> {
        self.go(-1)
    }

    /// Go forward one entry and notify listeners
    pub fn forward(&self) -> Option<String> {
        self.go(1)
    }

    /// Move `delta` entries and notify listeners
    ///
    /// Returns `None` without notifying when the target is out of range or
    /// `delta` is zero.
    pub fn go(&self, delta: isize) -> Option<String> {
        if delta == 0 {
            return None;
        }
        let target = self.current.get().checked_add_signed(delta)?;
        if target >= self.len() {
            return None;
        }

        self.current.set(target);
        let url = self.current_url();
        trace_log!("history moved {} to '{}'", delta, url);

        // Listeners may push or read history, so release the borrow first
        let listeners = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&url);
        }

        Some(url)
    }

    pub fn can_go_back(&self) -> bool {
        self.current.get() > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current.get() + 1 < self.len()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Never true: there is always a current entry
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Snapshot of all entries, oldest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    pub fn current_index(&self) -> usize {
        self.current.get()
    }

    fn enforce_size_limit(&self) {
        let mut entries = self.entries.borrow_mut();
        if self.max_size > 0 && entries.len() > self.max_size {
            let excess = entries.len() - self.max_size;
            entries.drain(0..excess);
            self.current.set(self.current.get().saturating_sub(excess));
        }
    }
}

impl HistoryBackend for MemoryHistory {
    fn push(&self, url: &str) {
        {
            let mut entries = self.entries.borrow_mut();
            let current = self.current.get();
            entries.truncate(current + 1);
            entries.push(url.to_string());
            self.current.set(current + 1);
        }
        self.enforce_size_limit();
    }

    fn replace(&self, url: &str) {
        let mut entries = self.entries.borrow_mut();
        let current = self.current.get();
        entries[current] = url.to_string();
    }

    fn current_url(&self) -> String {
        self.entries.borrow()[self.current.get()].clone()
    }

    fn on_change(&self, listener: HistoryListener) {
        self.listeners.borrow_mut().push(listener);
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl fmt::Debug for MemoryHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHistory")
            .field("entries", &self.entries.borrow())
            .field("current", &self.current.get())
            .field("max_size", &self.max_size)
            .field("listeners", &self.listeners.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_creation() {
        let history = MemoryHistory::new("/");
        assert_eq!(history.current_url(), "/");
        assert_eq!(history.len(), 1);
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_push() {
        let history = MemoryHistory::new("/");

        history.push("/users");
        assert_eq!(history.current_url(), "/users");
        assert_eq!(history.len(), 2);
        assert!(history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_back_forward() {
        let history = MemoryHistory::new("/");
        history.push("/page1");
        history.push("/page2");

        assert_eq!(history.back().as_deref(), Some("/page1"));
        assert!(history.can_go_back());
        assert!(history.can_go_forward());

        assert_eq!(history.forward().as_deref(), Some("/page2"));
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_truncation_on_push() {
        let history = MemoryHistory::new("/");
        history.push("/page1");
        history.push("/page2");
        history.back();

        history.push("/page3");
        assert_eq!(history.entries(), vec!["/", "/page1", "/page3"]);
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_history_replace() {
        let history = MemoryHistory::new("/");
        history.push("/page1");

        history.replace("/page2?tab=a");
        assert_eq!(history.current_url(), "/page2?tab=a");
        assert_eq!(history.len(), 2);

        history.back();
        assert_eq!(history.current_url(), "/");
    }

    #[test]
    fn test_history_max_size() {
        let history = MemoryHistory::with_max_size("/", 3);

        history.push("/page1");
        history.push("/page2");
        history.push("/page3");
        history.push("/page4");

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_url(), "/page4");

        history.back();
        history.back();
        assert_eq!(history.current_url(), "/page2");
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_go_out_of_range() {
        let history = MemoryHistory::new("/");
        history.push("/a");

        assert!(history.go(-2).is_none());
        assert!(history.go(1).is_none());
        assert!(history.go(0).is_none());
        assert_eq!(history.current_url(), "/a");
    }

    #[test]
    fn test_listeners_fire_only_on_movement() {
        let history = MemoryHistory::new("/");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let sink = seen.clone();
        history.on_change(Rc::new(move |url| sink.borrow_mut().push(url.to_string())));

        history.push("/a");
        history.replace("/b");
        assert!(seen.borrow().is_empty());

        history.back();
        history.forward();
        assert_eq!(*seen.borrow(), vec!["/", "/b"]);
    }

    #[test]
    fn test_listener_can_read_history() {
        let history = Rc::new(MemoryHistory::new("/"));
        history.push("/a");
        let seen = Rc::new(RefCell::new(String::new()));

        let weak = Rc::downgrade(&history);
        let sink = seen.clone();
        history.on_change(Rc::new(move |_| {
            if let Some(history) = weak.upgrade() {
                *sink.borrow_mut() = history.current_url();
            }
        }));

        history.back();
        assert_eq!(*seen.borrow(), "/");
    }
}
