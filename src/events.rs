//! Input events the router may intercept
//!
//! The host translates its native click and keydown events into [`NavEvent`]s
//! and passes them to [`Router::handle_event`](crate::Router::handle_event).
//! The composed path runs from the innermost target outwards and crosses
//! isolated roots, so a link wrapping a custom element is still found.

use indexmap::IndexMap;

/// Primary mouse button
pub const PRIMARY_BUTTON: u16 = 0;

/// Modifier keys held during a click
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click { button: u16, modifiers: Modifiers },
    Key { key: String },
}

/// One element on the composed path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventTarget {
    pub attributes: IndexMap<String, String>,
}

impl EventTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// A click or key press, with its composed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEvent {
    pub kind: EventKind,
    /// Innermost target first
    pub path: Vec<EventTarget>,
    default_prevented: bool,
}

impl NavEvent {
    /// Plain primary-button click
    pub fn click(path: Vec<EventTarget>) -> Self {
        Self {
            kind: EventKind::Click {
                button: PRIMARY_BUTTON,
                modifiers: Modifiers::default(),
            },
            path,
            default_prevented: false,
        }
    }

    pub fn click_with(button: u16, modifiers: Modifiers, path: Vec<EventTarget>) -> Self {
        Self {
            kind: EventKind::Click { button, modifiers },
            path,
            default_prevented: false,
        }
    }

    pub fn key(key: impl Into<String>, path: Vec<EventTarget>) -> Self {
        Self {
            kind: EventKind::Key { key: key.into() },
            path,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Whether this event activates an element the way a plain click would
    ///
    /// Clicks must use the primary button without modifiers and must not have
    /// been handled already. Keys must be Enter or Space.
    pub fn is_activation(&self) -> bool {
        if self.default_prevented {
            return false;
        }
        match &self.kind {
            EventKind::Click { button, modifiers } => {
                *button == PRIMARY_BUTTON && !modifiers.any()
            }
            EventKind::Key { key } => key == "Enter" || key == " ",
        }
    }

    /// Innermost element on the path carrying `attribute`
    pub fn find_target(&self, attribute: &str) -> Option<&EventTarget> {
        self.path.iter().find(|target| target.has_attribute(attribute))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str) -> EventTarget {
        EventTarget::new().attr("href", href).attr("data-link", "")
    }

    #[test]
    fn test_plain_click_activates() {
        assert!(NavEvent::click(vec![link("/")]).is_activation());
    }

    #[test]
    fn test_modified_or_secondary_click_does_not_activate() {
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        assert!(!NavEvent::click_with(0, ctrl, vec![link("/")]).is_activation());
        assert!(!NavEvent::click_with(1, Modifiers::default(), vec![link("/")]).is_activation());
    }

    #[test]
    fn test_prevented_click_does_not_activate() {
        let mut event = NavEvent::click(vec![link("/")]);
        event.prevent_default();
        assert!(event.default_prevented());
        assert!(!event.is_activation());
    }

    #[test]
    fn test_keys() {
        assert!(NavEvent::key("Enter", vec![]).is_activation());
        assert!(NavEvent::key(" ", vec![]).is_activation());
        assert!(!NavEvent::key("Tab", vec![]).is_activation());
    }

    #[test]
    fn test_find_target_walks_outwards() {
        let event = NavEvent::click(vec![
            EventTarget::new().attr("class", "icon"),
            EventTarget::new().attr("class", "label"),
            link("/about"),
        ]);

        let target = event.find_target("data-link").unwrap();
        assert_eq!(target.attribute("href"), Some("/about"));
        assert!(event.find_target("data-action").is_none());
    }
}
