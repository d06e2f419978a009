//! Document metadata and navigation links
//!
//! After every committed navigation the router updates the title and
//! description, then walks every navigation link in every rendering root and
//! marks the ones pointing at the current path. Roots include isolated
//! subtrees (shadow roots in a browser) so links inside them are not missed.

use crate::params::split_url;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt;

/// Attribute set on the active link alongside the class
pub const ARIA_CURRENT: &str = "aria-current";

/// Opaque handle to a link element inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(pub usize);

/// A navigation link as seen by the active-link pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub id: LinkId,
    /// `href` of the link, or the link attribute's value when it has no `href`
    pub target: String,
}

impl NavLink {
    /// Path of the link target, query and fragment dropped
    pub fn path(&self) -> &str {
        split_url(&self.target).0
    }
}

/// Host document the router reflects navigation into
pub trait Document {
    fn set_title(&self, title: &str);

    fn set_description(&self, description: &str);

    /// Every element carrying `attribute`, across all roots
    fn nav_links(&self, attribute: &str) -> Vec<NavLink>;

    /// Add or remove the active marker (`class` plus `aria-current="page"`)
    fn set_link_active(&self, id: LinkId, active: bool, class: &str);
}

// ============================================================================
// MemoryDocument
// ============================================================================

/// Handle to a rendering root inside a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RootId(usize);

#[derive(Debug, Clone)]
struct LinkNode {
    root: RootId,
    attributes: IndexMap<String, String>,
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
struct RootNode {
    name: String,
    parent: Option<RootId>,
}

#[derive(Debug, Default)]
struct DocumentInner {
    title: String,
    description: String,
    roots: Vec<RootNode>,
    links: Vec<LinkNode>,
}

/// In-memory document with nested roots
///
/// ```
/// use purnav::{Document, MemoryDocument};
///
/// let doc = MemoryDocument::new();
/// let shadow = doc.add_root("user-card", None);
/// let link = doc.add_link_in(shadow, "/users", "data-link");
///
/// doc.set_link_active(link, true, "active");
/// assert!(doc.is_active(link, "active"));
/// assert_eq!(doc.attribute(link, "aria-current").as_deref(), Some("page"));
/// ```
pub struct MemoryDocument {
    inner: RefCell<DocumentInner>,
}

impl MemoryDocument {
    /// A document with a single top-level root
    pub fn new() -> Self {
        let inner = DocumentInner {
            roots: vec![RootNode {
                name: "document".to_string(),
                parent: None,
            }],
            ..DocumentInner::default()
        };
        Self {
            inner: RefCell::new(inner),
        }
    }

    /// The top-level root
    pub fn root(&self) -> RootId {
        RootId(0)
    }

    /// Attach an isolated root, nested under `parent` (top level when `None`)
    pub fn add_root(&self, name: impl Into<String>, parent: Option<RootId>) -> RootId {
        let mut inner = self.inner.borrow_mut();
        inner.roots.push(RootNode {
            name: name.into(),
            parent: Some(parent.unwrap_or(RootId(0))),
        });
        RootId(inner.roots.len() - 1)
    }

    /// Add a link with an `href` to the top-level root
    pub fn add_link(&self, href: &str, attribute: &str) -> LinkId {
        self.add_link_in(self.root(), href, attribute)
    }

    /// Add a link with an `href` to a specific root
    pub fn add_link_in(&self, root: RootId, href: &str, attribute: &str) -> LinkId {
        let mut attributes = IndexMap::new();
        attributes.insert("href".to_string(), href.to_string());
        attributes.insert(attribute.to_string(), String::new());
        self.push_link(root, attributes)
    }

    /// Add an element without `href` whose link attribute holds the target
    pub fn add_attribute_link(&self, root: RootId, attribute: &str, target: &str) -> LinkId {
        let mut attributes = IndexMap::new();
        attributes.insert(attribute.to_string(), target.to_string());
        self.push_link(root, attributes)
    }

    fn push_link(&self, root: RootId, attributes: IndexMap<String, String>) -> LinkId {
        let mut inner = self.inner.borrow_mut();
        inner.links.push(LinkNode {
            root,
            attributes,
            classes: Vec::new(),
        });
        LinkId(inner.links.len() - 1)
    }

    pub fn title(&self) -> String {
        self.inner.borrow().title.clone()
    }

    pub fn description(&self) -> String {
        self.inner.borrow().description.clone()
    }

    pub fn is_active(&self, id: LinkId, class: &str) -> bool {
        self.inner
            .borrow()
            .links
            .get(id.0)
            .is_some_and(|link| link.classes.iter().any(|c| c == class))
    }

    pub fn attribute(&self, id: LinkId, name: &str) -> Option<String> {
        self.inner
            .borrow()
            .links
            .get(id.0)
            .and_then(|link| link.attributes.get(name).cloned())
    }

    /// Name of a root and how deeply it is nested
    pub fn root_info(&self, id: RootId) -> Option<(String, usize)> {
        let inner = self.inner.borrow();
        let node = inner.roots.get(id.0)?;
        let mut depth = 0;
        let mut parent = node.parent;
        while let Some(p) = parent {
            depth += 1;
            parent = inner.roots.get(p.0).and_then(|r| r.parent);
        }
        Some((node.name.clone(), depth))
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    fn set_title(&self, title: &str) {
        self.inner.borrow_mut().title = title.to_string();
    }

    fn set_description(&self, description: &str) {
        self.inner.borrow_mut().description = description.to_string();
    }

    fn nav_links(&self, attribute: &str) -> Vec<NavLink> {
        let inner = self.inner.borrow();

        // Walk roots in creation order so nested roots follow their parents
        let mut links = Vec::new();
        for root in 0..inner.roots.len() {
            for (index, link) in inner.links.iter().enumerate() {
                if link.root != RootId(root) {
                    continue;
                }
                let Some(value) = link.attributes.get(attribute) else {
                    continue;
                };
                let target = link
                    .attributes
                    .get("href")
                    .cloned()
                    .unwrap_or_else(|| value.clone());
                links.push(NavLink {
                    id: LinkId(index),
                    target,
                });
            }
        }
        links
    }

    fn set_link_active(&self, id: LinkId, active: bool, class: &str) {
        let mut inner = self.inner.borrow_mut();
        let Some(link) = inner.links.get_mut(id.0) else {
            return;
        };

        link.classes.retain(|c| c != class);
        if active {
            link.classes.push(class.to_string());
            link.attributes
                .insert(ARIA_CURRENT.to_string(), "page".to_string());
        } else {
            link.attributes.shift_remove(ARIA_CURRENT);
        }
    }
}

impl fmt::Debug for MemoryDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryDocument")
            .field("title", &inner.title)
            .field("roots", &inner.roots.len())
            .field("links", &inner.links.len())
            .finish()
    }
}
