//! Views and the renderer seam
//!
//! A route's render function returns a [`View`]: either a markup string or a
//! small node tree. The router hands it to a [`ViewRenderer`], which owns the
//! actual page. Whether that renderer diffs or replaces wholesale is its own
//! business.

use crate::error::RenderError;
use crate::trace_log;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::fmt::Write as _;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Output of a route's render function
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Empty,
    /// Text content, escaped on output
    Text(String),
    /// Trusted markup, emitted verbatim
    Markup(String),
    Element(Element),
    Fragment(Vec<View>),
}

impl View {
    pub fn text(text: impl Into<String>) -> Self {
        View::Text(text.into())
    }

    /// Raw markup. The caller is responsible for escaping anything untrusted.
    pub fn markup(markup: impl Into<String>) -> Self {
        View::Markup(markup.into())
    }

    /// Start building an element
    pub fn element(tag: impl Into<String>) -> Element {
        Element::new(tag)
    }

    pub fn fragment(children: impl IntoIterator<Item = View>) -> Self {
        View::Fragment(children.into_iter().collect())
    }

    /// Serialize to HTML
    ///
    /// ```
    /// use purnav::View;
    ///
    /// let view: View = View::element("a")
    ///     .attr("href", "/search?q=a&b")
    ///     .child(View::text("<go>"))
    ///     .into();
    ///
    /// assert_eq!(view.to_markup(), r#"<a href="/search?q=a&amp;b">&lt;go&gt;</a>"#);
    /// ```
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            View::Empty => {}
            View::Text(text) => out.push_str(&html_escape::encode_text(text)),
            View::Markup(markup) => out.push_str(markup),
            View::Element(element) => element.write_markup(out),
            View::Fragment(children) => {
                for child in children {
                    child.write_markup(out);
                }
            }
        }
    }
}

impl From<Element> for View {
    fn from(element: Element) -> Self {
        View::Element(element)
    }
}

impl From<&str> for View {
    fn from(text: &str) -> Self {
        View::Text(text.to_string())
    }
}

impl From<String> for View {
    fn from(text: String) -> Self {
        View::Text(text)
    }
}

/// A node in a view tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<View>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. An empty value renders as a bare attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<View>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(children);
        self
    }

    fn write_markup(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attributes {
            if value.is_empty() {
                let _ = write!(out, " {}", name);
            } else {
                let _ = write!(
                    out,
                    " {}=\"{}\"",
                    name,
                    html_escape::encode_double_quoted_attribute(value)
                );
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_markup(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// Materializes views into the visible page
pub trait ViewRenderer {
    /// Replace (or reconcile) the content of `target` with `view`
    fn render(&self, target: &str, view: View) -> Result<(), RenderError>;
}

/// Full-replace renderer that keeps serialized markup per mount target
///
/// Useful headless and in tests. Targets must be declared up front; rendering
/// into an unknown target fails the same way a missing DOM node would.
///
/// ```
/// use purnav::{MarkupRenderer, View, ViewRenderer};
///
/// let renderer = MarkupRenderer::new(["#app"]);
/// renderer.render("#app", View::markup("<p>hi</p>")).unwrap();
///
/// assert_eq!(renderer.content("#app").as_deref(), Some("<p>hi</p>"));
/// assert!(renderer.render("#missing", View::Empty).is_err());
/// ```
#[derive(Debug, Default)]
pub struct MarkupRenderer {
    targets: RefCell<IndexMap<String, String>>,
    renders: RefCell<Vec<String>>,
}

impl MarkupRenderer {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: RefCell::new(
                targets
                    .into_iter()
                    .map(|target| (target.into(), String::new()))
                    .collect(),
            ),
            renders: RefCell::new(Vec::new()),
        }
    }

    /// Current content of a target
    pub fn content(&self, target: &str) -> Option<String> {
        self.targets.borrow().get(target).cloned()
    }

    /// Every markup string rendered so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.renders.borrow().clone()
    }

    pub fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }
}

impl ViewRenderer for MarkupRenderer {
    fn render(&self, target: &str, view: View) -> Result<(), RenderError> {
        let mut targets = self.targets.borrow_mut();
        let Some(slot) = targets.get_mut(target) else {
            return Err(RenderError::new(target, "mount target does not exist"));
        };

        let markup = view.to_markup();
        trace_log!("rendering {} bytes into '{}'", markup.len(), target);
        slot.clone_from(&markup);
        self.renders.borrow_mut().push(markup);
        Ok(())
    }
}
