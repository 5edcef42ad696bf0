//! Minimal model of the host page: an element tree with attributes, class
//! lists and context-menu listeners.
//!
//! Single-threaded by construction (`Rc`/`RefCell`). Parents are held weakly,
//! so detached subtrees are reclaimed as soon as nothing else holds them.

mod element;
mod html;
mod selector;
mod weak_set;

pub use element::{ContextMenuEvent, Element, Listener, WeakElement};
pub use selector::{AttrCondition, AttrSelector};
pub use weak_set::WeakElementSet;

/// A page: one root element (`<html>`).
#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Element::new("html");
        root.append_child(&Element::new("body"));
        Self { root }
    }

    pub fn from_root(root: Element) -> Self {
        Self { root }
    }

    /// Parses an HTML snapshot. Text and comments are dropped.
    pub fn from_html(source: &str) -> Self {
        Self {
            root: html::element_tree(source),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// First `<body>`, or the root when there is none.
    pub fn body(&self) -> Element {
        self.root
            .query_selector(&AttrSelector::tag("body"))
            .unwrap_or_else(|| self.root.clone())
    }

    /// Matches in document order, the root included.
    pub fn query_selector_all(&self, selector: &AttrSelector) -> Vec<Element> {
        let mut out = Vec::new();
        if selector.matches(&self.root) {
            out.push(self.root.clone());
        }
        out.extend(self.root.query_selector_all(selector));
        out
    }
}
