//! Element nodes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use super::selector::AttrSelector;

pub type Listener = Rc<dyn Fn(&ContextMenuEvent)>;

struct Node {
    tag: String,
    attrs: RefCell<Vec<(String, String)>>,
    parent: RefCell<Weak<Node>>,
    children: RefCell<Vec<Element>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Shared handle to a node. Equality is identity.
#[derive(Clone)]
pub struct Element(Rc<Node>);

/// Non-owning handle; does not keep the node alive.
#[derive(Clone)]
pub struct WeakElement(Weak<Node>);

/// A right-click delivered to one element.
pub struct ContextMenuEvent {
    target: Element,
    default_prevented: Cell<bool>,
}

impl ContextMenuEvent {
    pub fn target(&self) -> &Element {
        &self.target
    }

    /// Suppresses the host's own context menu.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Element(Rc::new(Node {
            tag: tag.to_ascii_lowercase(),
            attrs: RefCell::new(Vec::new()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Builder form of `set_attr`.
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of `append_child`.
    pub fn with_child(self, child: Element) -> Self {
        self.append_child(&child);
        self
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.0
            .attrs
            .borrow()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.0
            .attrs
            .borrow()
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        let mut attrs = self.0.attrs.borrow_mut();
        match attrs.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_string(),
            None => attrs.push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    pub fn classes(&self) -> Vec<String> {
        self.attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut classes = self.classes();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.set_attr("class", &classes.join(" "));
        }
    }

    pub fn remove_class(&self, class: &str) {
        let classes = self.classes();
        if classes.iter().any(|c| c == class) {
            let kept: Vec<String> = classes.into_iter().filter(|c| c != class).collect();
            self.set_attr("class", &kept.join(" "));
        }
    }

    pub fn parent(&self) -> Option<Element> {
        self.0.parent.borrow().upgrade().map(Element)
    }

    pub fn children(&self) -> Vec<Element> {
        self.0.children.borrow().clone()
    }

    /// Appends `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Element) {
        child.remove();
        *child.0.parent.borrow_mut() = Rc::downgrade(&self.0);
        self.0.children.borrow_mut().push(child.clone());
    }

    /// Inserts `node` as the next sibling of `self`. No-op for a detached `self`.
    pub fn insert_after(&self, node: &Element) {
        let Some(parent) = self.parent() else {
            return;
        };
        node.remove();
        let mut children = parent.0.children.borrow_mut();
        let idx = children
            .iter()
            .position(|c| c == self)
            .map_or(children.len(), |i| i + 1);
        *node.0.parent.borrow_mut() = Rc::downgrade(&parent.0);
        children.insert(idx, node.clone());
    }

    pub fn next_sibling(&self) -> Option<Element> {
        let parent = self.parent()?;
        let children = parent.0.children.borrow();
        let idx = children.iter().position(|c| c == self)?;
        children.get(idx + 1).cloned()
    }

    /// Detaches `self` from its parent.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.0.children.borrow_mut().retain(|c| c != self);
        }
        *self.0.parent.borrow_mut() = Weak::new();
    }

    pub fn is_connected_to(&self, ancestor: &Element) -> bool {
        let mut cur = Some(self.clone());
        while let Some(el) = cur {
            if &el == ancestor {
                return true;
            }
            cur = el.parent();
        }
        false
    }

    /// `self` or its nearest ancestor matching `selector`.
    pub fn closest(&self, selector: &AttrSelector) -> Option<Element> {
        let mut cur = Some(self.clone());
        while let Some(el) = cur {
            if selector.matches(&el) {
                return Some(el);
            }
            cur = el.parent();
        }
        None
    }

    /// First matching descendant in document order.
    pub fn query_selector(&self, selector: &AttrSelector) -> Option<Element> {
        for child in self.children() {
            if selector.matches(&child) {
                return Some(child);
            }
            if let Some(found) = child.query_selector(selector) {
                return Some(found);
            }
        }
        None
    }

    /// All matching descendants in document order.
    pub fn query_selector_all(&self, selector: &AttrSelector) -> Vec<Element> {
        let mut out = Vec::new();
        self.collect_matches(selector, &mut out);
        out
    }

    fn collect_matches(&self, selector: &AttrSelector, out: &mut Vec<Element>) {
        for child in self.children() {
            if selector.matches(&child) {
                out.push(child.clone());
            }
            child.collect_matches(selector, out);
        }
    }

    pub fn add_context_menu_listener<F>(&self, listener: F)
    where
        F: Fn(&ContextMenuEvent) + 'static,
    {
        self.0.listeners.borrow_mut().push(Rc::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Delivers a right-click to every listener, in registration order.
    pub fn dispatch_context_menu(&self) -> ContextMenuEvent {
        let event = ContextMenuEvent {
            target: self.clone(),
            default_prevented: Cell::new(false),
        };
        // Listeners may touch this element; don't hold the borrow across calls.
        let listeners: Vec<Listener> = self.0.listeners.borrow().clone();
        for listener in listeners {
            listener(&event);
        }
        event
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    pub(super) fn identity(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.0.tag)?;
        for (k, v) in self.0.attrs.borrow().iter() {
            write!(f, " {}=\"{}\"", k, v)?;
        }
        write!(f, ">")
    }
}

impl WeakElement {
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }

    /// Stable while this handle exists: the allocation outlives the node.
    pub(super) fn identity(&self) -> usize {
        Weak::as_ptr(&self.0) as usize
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(el) => write!(f, "WeakElement({:?})", el),
            None => write!(f, "WeakElement(<dropped>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> (Element, Element, Element) {
        let root = Element::new("div").with_attr("role", "link");
        let inner = Element::new("span");
        let img = Element::new("img").with_attr("src", "x");
        root.append_child(&inner);
        inner.append_child(&img);
        (root, inner, img)
    }

    #[test]
    fn closest_includes_self_and_ancestors() {
        let (root, _inner, img) = tree();
        assert_eq!(img.closest(&AttrSelector::tag("img")), Some(img.clone()));
        assert_eq!(img.closest(&AttrSelector::any().equals("role", "link")), Some(root));
        assert_eq!(img.closest(&AttrSelector::tag("a")), None);
    }

    #[test]
    fn insert_after_and_remove() {
        let (_root, inner, img) = tree();
        let marker = Element::new("div");
        img.insert_after(&marker);
        assert_eq!(img.next_sibling(), Some(marker.clone()));
        assert_eq!(marker.parent(), Some(inner.clone()));
        marker.remove();
        assert_eq!(inner.children().len(), 1);
        assert!(marker.parent().is_none());
    }

    #[test]
    fn class_list_edits() {
        let el = Element::new("div").with_attr("class", "a  b");
        el.add_class("c");
        el.add_class("a");
        assert_eq!(el.classes(), vec!["a", "b", "c"]);
        el.remove_class("b");
        assert!(!el.has_class("b"));
        assert_eq!(el.attr("class").as_deref(), Some("a c"));
    }

    #[test]
    fn dispatch_reaches_listeners_and_prevents_default() {
        let (_root, _inner, img) = tree();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        img.add_context_menu_listener(move |ev| {
            ev.prevent_default();
            h.set(h.get() + 1);
        });
        let ev = img.dispatch_context_menu();
        assert!(ev.default_prevented());
        assert_eq!(ev.target(), &img);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn detached_node_is_reclaimed() {
        let (root, inner, img) = tree();
        let weak = img.downgrade();
        drop(img);
        assert!(weak.is_alive());
        inner.remove();
        drop(inner);
        assert!(!weak.is_alive());
        assert!(root.children().is_empty());
    }
}
