//! Identity set of elements that does not keep its members alive.

use std::collections::HashMap;

use super::{Element, WeakElement};

/// Membership test + insert, keyed by element identity. Entries for
/// reclaimed elements are pruned lazily; there is no removal API.
#[derive(Debug, Default)]
pub struct WeakElementSet {
    entries: HashMap<usize, WeakElement>,
    prune_at: usize,
}

const MIN_PRUNE_AT: usize = 64;

impl WeakElementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, el: &Element) -> bool {
        self.entries
            .get(&el.identity())
            .and_then(WeakElement::upgrade)
            .is_some_and(|member| &member == el)
    }

    /// Returns false if `el` was already a member.
    pub fn insert(&mut self, el: &Element) -> bool {
        if self.contains(el) {
            return false;
        }
        if self.entries.len() >= self.prune_at {
            self.prune();
            self.prune_at = (self.entries.len() * 2).max(MIN_PRUNE_AT);
        }
        let weak = el.downgrade();
        debug_assert_eq!(weak.identity(), el.identity());
        self.entries.insert(el.identity(), weak);
        true
    }

    /// Members still alive.
    pub fn len(&self) -> usize {
        self.entries.values().filter(|w| w.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prune(&mut self) {
        self.entries.retain(|_, w| w.is_alive());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent() {
        let mut set = WeakElementSet::new();
        let a = Element::new("img");
        let b = Element::new("img");
        assert!(set.insert(&a));
        assert!(!set.insert(&a));
        assert!(set.contains(&a));
        assert!(!set.contains(&b));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn membership_does_not_keep_elements_alive() {
        let mut set = WeakElementSet::new();
        let a = Element::new("img");
        let weak = a.downgrade();
        set.insert(&a);
        drop(a);
        assert!(!weak.is_alive());
        assert!(set.is_empty());
    }

    #[test]
    fn dead_entries_are_pruned() {
        let mut set = WeakElementSet::new();
        for _ in 0..200 {
            let el = Element::new("img");
            set.insert(&el);
        }
        assert!(set.entries.len() < 200);
        assert_eq!(set.len(), 0);
    }
}
