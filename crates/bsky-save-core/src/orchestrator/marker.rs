//! Transient "in progress"/"done" marker next to a thumbnail.

use crate::dom::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerClasses {
    pub placeholder: String,
    pub downloading: String,
    pub done: String,
    /// Set on the thumbnail's parent while the placeholder exists.
    pub full_height: String,
}

impl Default for MarkerClasses {
    fn default() -> Self {
        Self {
            placeholder: "bsky-save-placeholder".to_string(),
            downloading: "bsky-save-downloading".to_string(),
            done: "bsky-save-done".to_string(),
            full_height: "bsky-save-full-height".to_string(),
        }
    }
}

/// Placeholder node inserted after a thumbnail. Dropping it removes the node
/// and the parent's full-height class.
pub struct ProgressMarker {
    placeholder: Element,
    parent: Option<Element>,
    classes: MarkerClasses,
}

impl ProgressMarker {
    pub fn attach(thumbnail: &Element, classes: &MarkerClasses) -> Self {
        let placeholder = Element::new("div");
        placeholder.add_class(&classes.placeholder);
        placeholder.add_class(&classes.downloading);
        thumbnail.insert_after(&placeholder);
        let parent = thumbnail.parent();
        if let Some(p) = &parent {
            p.add_class(&classes.full_height);
        }
        Self {
            placeholder,
            parent,
            classes: classes.clone(),
        }
    }

    pub fn placeholder(&self) -> &Element {
        &self.placeholder
    }

    pub fn done(&self) {
        self.placeholder.remove_class(&self.classes.downloading);
        self.placeholder.add_class(&self.classes.done);
    }
}

impl Drop for ProgressMarker {
    fn drop(&mut self) {
        self.placeholder.remove();
        if let Some(p) = &self.parent {
            p.remove_class(&self.classes.full_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lifecycle() {
        let parent = Element::new("div");
        let img = Element::new("img");
        parent.append_child(&img);
        let classes = MarkerClasses::default();

        let marker = ProgressMarker::attach(&img, &classes);
        assert_eq!(img.next_sibling().as_ref(), Some(marker.placeholder()));
        assert!(marker.placeholder().has_class(&classes.downloading));
        assert!(parent.has_class(&classes.full_height));

        marker.done();
        assert!(marker.placeholder().has_class(&classes.done));
        assert!(!marker.placeholder().has_class(&classes.downloading));

        drop(marker);
        assert_eq!(parent.children(), vec![img]);
        assert!(!parent.has_class(&classes.full_height));
    }
}
