//! HTML snapshot -> element tree, via `scraper`.

use scraper::{ElementRef, Html};

use super::Element;

pub(super) fn element_tree(source: &str) -> Element {
    let html = Html::parse_document(source);
    convert(html.root_element())
}

fn convert(src: ElementRef<'_>) -> Element {
    let el = Element::new(src.value().name());
    for (name, value) in src.value().attrs() {
        el.set_attr(name, value);
    }
    for child in src.children().filter_map(ElementRef::wrap) {
        el.append_child(&convert(child));
    }
    el
}
