//! Small DOM helpers shared by the page components.
//!
//! Lookups return empty results instead of errors; a missing element means
//! the component that needs it is not installed.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window().and_then(|window| window.document())
}

/// First element matching `selector`, cast to `T`.
pub fn query<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

/// All elements matching `selector`, in document order.
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    document
        .query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

/// All descendants of `parent` matching `selector`.
pub fn query_all_in<T: JsCast>(parent: &Element, selector: &str) -> Vec<T> {
    parent
        .query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

fn collect<T: JsCast>(list: NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

pub fn viewport_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .unwrap_or(0.0)
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Whether the event target sits inside an element matching `selector`.
pub fn target_within(event: &web_sys::Event, selector: &str) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| element.closest(selector).ok().flatten())
        .is_some()
}

pub fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
