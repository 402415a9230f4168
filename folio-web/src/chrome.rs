//! Page chrome hosts: sidebar, nav highlight, back-to-top, reveal-on-scroll,
//! footer year and the contact form.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use folio_core::chrome::reveal::{REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD};
use folio_core::chrome::{
    footer_year, BackToTop, NavHighlighter, RevealStyle, RevealTracker, SectionBounds, Sidebar,
};
use folio_core::config::{ContactSettings, PageSettings};
use folio_core::ContactMessage;
use gloo::events::EventListener;
use tracing::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, ScrollBehavior,
    ScrollToOptions, Window,
};

use crate::dom;

const OPEN_CLASS: &str = "sidebar-open";

// ── Sidebar ──────────────────────────────────────────────────────────

/// Menu toggle, sidebar links and overlay. Open state lives on `<body>`.
pub fn install_sidebar(
    window: &Window,
    document: &Document,
    settings: &PageSettings,
) -> Vec<EventListener> {
    let Some(body) = document.body() else {
        return Vec::new();
    };
    let toggle: Option<Element> = dom::query(document, ".menu-toggle");
    let state = Rc::new(RefCell::new(Sidebar::new(settings.sidebar_collapse_px)));
    let show = {
        let toggle = toggle.clone();
        Rc::new(move |open: bool| {
            dom::toggle_class(&body, OPEN_CLASS, open);
            if let Some(toggle) = &toggle {
                let _ = toggle.set_attribute("aria-expanded", dom::bool_attr(open));
            }
        })
    };

    let mut listeners = Vec::new();
    if let Some(toggle) = &toggle {
        let state = Rc::clone(&state);
        let show = Rc::clone(&show);
        listeners.push(EventListener::new(toggle, "click", move |_event: &Event| {
            let open = state.borrow_mut().toggle();
            show(open);
        }));
    }
    for link in dom::query_all::<Element>(document, ".sidebar-link") {
        let state = Rc::clone(&state);
        let show = Rc::clone(&show);
        let window = window.clone();
        listeners.push(EventListener::new(&link, "click", move |_event: &Event| {
            let open = state.borrow_mut().link_clicked(dom::viewport_width(&window));
            show(open);
        }));
    }
    if let Some(overlay) = dom::query::<Element>(document, ".sidebar-overlay") {
        let state = Rc::clone(&state);
        let show = Rc::clone(&show);
        listeners.push(EventListener::new(&overlay, "click", move |_event: &Event| {
            let open = state.borrow_mut().overlay_clicked();
            show(open);
        }));
    }
    listeners
}

// ── Scroll: nav highlight and back-to-top ────────────────────────────

struct ScrollChrome {
    window: Window,
    document: Document,
    nav: NavHighlighter,
    back_to_top: BackToTop,
    button: Option<Element>,
}

impl ScrollChrome {
    fn sections(&self) -> Vec<SectionBounds> {
        dom::query_all::<HtmlElement>(&self.document, "section[id]")
            .into_iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect()
    }

    fn refresh(&self) {
        let scroll_y = dom::scroll_y(&self.window);

        let links: Vec<Element> = dom::query_all(&self.document, ".sidebar-link");
        let hrefs: Vec<String> = links
            .iter()
            .map(|link| link.get_attribute("href").unwrap_or_default())
            .collect();
        if let Some(states) = self.nav.link_states(&self.sections(), &hrefs, scroll_y) {
            for (link, active) in links.iter().zip(states) {
                dom::toggle_class(link, "active", active);
            }
        }

        if let Some(button) = &self.button {
            dom::toggle_class(button, "show", self.back_to_top.visible(scroll_y));
        }
    }
}

/// Scroll listener driving the nav highlight and back-to-top visibility.
pub fn install_scroll(
    window: &Window,
    document: &Document,
    settings: &PageSettings,
) -> Vec<EventListener> {
    let chrome = Rc::new(ScrollChrome {
        window: window.clone(),
        document: document.clone(),
        nav: NavHighlighter::new(settings.nav_offset_px),
        back_to_top: BackToTop::new(settings.back_to_top_px),
        button: dom::query(document, ".back-to-top"),
    });
    chrome.refresh();

    let mut listeners = Vec::new();
    let scrolled = Rc::clone(&chrome);
    listeners.push(EventListener::new(window, "scroll", move |_event: &Event| {
        scrolled.refresh();
    }));

    if let Some(button) = &chrome.button {
        let window = window.clone();
        listeners.push(EventListener::new(button, "click", move |_event: &Event| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }));
    }
    listeners
}

// ── Reveal on scroll ─────────────────────────────────────────────────

/// Keeps the intersection observer and its callback alive.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

fn set_reveal(element: &HtmlElement, style: RevealStyle) {
    dom::set_style(element, "opacity", style.opacity);
    dom::set_style(element, "transform", style.transform);
}

/// Hide every reveal target and show each on its first intersection.
pub fn install_reveal(document: &Document) -> Option<Reveal> {
    let targets: Vec<HtmlElement> = dom::query_all(document, REVEAL_SELECTOR);
    if targets.is_empty() {
        return None;
    }

    let tracker = RefCell::new(RevealTracker::new());
    let observed = targets.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_value: &JsValue = target.as_ref();
                let Some(index) = observed
                    .iter()
                    .position(|el| AsRef::<JsValue>::as_ref(el) == target_value)
                else {
                    continue;
                };
                if tracker.borrow_mut().observe(index, entry.is_intersecting()) {
                    set_reveal(&observed[index], RevealStyle::SHOWN);
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = match IntersectionObserver::new_with_options(
        callback.as_ref().unchecked_ref(),
        &options,
    ) {
        Ok(observer) => observer,
        Err(err) => {
            warn!(?err, "IntersectionObserver unavailable, reveal not installed");
            return None;
        }
    };

    for target in &targets {
        set_reveal(target, RevealStyle::HIDDEN);
        dom::set_style(target, "transition", RevealStyle::TRANSITION);
        observer.observe(target);
    }
    debug!(count = targets.len(), "reveal targets observed");
    Some(Reveal {
        observer,
        _callback: callback,
    })
}

// ── Footer year ──────────────────────────────────────────────────────

pub fn install_footer_year(document: &Document) {
    let Some(year) = document.get_element_by_id("year") else {
        return;
    };
    let now = js_sys::Date::new_0();
    let Some(today) =
        NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
    else {
        return;
    };
    year.set_text_content(Some(&footer_year(today).to_string()));
}

// ── Contact form ─────────────────────────────────────────────────────

/// `#contactForm` submit opens the visitor's mail client instead of posting.
pub fn install_contact(
    window: &Window,
    document: &Document,
    settings: &ContactSettings,
) -> Option<EventListener> {
    let form: HtmlFormElement = dom::query(document, "#contactForm")?;
    let window = window.clone();
    let document = document.clone();
    let recipient = settings.recipient.clone();
    let target = form.clone();
    Some(EventListener::new(&target, "submit", move |event: &Event| {
        event.prevent_default();
        let message = ContactMessage::new(
            field(&document, &form, "name"),
            field(&document, &form, "email"),
            field(&document, &form, "subject"),
            field(&document, &form, "message"),
        );
        let uri = message.mailto(&recipient);
        if let Err(err) = window.location().set_href(&uri) {
            warn!(?err, "mail handoff failed");
            return;
        }
        info!("contact form handed to mail client");
        form.reset();
    }))
}

/// Where a contact field is looked for, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FieldLookup {
    /// `document.getElementById(field)`, the markup the page ships with.
    Id(&'static str),
    /// `[name="field"]` inside the form.
    Name(String),
}

fn field_lookups(field: &'static str) -> [FieldLookup; 2] {
    [
        FieldLookup::Id(field),
        FieldLookup::Name(format!("[name=\"{field}\"]")),
    ]
}

/// Value of the contact field, by id first and then by name inside `form`;
/// empty when neither is found.
fn field(document: &Document, form: &HtmlFormElement, name: &'static str) -> String {
    field_lookups(name)
        .iter()
        .find_map(|lookup| match lookup {
            FieldLookup::Id(id) => document.get_element_by_id(id),
            FieldLookup::Name(selector) => form.query_selector(selector).ok().flatten(),
        })
        .map(|element| control_value(&element))
        .unwrap_or_default()
}

fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_fields_resolve_by_id_first() {
        assert_eq!(
            field_lookups("email"),
            [
                FieldLookup::Id("email"),
                FieldLookup::Name("[name=\"email\"]".to_string()),
            ]
        );
    }
}
