//! Gallery slideshow host: one per `.gallery-multi` container.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::config::GallerySettings;
use folio_core::{GalleryEffect, GalleryEvent, GallerySlider};
use gloo::events::EventListener;
use tracing::debug;
use web_sys::{Document, Element, Event};

use crate::dom;
use crate::timers::{OnFire, TimerHost};

pub const CONTAINER_SELECTOR: &str = ".gallery-multi";
const SLIDE_SELECTOR: &str = ".gallery-slide";
const DOT_SELECTOR: &str = ".dot";
const ACTIVE: &str = "active";

pub struct GalleryHost {
    gallery: RefCell<GallerySlider>,
    root: Element,
    slides: Vec<Element>,
    dots: Vec<Element>,
    timers: TimerHost,
    listeners: RefCell<Vec<EventListener>>,
}

impl GalleryHost {
    /// Mount every gallery on the page. Containers without slides are skipped.
    pub fn mount_all(document: &Document, settings: &GallerySettings) -> Vec<Rc<Self>> {
        dom::query_all::<Element>(document, CONTAINER_SELECTOR)
            .into_iter()
            .filter_map(|root| Self::mount(root, settings))
            .collect()
    }

    fn mount(root: Element, settings: &GallerySettings) -> Option<Rc<Self>> {
        let slides: Vec<Element> = dom::query_all_in(&root, SLIDE_SELECTOR);
        if slides.is_empty() {
            debug!("gallery without slides skipped");
            return None;
        }
        let dots = dom::query_all_in(&root, DOT_SELECTOR);
        let host = Rc::new(Self {
            gallery: RefCell::new(GallerySlider::new(slides.len(), settings.interval())),
            root,
            slides,
            dots,
            timers: TimerHost::new(),
            listeners: RefCell::new(Vec::new()),
        });
        host.install_listeners();
        let effects = host.gallery.borrow_mut().start();
        host.apply(effects);
        Some(host)
    }

    fn dispatch(self: &Rc<Self>, event: GalleryEvent) {
        let effects = self.gallery.borrow_mut().handle(event);
        self.apply(effects);
    }

    fn apply(self: &Rc<Self>, effects: Vec<GalleryEffect>) {
        for effect in effects {
            match effect {
                GalleryEffect::Show(view) => {
                    for (i, slide) in self.slides.iter().enumerate() {
                        dom::toggle_class(slide, ACTIVE, view.is_active(i));
                    }
                    for (i, dot) in self.dots.iter().enumerate() {
                        dom::toggle_class(dot, ACTIVE, view.is_active(i));
                    }
                }
                GalleryEffect::Timer(command) => self.timers.apply(command, &self.on_fire()),
            }
        }
    }

    fn on_fire(self: &Rc<Self>) -> OnFire {
        let weak = Rc::downgrade(self);
        Rc::new(move |token| {
            if let Some(host) = weak.upgrade() {
                host.dispatch(GalleryEvent::Tick(token));
            }
        })
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "click", move |event: &Event| {
            if dom::target_within(event, DOT_SELECTOR) {
                return;
            }
            host.dispatch(GalleryEvent::Click);
        }));

        for (index, dot) in self.dots.iter().enumerate() {
            let host = Rc::clone(self);
            listeners.push(EventListener::new(dot, "click", move |event: &Event| {
                event.stop_propagation();
                host.dispatch(GalleryEvent::DotClick(index));
            }));
        }

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseenter", move |_event: &Event| {
            host.dispatch(GalleryEvent::PointerEnter);
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseleave", move |_event: &Event| {
            host.dispatch(GalleryEvent::PointerLeave);
        }));

        *self.listeners.borrow_mut() = listeners;
    }
}
