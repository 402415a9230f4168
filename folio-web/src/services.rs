//! Services carousel host.
//!
//! Measures the page, turns mouse, touch, keyboard and resize input into
//! [`ServicesEvent`]s and writes the controller's effects back to the track,
//! dots, arrow buttons and cursor.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::config::ServicesSettings;
use folio_core::services::{layout, ArrowKey, TrackRender};
use folio_core::{ServicesEffect, ServicesEvent, ServicesSlider, Viewport};
use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

use crate::dom;
use crate::timers::{OnFire, TimerHost};

const SLIDER_SELECTOR: &str = ".services-slider";
const TRACK_SELECTOR: &str = ".services-track";
const CARD_SELECTOR: &str = ".service-card";
const DOT_SELECTOR: &str = ".slider-dot";
const PREV_SELECTOR: &str = ".prev-btn";
const NEXT_SELECTOR: &str = ".next-btn";

const EASED: &str = "transform 0.5s cubic-bezier(0.4, 0, 0.2, 1)";
const MUTED_OPACITY: &str = "0.3";

pub struct ServicesHost {
    slider: RefCell<ServicesSlider>,
    window: Window,
    document: Document,
    root: HtmlElement,
    track: HtmlElement,
    cards: Vec<HtmlElement>,
    dots: Vec<HtmlElement>,
    prev: Option<HtmlElement>,
    next: Option<HtmlElement>,
    fallback_gap: f64,
    timers: TimerHost,
    listeners: RefCell<Vec<EventListener>>,
}

impl ServicesHost {
    /// Mount the slider. `None` when the slider, track or cards are missing.
    pub fn mount(
        window: &Window,
        document: &Document,
        settings: &ServicesSettings,
    ) -> Option<Rc<Self>> {
        let Some(root) = dom::query::<HtmlElement>(document, SLIDER_SELECTOR) else {
            warn!("no services slider on this page, not installed");
            return None;
        };
        let Some(track) = dom::query::<HtmlElement>(document, TRACK_SELECTOR) else {
            warn!("services slider has no track, not installed");
            return None;
        };
        let cards: Vec<HtmlElement> = dom::query_all(document, CARD_SELECTOR);
        if cards.is_empty() {
            warn!("services slider has no cards, not installed");
            return None;
        }
        let dots: Vec<HtmlElement> = dom::query_all(document, DOT_SELECTOR);

        let viewport = measure(window, &track, &cards, settings.fallback_gap_px);

        let host = Rc::new(Self {
            slider: RefCell::new(ServicesSlider::new(
                cards.len(),
                dots.len(),
                viewport,
                settings.clone(),
            )),
            window: window.clone(),
            document: document.clone(),
            root,
            track,
            cards,
            dots,
            prev: dom::query(document, PREV_SELECTOR),
            next: dom::query(document, NEXT_SELECTOR),
            fallback_gap: settings.fallback_gap_px,
            timers: TimerHost::new(),
            listeners: RefCell::new(Vec::new()),
        });
        host.install_listeners();
        let effects = host.slider.borrow_mut().start();
        host.apply(effects);
        Some(host)
    }

    fn measure(&self) -> Viewport {
        measure(&self.window, &self.track, &self.cards, self.fallback_gap)
    }

    /// Every event except a resize (which carries its own measurement) runs
    /// against freshly measured geometry.
    fn dispatch(self: &Rc<Self>, event: ServicesEvent) {
        if remeasures(&event) {
            let viewport = self.measure();
            self.slider.borrow_mut().set_viewport(viewport);
        }
        let effects = self.slider.borrow_mut().handle(event);
        self.apply(effects);
    }

    fn is_dragging(&self) -> bool {
        self.slider.borrow().drag_state().is_active()
    }

    fn apply(self: &Rc<Self>, effects: Vec<ServicesEffect>) {
        for effect in effects {
            match effect {
                ServicesEffect::Render(render) => self.render(&render),
                ServicesEffect::Preview { offset } => {
                    dom::set_style(&self.track, "transition", "none");
                    dom::set_style(&self.track, "transform", &translate_x(offset));
                }
                ServicesEffect::Cursor(cursor) => {
                    dom::set_style(&self.root, "cursor", cursor.css());
                }
                ServicesEffect::Timer(command) => self.timers.apply(command, &self.on_fire()),
            }
        }
    }

    fn render(&self, render: &TrackRender) {
        let transition = if render.animated { EASED } else { "none" };
        dom::set_style(&self.track, "transition", transition);
        dom::set_style(&self.track, "transform", &translate_x(render.offset));

        for (dot, state) in self.dots.iter().zip(&render.dots) {
            dom::set_style(dot, "display", if state.visible { "block" } else { "none" });
            dom::toggle_class(dot, "active", state.active);
        }
        if let Some(prev) = &self.prev {
            dom::set_style(prev, "opacity", opacity(render.prev_muted));
        }
        if let Some(next) = &self.next {
            dom::set_style(next, "opacity", opacity(render.next_muted));
        }
    }

    fn on_fire(self: &Rc<Self>) -> OnFire {
        let weak = Rc::downgrade(self);
        Rc::new(move |token| {
            if let Some(host) = weak.upgrade() {
                host.dispatch(ServicesEvent::Tick(token));
            }
        })
    }

    // ── Listeners ──────────────────────────────────────────────────────

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        self.install_buttons(&mut listeners);
        self.install_pointer(&mut listeners);
        self.install_touch(&mut listeners);

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.document, "keydown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if let Some(key) = arrow_key(&event.key()) {
                host.dispatch(ServicesEvent::Key(key));
            }
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.window, "resize", move |_event: &Event| {
            let viewport = host.measure();
            host.dispatch(ServicesEvent::Resize(viewport));
        }));

        *self.listeners.borrow_mut() = listeners;
    }

    fn install_buttons(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let buttons = [
            (self.prev.as_ref(), ServicesEvent::Prev),
            (self.next.as_ref(), ServicesEvent::Next),
        ];
        for (button, nav) in buttons {
            let Some(button) = button else {
                continue;
            };
            let host = Rc::clone(self);
            listeners.push(EventListener::new(button, "click", move |event: &Event| {
                event.prevent_default();
                host.dispatch(nav);
            }));
        }

        for (index, dot) in self.dots.iter().enumerate() {
            let host = Rc::clone(self);
            listeners.push(EventListener::new(dot, "click", move |_event: &Event| {
                host.dispatch(ServicesEvent::Dot(index));
            }));
        }
    }

    fn install_pointer(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mousedown", move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            host.dispatch(ServicesEvent::PointerDown(f64::from(event.page_x())));
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.root,
            "mousemove",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                if !host.is_dragging() {
                    return;
                }
                event.prevent_default();
                host.dispatch(ServicesEvent::PointerMove(f64::from(event.page_x())));
            },
        ));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseup", move |_event: &Event| {
            host.dispatch(ServicesEvent::PointerUp);
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseenter", move |_event: &Event| {
            host.dispatch(ServicesEvent::PointerEnter);
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "mouseleave", move |_event: &Event| {
            host.dispatch(ServicesEvent::PointerLeave);
        }));
    }

    fn install_touch(self: &Rc<Self>, listeners: &mut Vec<EventListener>) {
        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "touchstart", move |event: &Event| {
            let Some(x) = touch_x(event) else {
                return;
            };
            host.dispatch(ServicesEvent::PointerDown(x));
        }));

        let host = Rc::clone(self);
        listeners.push(EventListener::new_with_options(
            &self.root,
            "touchmove",
            EventListenerOptions {
                phase: EventListenerPhase::Bubble,
                passive: false,
            },
            move |event: &Event| {
                if !host.is_dragging() {
                    return;
                }
                let Some(x) = touch_x(event) else {
                    return;
                };
                event.prevent_default();
                host.dispatch(ServicesEvent::PointerMove(x));
            },
        ));

        let host = Rc::clone(self);
        listeners.push(EventListener::new(&self.root, "touchend", move |_event: &Event| {
            host.dispatch(ServicesEvent::PointerUp);
        }));
    }
}

/// Window width, first card width and the track's computed gap.
fn measure(
    window: &Window,
    track: &HtmlElement,
    cards: &[HtmlElement],
    fallback_gap: f64,
) -> Viewport {
    let width = dom::viewport_width(window);
    let card_width = cards
        .first()
        .map(|card| f64::from(card.offset_width()))
        .unwrap_or(0.0);
    let gap = window
        .get_computed_style(track)
        .ok()
        .flatten()
        .and_then(|style| style.get_property_value("gap").ok())
        .map(|css| layout::parse_gap(&css, fallback_gap))
        .unwrap_or(fallback_gap);
    Viewport::new(width, card_width, gap)
}

/// First touch point's client x.
fn touch_x(event: &Event) -> Option<f64> {
    let event = event.dyn_ref::<TouchEvent>()?;
    let touch = event.touches().get(0)?;
    Some(f64::from(touch.client_x()))
}

fn remeasures(event: &ServicesEvent) -> bool {
    !matches!(event, ServicesEvent::Resize(_))
}

pub(crate) fn arrow_key(key: &str) -> Option<ArrowKey> {
    match key {
        "ArrowLeft" => Some(ArrowKey::Left),
        "ArrowRight" => Some(ArrowKey::Right),
        _ => None,
    }
}

/// Track transform for a leftward offset. Negative offsets (dragging right
/// from the first card) move the track right.
fn translate_x(offset: f64) -> String {
    format!("translateX({}px)", -offset)
}

fn opacity(muted: bool) -> &'static str {
    if muted {
        MUTED_OPACITY
    } else {
        "1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_horizontal_arrows_navigate() {
        assert_eq!(arrow_key("ArrowLeft"), Some(ArrowKey::Left));
        assert_eq!(arrow_key("ArrowRight"), Some(ArrowKey::Right));
        assert_eq!(arrow_key("ArrowUp"), None);
        assert_eq!(arrow_key("a"), None);
    }

    #[test]
    fn input_events_use_live_geometry() {
        assert!(remeasures(&ServicesEvent::Next));
        assert!(remeasures(&ServicesEvent::Dot(2)));
        assert!(remeasures(&ServicesEvent::PointerMove(12.0)));
        assert!(!remeasures(&ServicesEvent::Resize(Viewport::new(1024.0, 360.0, 16.0))));
    }

    #[test]
    fn transform_moves_track_left() {
        assert_eq!(translate_x(416.0), "translateX(-416px)");
        assert_eq!(translate_x(-60.0), "translateX(60px)");
        assert_eq!(translate_x(12.5), "translateX(-12.5px)");
    }

    #[test]
    fn muted_buttons_dim() {
        assert_eq!(opacity(true), "0.3");
        assert_eq!(opacity(false), "1");
    }
}
