//! Gallery slideshow: auto-advancing, dot-navigable, click-to-advance.
//!
//! One controller per gallery container. The controller owns the index and
//! the auto-advance slot; the host turns [`GalleryEffect`]s into class
//! changes and real timers.
//!
//! Event table:
//!
//! | event          | transition                                   |
//! |----------------|----------------------------------------------|
//! | `Click`        | advance one, reset auto-advance              |
//! | `DotClick(i)`  | show `i`, reset auto-advance                 |
//! | `PointerEnter` | suspend auto-advance                         |
//! | `PointerLeave` | resume auto-advance                          |
//! | `Tick(token)`  | advance one if `token` is the live timer     |
//!
//! An empty gallery is inert: every event is a no-op and no timer starts.

use std::time::Duration;

use tracing::debug;

use crate::timer::{TimerCommand, TimerKind, TimerSlot, TimerToken};

/// Input to the gallery controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEvent {
    /// Click anywhere on the gallery except a dot.
    Click,
    /// Click on the dot at this position.
    DotClick(usize),
    PointerEnter,
    PointerLeave,
    Tick(TimerToken),
}

/// Which slide (and matching dot) is marked active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalleryView {
    pub active: usize,
    pub count: usize,
}

impl GalleryView {
    pub fn is_active(&self, index: usize) -> bool {
        index == self.active
    }
}

/// Output for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEffect {
    Show(GalleryView),
    Timer(TimerCommand),
}

/// Slideshow state for one gallery.
#[derive(Debug, Clone)]
pub struct GallerySlider {
    count: usize,
    current: usize,
    hovered: bool,
    timer: TimerSlot,
}

impl GallerySlider {
    pub fn new(count: usize, interval: Duration) -> Self {
        Self {
            count,
            current: 0,
            hovered: false,
            timer: TimerSlot::interval(TimerKind::AutoPlay, interval),
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_inert(&self) -> bool {
        self.count == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Token of the running auto-advance timer, if any.
    pub fn timer_token(&self) -> Option<TimerToken> {
        self.timer.current()
    }

    /// Initial effects: mark the first slide and start auto-advance.
    pub fn start(&mut self) -> Vec<GalleryEffect> {
        if self.is_inert() {
            return Vec::new();
        }
        vec![
            GalleryEffect::Show(self.view()),
            GalleryEffect::Timer(self.timer.start()),
        ]
    }

    /// Show slide `n`, wrapping in both directions. `None` on an empty gallery.
    pub fn show_slide(&mut self, n: i64) -> Option<GalleryView> {
        if self.is_inert() {
            return None;
        }
        self.current = n.rem_euclid(self.count as i64) as usize;
        Some(self.view())
    }

    /// Advance one slide.
    pub fn next(&mut self) -> Option<GalleryView> {
        self.show_slide(self.current as i64 + 1)
    }

    pub fn handle(&mut self, event: GalleryEvent) -> Vec<GalleryEffect> {
        if self.is_inert() {
            return Vec::new();
        }

        let mut effects = Vec::new();
        match event {
            GalleryEvent::Click => {
                effects.extend(self.next().map(GalleryEffect::Show));
                self.restart(&mut effects);
            }
            GalleryEvent::DotClick(index) => {
                if index >= self.count {
                    return effects;
                }
                effects.extend(self.show_slide(index as i64).map(GalleryEffect::Show));
                self.restart(&mut effects);
            }
            GalleryEvent::PointerEnter => {
                self.hovered = true;
                if let Some(cmd) = self.timer.cancel() {
                    effects.push(GalleryEffect::Timer(cmd));
                }
            }
            GalleryEvent::PointerLeave => {
                self.hovered = false;
                effects.push(GalleryEffect::Timer(self.timer.start()));
            }
            GalleryEvent::Tick(token) => {
                if self.timer.accept(token) {
                    effects.extend(self.next().map(GalleryEffect::Show));
                }
            }
        }
        debug!(event = ?event, current = self.current, "gallery");
        effects
    }

    /// Reset the idle countdown after a manual interaction. While hovered the
    /// timer stays suspended; leaving restarts it.
    fn restart(&mut self, effects: &mut Vec<GalleryEffect>) {
        if self.hovered {
            return;
        }
        effects.push(GalleryEffect::Timer(self.timer.start()));
    }

    fn view(&self) -> GalleryView {
        GalleryView {
            active: self.current,
            count: self.count,
        }
    }
}
