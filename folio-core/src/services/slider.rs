//! Services carousel controller.
//!
//! Owns the index, the responsive layout, the drag gesture and two timer
//! slots (auto-play interval, resize debounce). Every input goes through
//! [`ServicesSlider::handle`], which returns the effects the host applies.
//!
//! Event table:
//!
//! | event                 | transition                                            |
//! |-----------------------|-------------------------------------------------------|
//! | `Next` / `Key(Right)` | index + 1, wrapping to 0 past `max_index`             |
//! | `Prev` / `Key(Left)`  | index - 1, wrapping to `max_index` below 0            |
//! | `Dot(i)`              | go to `i` if `i <= max_index`, else ignored           |
//! | `PointerDown(x)`      | Idle → Dragging, transition off, auto-play paused     |
//! | `PointerMove(x)`      | live track preview (Dragging only)                    |
//! | `PointerUp`           | Dragging → Idle, swipe or snap back                   |
//! | `PointerEnter`        | auto-play disabled                                    |
//! | `PointerLeave`        | release any drag, auto-play enabled                   |
//! | `Resize(viewport)`    | (re)arm the debounce with the latest measurement      |
//! | `Tick(token)`         | auto-play advance, or settled resize re-layout        |
//!
//! `current_index` is clamped into `[0, max_index]` on every render.

use tracing::{debug, info};

use crate::config::ServicesSettings;
use crate::timer::{TimerCommand, TimerKind, TimerSlot, TimerToken};

use super::drag::{classify, DragState, Swipe};
use super::layout::{self, Viewport};

/// Arrow keys the slider listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Right,
}

/// Input to the services controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServicesEvent {
    Next,
    Prev,
    Dot(usize),
    Key(ArrowKey),
    PointerDown(f64),
    PointerMove(f64),
    PointerUp,
    PointerEnter,
    PointerLeave,
    Resize(Viewport),
    Tick(TimerToken),
}

/// Pointer cursor over the slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    Grab,
    Grabbing,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
        }
    }
}

/// Per-dot presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotState {
    /// Dots past `max_index` are hidden, never removed.
    pub visible: bool,
    pub active: bool,
}

/// Full presentation of the slider after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRender {
    pub index: usize,
    pub max_index: usize,
    pub cards_per_view: usize,
    /// Distance the track is translated left, in pixels.
    pub offset: f64,
    /// Whether the move is eased (false snaps instantly).
    pub animated: bool,
    pub dots: Vec<DotState>,
    /// Previous control shown muted (index is 0). It still wraps when used.
    pub prev_muted: bool,
    /// Next control shown muted (index at `max_index`). It still wraps when used.
    pub next_muted: bool,
}

/// Output for the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ServicesEffect {
    Render(TrackRender),
    /// Unanimated track position during a drag.
    Preview { offset: f64 },
    Cursor(Cursor),
    Timer(TimerCommand),
}

/// Services carousel state for one slider.
#[derive(Debug, Clone)]
pub struct ServicesSlider {
    card_count: usize,
    dot_count: usize,
    current: usize,
    viewport: Viewport,
    pending_viewport: Option<Viewport>,
    cards_per_view: usize,
    autoplay_enabled: bool,
    drag: DragState,
    autoplay: TimerSlot,
    resize: TimerSlot,
    settings: ServicesSettings,
}

impl ServicesSlider {
    pub fn new(
        card_count: usize,
        dot_count: usize,
        viewport: Viewport,
        settings: ServicesSettings,
    ) -> Self {
        let cards_per_view = layout::cards_per_view(viewport.width, settings.breakpoint_px);
        info!(cards = card_count, cards_per_view, "services slider initialized");
        Self {
            card_count,
            dot_count,
            current: 0,
            viewport,
            pending_viewport: None,
            cards_per_view,
            autoplay_enabled: true,
            drag: DragState::Idle,
            autoplay: TimerSlot::interval(TimerKind::AutoPlay, settings.autoplay()),
            resize: TimerSlot::timeout(TimerKind::Resize, settings.resize_debounce()),
            settings,
        }
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn max_index(&self) -> usize {
        layout::max_index(self.card_count, self.cards_per_view)
    }

    pub fn cards_per_view(&self) -> usize {
        self.cards_per_view
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay_enabled
    }

    /// Token of the running auto-play timer, if any.
    pub fn autoplay_token(&self) -> Option<TimerToken> {
        self.autoplay.current()
    }

    /// Token of the pending resize re-layout, if any.
    pub fn resize_token(&self) -> Option<TimerToken> {
        self.resize.current()
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Initial layout (no animation) and auto-play start.
    pub fn start(&mut self) -> Vec<ServicesEffect> {
        let mut effects = vec![
            ServicesEffect::Cursor(Cursor::Grab),
            ServicesEffect::Render(self.update(false)),
        ];
        self.arm_autoplay(&mut effects);
        effects
    }

    /// Show the next page, wrapping to the first.
    pub fn next(&mut self) -> Vec<ServicesEffect> {
        self.step_forward();
        self.navigated()
    }

    /// Show the previous page, wrapping to the last.
    pub fn previous(&mut self) -> Vec<ServicesEffect> {
        self.step_backward();
        self.navigated()
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) -> Vec<ServicesEffect> {
        if index > self.max_index() {
            debug!(index, max_index = self.max_index(), "go_to out of range, ignored");
            return Vec::new();
        }
        self.current = index;
        self.navigated()
    }

    /// Refresh the live geometry without rendering. Navigation and drags use
    /// it straight away and the index is clamped on the next render. A
    /// pending resize still settles with its own unanimated snap.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.cards_per_view =
            layout::cards_per_view(viewport.width, self.settings.breakpoint_px);
    }

    pub fn handle(&mut self, event: ServicesEvent) -> Vec<ServicesEffect> {
        match event {
            ServicesEvent::Next | ServicesEvent::Key(ArrowKey::Right) => self.next(),
            ServicesEvent::Prev | ServicesEvent::Key(ArrowKey::Left) => self.previous(),
            ServicesEvent::Dot(index) => self.go_to(index),
            ServicesEvent::PointerDown(x) => self.drag_start(x),
            ServicesEvent::PointerMove(x) => self.drag_move(x),
            ServicesEvent::PointerUp => self.drag_end(),
            ServicesEvent::PointerEnter => {
                self.autoplay_enabled = false;
                self.autoplay.cancel().map(ServicesEffect::Timer).into_iter().collect()
            }
            ServicesEvent::PointerLeave => {
                let mut effects = self.drag_end();
                self.autoplay_enabled = true;
                self.arm_autoplay(&mut effects);
                effects
            }
            ServicesEvent::Resize(viewport) => {
                self.pending_viewport = Some(viewport);
                vec![ServicesEffect::Timer(self.resize.start())]
            }
            ServicesEvent::Tick(token) => match token.kind {
                TimerKind::AutoPlay if self.autoplay.accept(token) => self.next(),
                TimerKind::Resize if self.resize.accept(token) => self.settle_resize(),
                _ => Vec::new(),
            },
        }
    }

    // ── Drag ───────────────────────────────────────────────────────────

    fn drag_start(&mut self, x: f64) -> Vec<ServicesEffect> {
        self.drag = DragState::begin(x);
        let mut effects = vec![
            ServicesEffect::Cursor(Cursor::Grabbing),
            ServicesEffect::Preview {
                offset: self.viewport.offset(self.current),
            },
        ];
        if let Some(cmd) = self.autoplay.cancel() {
            effects.push(ServicesEffect::Timer(cmd));
        }
        effects
    }

    fn drag_move(&mut self, x: f64) -> Vec<ServicesEffect> {
        match self.drag.update(x) {
            Some(diff) => vec![ServicesEffect::Preview {
                offset: self
                    .viewport
                    .drag_offset(self.current, self.cards_per_view, diff),
            }],
            None => Vec::new(),
        }
    }

    fn drag_end(&mut self) -> Vec<ServicesEffect> {
        let Some(diff) = self.drag.release() else {
            return Vec::new();
        };
        let swipe = classify(diff, self.settings.drag_threshold_px);
        debug!(diff, ?swipe, "drag released");

        match swipe {
            Swipe::Forward => self.step_forward(),
            Swipe::Backward => self.step_backward(),
            Swipe::Cancel => {}
        }
        let mut effects = vec![
            ServicesEffect::Cursor(Cursor::Grab),
            ServicesEffect::Render(self.update(true)),
        ];
        self.arm_autoplay(&mut effects);
        effects
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn step_forward(&mut self) {
        self.current = if self.current < self.max_index() {
            self.current + 1
        } else {
            0
        };
    }

    fn step_backward(&mut self) {
        self.current = if self.current > 0 {
            self.current - 1
        } else {
            self.max_index()
        };
    }

    fn navigated(&mut self) -> Vec<ServicesEffect> {
        let mut effects = vec![ServicesEffect::Render(self.update(true))];
        self.arm_autoplay(&mut effects);
        effects
    }

    fn settle_resize(&mut self) -> Vec<ServicesEffect> {
        if let Some(viewport) = self.pending_viewport.take() {
            self.viewport = viewport;
            self.cards_per_view =
                layout::cards_per_view(viewport.width, self.settings.breakpoint_px);
        }
        vec![ServicesEffect::Render(self.update(false))]
    }

    /// (Re)start the auto-play countdown unless hover has disabled it.
    fn arm_autoplay(&mut self, effects: &mut Vec<ServicesEffect>) {
        if self.autoplay_enabled {
            effects.push(ServicesEffect::Timer(self.autoplay.start()));
        }
    }

    /// Clamp the index and compute the presentation.
    fn update(&mut self, animated: bool) -> TrackRender {
        let max_index = self.max_index();
        self.current = self.current.min(max_index);
        let offset = self.viewport.offset(self.current);

        debug!(
            index = self.current,
            max_index,
            card_width = self.viewport.card_width,
            gap = self.viewport.gap,
            offset,
            cards_per_view = self.cards_per_view,
            total_cards = self.card_count,
            "updating slider"
        );

        let dots = (0..self.dot_count)
            .map(|i| DotState {
                visible: i <= max_index,
                active: i <= max_index && i == self.current,
            })
            .collect();

        TrackRender {
            index: self.current,
            max_index,
            cards_per_view: self.cards_per_view,
            offset,
            animated,
            dots,
            prev_muted: self.current == 0,
            next_muted: self.current >= max_index,
        }
    }
}
