//! Property tests for slider invariants.
//!
//! Uses proptest to verify:
//! 1. Gallery wrap: `show_slide(n)` lands on the non-negative residue of `n`
//! 2. Index bounds: `0 <= index <= max_index` after every services event
//! 3. Wrap-around: next at max goes to 0, previous at 0 goes to max
//! 4. Dot rejection: out-of-range dots leave the index unchanged
//! 5. Resize clamp: widening clamps the index down to the new max
//! 6. Single timer: any hover/restart history leaves one acceptable token

use std::time::Duration;

use folio_core::config::ServicesSettings;
use folio_core::gallery::{GalleryEvent, GallerySlider};
use folio_core::services::{ArrowKey, ServicesEvent, ServicesSlider, Viewport};
use proptest::prelude::*;

const NARROW: f64 = 500.0;
const WIDE: f64 = 1024.0;

fn viewport(width: f64) -> Viewport {
    Viewport::new(width, 320.0, 16.0)
}

fn started(cards: usize, width: f64) -> ServicesSlider {
    let mut slider = ServicesSlider::new(cards, cards, viewport(width), ServicesSettings::default());
    slider.start();
    slider
}

// ── Strategies (proptest) ────────────────────────────────────────────

/// Events that can be replayed directly. Timer ticks and settled resizes are
/// injected by the driver below since they need live tokens.
#[derive(Debug, Clone)]
enum Op {
    Event(ServicesEvent),
    Tick,
    ResizeSettled(f64),
    StaleResize(f64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Event(ServicesEvent::Next)),
        Just(Op::Event(ServicesEvent::Prev)),
        Just(Op::Event(ServicesEvent::Key(ArrowKey::Left))),
        Just(Op::Event(ServicesEvent::Key(ArrowKey::Right))),
        (0usize..12).prop_map(|i| Op::Event(ServicesEvent::Dot(i))),
        (-400.0..400.0_f64).prop_map(|x| Op::Event(ServicesEvent::PointerDown(x))),
        (-400.0..400.0_f64).prop_map(|x| Op::Event(ServicesEvent::PointerMove(x))),
        Just(Op::Event(ServicesEvent::PointerUp)),
        Just(Op::Event(ServicesEvent::PointerEnter)),
        Just(Op::Event(ServicesEvent::PointerLeave)),
        Just(Op::Tick),
        (320.0..1600.0_f64).prop_map(Op::ResizeSettled),
        (320.0..1600.0_f64).prop_map(Op::StaleResize),
    ]
}

fn run(slider: &mut ServicesSlider, op: &Op) {
    match op {
        Op::Event(event) => {
            slider.handle(*event);
        }
        Op::Tick => {
            if let Some(token) = slider.autoplay_token() {
                slider.handle(ServicesEvent::Tick(token));
            }
        }
        Op::ResizeSettled(width) => {
            slider.handle(ServicesEvent::Resize(viewport(*width)));
            if let Some(token) = slider.resize_token() {
                slider.handle(ServicesEvent::Tick(token));
            }
        }
        Op::StaleResize(width) => {
            slider.handle(ServicesEvent::Resize(viewport(*width)));
        }
    }
}

// ── 1. Gallery wrap ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn gallery_show_slide_is_euclidean(count in 1usize..20, n in -1000i64..1000) {
        let mut gallery = GallerySlider::new(count, Duration::from_millis(3_500));
        let view = gallery.show_slide(n).unwrap();
        let expected = ((n % count as i64) + count as i64) % count as i64;
        prop_assert_eq!(view.active as i64, expected);
        prop_assert_eq!(gallery.current_index() as i64, expected);
    }
}

// ── 2. Index bounds ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn index_stays_in_bounds(
        cards in 1usize..10,
        start_wide in any::<bool>(),
        ops in prop::collection::vec(arb_op(), 0..60),
    ) {
        let mut slider = started(cards, if start_wide { WIDE } else { NARROW });
        for op in &ops {
            run(&mut slider, op);
            prop_assert!(slider.current_index() <= slider.max_index());
            prop_assert_eq!(
                slider.max_index(),
                cards.saturating_sub(slider.cards_per_view())
            );
        }
    }
}

// ── 3. Wrap-around ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn next_at_max_wraps_to_zero(cards in 1usize..10, wide in any::<bool>()) {
        let mut slider = started(cards, if wide { WIDE } else { NARROW });
        let max = slider.max_index();
        slider.go_to(max);
        slider.next();
        prop_assert_eq!(slider.current_index(), 0);
    }

    #[test]
    fn previous_at_zero_wraps_to_max(cards in 1usize..10, wide in any::<bool>()) {
        let mut slider = started(cards, if wide { WIDE } else { NARROW });
        slider.previous();
        prop_assert_eq!(slider.current_index(), slider.max_index());
    }
}

// ── 4. Dot rejection ─────────────────────────────────────────────────

proptest! {
    #[test]
    fn out_of_range_dot_is_ignored(
        cards in 1usize..10,
        at in 0usize..10,
        beyond in 1usize..50,
    ) {
        let mut slider = started(cards, NARROW);
        slider.go_to(at.min(slider.max_index()));
        let before = slider.current_index();
        let effects = slider.handle(ServicesEvent::Dot(slider.max_index() + beyond));
        prop_assert!(effects.is_empty());
        prop_assert_eq!(slider.current_index(), before);
    }
}

// ── 5. Resize clamp ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn widening_clamps_down(cards in 2usize..10, at in 0usize..10) {
        let mut slider = started(cards, NARROW);
        let old = at.min(slider.max_index());
        slider.go_to(old);

        run(&mut slider, &Op::ResizeSettled(WIDE));

        prop_assert_eq!(slider.cards_per_view(), 2);
        prop_assert_eq!(slider.max_index(), cards - 2);
        prop_assert_eq!(slider.current_index(), old.min(cards - 2));
    }
}

// ── 6. Single timer ──────────────────────────────────────────────────

proptest! {
    /// However often the timer is restarted, a host that never cancels
    /// anything still only gets one acceptable tick out of all it holds.
    #[test]
    fn one_live_autoplay_timer(cycles in 1usize..20, navigations in 0usize..5) {
        let mut slider = started(8, NARROW);
        let mut issued = vec![slider.autoplay_token().unwrap()];
        for _ in 0..cycles {
            slider.handle(ServicesEvent::PointerEnter);
            slider.handle(ServicesEvent::PointerLeave);
            for _ in 0..navigations {
                slider.handle(ServicesEvent::Next);
            }
            issued.push(slider.autoplay_token().unwrap());
        }

        let before = slider.current_index();
        let accepted = issued
            .iter()
            .filter(|t| !slider.handle(ServicesEvent::Tick(**t)).is_empty())
            .count();
        prop_assert_eq!(accepted, 1);
        prop_assert_eq!(slider.current_index(), (before + 1) % 8);
    }

    #[test]
    fn gallery_one_live_timer(cycles in 1usize..20) {
        let mut gallery = GallerySlider::new(4, Duration::from_millis(3_500));
        gallery.start();
        let mut issued = vec![gallery.timer_token().unwrap()];
        for _ in 0..cycles {
            gallery.handle(GalleryEvent::PointerEnter);
            gallery.handle(GalleryEvent::PointerLeave);
            gallery.handle(GalleryEvent::Click);
            issued.push(gallery.timer_token().unwrap());
        }
        let accepted = issued
            .iter()
            .filter(|t| !gallery.handle(GalleryEvent::Tick(**t)).is_empty())
            .count();
        prop_assert_eq!(accepted, 1);
    }
}
