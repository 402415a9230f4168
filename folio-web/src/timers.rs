//! Real timers behind the controllers' timer commands.
//!
//! One gloo timer per [`TimerKind`]. Starting a kind replaces (and thereby
//! cancels) whatever timer that kind held; the controller rejects ticks from
//! any token it no longer considers live, so a late callback is harmless.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use folio_core::{TimerCommand, TimerKind, TimerToken};
use gloo::timers::callback::{Interval, Timeout};

enum Handle {
    Interval(Interval),
    Timeout(Timeout),
}

/// Callback a fired timer reports its token to.
pub type OnFire = Rc<dyn Fn(TimerToken)>;

#[derive(Default)]
pub struct TimerHost {
    live: RefCell<HashMap<TimerKind, Handle>>,
}

impl TimerHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, command: TimerCommand, on_fire: &OnFire) {
        match command {
            TimerCommand::Start {
                token,
                delay,
                repeat,
            } => {
                let millis = millis(delay);
                let fire = Rc::clone(on_fire);
                let handle = if repeat {
                    Handle::Interval(Interval::new(millis, move || fire(token)))
                } else {
                    Handle::Timeout(Timeout::new(millis, move || fire(token)))
                };
                let previous = self.live.borrow_mut().insert(token.kind, handle);
                drop(previous);
            }
            TimerCommand::Cancel(kind) => {
                let previous = self.live.borrow_mut().remove(&kind);
                drop(previous);
            }
        }
    }
}

fn millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
