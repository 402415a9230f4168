//! Timer slots: generational tokens for host-owned timers.
//!
//! Controllers never hold a real timer. When a timer should run they issue a
//! [`TimerCommand::Start`] carrying a fresh [`TimerToken`]; the host schedules
//! it and feeds the token back when it fires. A slot accepts only the token it
//! issued last, so:
//!
//! - restarting a slot invalidates the previous timer even if the host
//!   failed to clear it (no double-speed ticking),
//! - cancelling is immediate: a fire already queued behind the cancel is
//!   rejected,
//! - a debounce is just a one-shot slot restarted on every trigger; only the
//!   most recent schedule can run.
//!
//! Hosts must keep at most one live timer per [`TimerKind`] per controller
//! and replace it on every `Start`.

use std::time::Duration;

/// Which timer a token belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    AutoPlay,
    Resize,
}

/// Handle for one scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Instruction for the host's timer facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Replace any live timer of this kind with a new one.
    Start {
        token: TimerToken,
        delay: Duration,
        repeat: bool,
    },
    /// Drop the live timer of this kind, if any.
    Cancel(TimerKind),
}

/// A single timer slot.
#[derive(Debug, Clone)]
pub struct TimerSlot {
    kind: TimerKind,
    delay: Duration,
    repeat: bool,
    generation: u64,
    live: bool,
}

impl TimerSlot {
    /// Repeating slot firing every `period`.
    pub fn interval(kind: TimerKind, period: Duration) -> Self {
        Self {
            kind,
            delay: period,
            repeat: true,
            generation: 0,
            live: false,
        }
    }

    /// One-shot slot firing once after `delay`.
    pub fn timeout(kind: TimerKind, delay: Duration) -> Self {
        Self {
            kind,
            delay,
            repeat: false,
            generation: 0,
            live: false,
        }
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// The token the slot would currently accept.
    pub fn current(&self) -> Option<TimerToken> {
        self.live.then_some(TimerToken {
            kind: self.kind,
            generation: self.generation,
        })
    }

    /// Start (or restart) the slot. Any earlier token becomes stale.
    pub fn start(&mut self) -> TimerCommand {
        self.generation += 1;
        self.live = true;
        TimerCommand::Start {
            token: TimerToken {
                kind: self.kind,
                generation: self.generation,
            },
            delay: self.delay,
            repeat: self.repeat,
        }
    }

    /// Stop the slot. Returns `None` when nothing was running.
    pub fn cancel(&mut self) -> Option<TimerCommand> {
        if !self.live {
            return None;
        }
        self.live = false;
        self.generation += 1;
        Some(TimerCommand::Cancel(self.kind))
    }

    /// Decide whether a fired token should be acted on.
    ///
    /// One-shot slots go idle after their accepted fire.
    pub fn accept(&mut self, token: TimerToken) -> bool {
        let valid = self.live && token.kind == self.kind && token.generation == self.generation;
        if valid && !self.repeat {
            self.live = false;
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_of(cmd: TimerCommand) -> TimerToken {
        match cmd {
            TimerCommand::Start { token, .. } => token,
            TimerCommand::Cancel(kind) => panic!("expected start, got cancel of {kind:?}"),
        }
    }

    #[test]
    fn idle_slot_accepts_nothing() {
        let mut slot = TimerSlot::interval(TimerKind::AutoPlay, Duration::from_secs(5));
        assert!(!slot.is_live());
        assert!(slot.current().is_none());
        let forged = TimerToken {
            kind: TimerKind::AutoPlay,
            generation: 0,
        };
        assert!(!slot.accept(forged));
    }

    #[test]
    fn restart_invalidates_previous_token() {
        let mut slot = TimerSlot::interval(TimerKind::AutoPlay, Duration::from_secs(5));
        let first = token_of(slot.start());
        let second = token_of(slot.start());

        assert!(!slot.accept(first));
        assert!(slot.accept(second));
        assert!(slot.accept(second)); // interval keeps firing
    }

    #[test]
    fn cancel_rejects_queued_fire() {
        let mut slot = TimerSlot::interval(TimerKind::AutoPlay, Duration::from_secs(5));
        let token = token_of(slot.start());
        assert_eq!(slot.cancel(), Some(TimerCommand::Cancel(TimerKind::AutoPlay)));
        assert!(!slot.accept(token));
        assert_eq!(slot.cancel(), None);
    }

    #[test]
    fn timeout_fires_once() {
        let mut slot = TimerSlot::timeout(TimerKind::Resize, Duration::from_millis(250));
        let token = token_of(slot.start());
        assert!(slot.accept(token));
        assert!(!slot.accept(token));
        assert!(!slot.is_live());
    }

    #[test]
    fn debounce_keeps_only_latest_schedule() {
        let mut slot = TimerSlot::timeout(TimerKind::Resize, Duration::from_millis(250));
        let tokens: Vec<_> = (0..5).map(|_| token_of(slot.start())).collect();

        let fired: Vec<_> = tokens.iter().filter(|t| slot.accept(**t)).collect();
        assert_eq!(fired, vec![&tokens[4]]);
    }

    #[test]
    fn tokens_of_other_kind_are_rejected() {
        let mut slot = TimerSlot::timeout(TimerKind::Resize, Duration::from_millis(250));
        let token = token_of(slot.start());
        let wrong = TimerToken {
            kind: TimerKind::AutoPlay,
            ..token
        };
        assert!(!slot.accept(wrong));
        assert!(slot.accept(token));
    }

    #[test]
    fn start_reports_delay_and_repeat() {
        let mut slot = TimerSlot::interval(TimerKind::AutoPlay, Duration::from_millis(3_500));
        match slot.start() {
            TimerCommand::Start { delay, repeat, .. } => {
                assert_eq!(delay, Duration::from_millis(3_500));
                assert!(repeat);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
