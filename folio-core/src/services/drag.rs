//! Drag gesture state machine: `Idle → Dragging → Idle`.
//!
//! Coordinates are horizontal pointer positions in CSS pixels (page X for
//! mouse, client X for touch). The gesture never touches the slider index
//! itself; on release it is classified into a [`Swipe`] and the slider acts
//! on that.

/// Current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start: f64, current: f64 },
}

/// Outcome of a released gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Pointer travelled left past the threshold: show the next card.
    Forward,
    /// Pointer travelled right past the threshold: show the previous card.
    Backward,
    /// Travel within the threshold: snap back.
    Cancel,
}

impl DragState {
    /// Begin a gesture at `x`.
    pub fn begin(x: f64) -> Self {
        DragState::Dragging {
            start: x,
            current: x,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    /// Signed pointer travel since the gesture began.
    pub fn diff(&self) -> Option<f64> {
        match *self {
            DragState::Dragging { start, current } => Some(current - start),
            DragState::Idle => None,
        }
    }

    /// Record a move. Moves while idle are ignored and return `None`.
    pub fn update(&mut self, x: f64) -> Option<f64> {
        match self {
            DragState::Dragging { current, .. } => {
                *current = x;
                self.diff()
            }
            DragState::Idle => None,
        }
    }

    /// End the gesture, returning the final travel. The state resets to idle.
    pub fn release(&mut self) -> Option<f64> {
        let diff = self.diff();
        *self = DragState::Idle;
        diff
    }
}

/// Classify a released gesture against a threshold.
pub fn classify(diff: f64, threshold: f64) -> Swipe {
    if diff < -threshold {
        Swipe::Forward
    } else if diff > threshold {
        Swipe::Backward
    } else {
        Swipe::Cancel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_before_begin_are_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(120.0), None);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn diff_tracks_latest_move() {
        let mut drag = DragState::begin(200.0);
        assert_eq!(drag.diff(), Some(0.0));
        assert_eq!(drag.update(170.0), Some(-30.0));
        assert_eq!(drag.update(140.0), Some(-60.0));
    }

    #[test]
    fn release_resets() {
        let mut drag = DragState::begin(10.0);
        drag.update(70.0);
        assert_eq!(drag.release(), Some(60.0));
        assert!(!drag.is_active());
        assert_eq!(drag.release(), None);
    }

    #[test]
    fn press_without_move_is_zero_travel() {
        let mut drag = DragState::begin(10.0);
        drag.update(500.0);
        drag.release();

        // A fresh gesture must not inherit the previous pointer position.
        let mut next = DragState::begin(42.0);
        assert_eq!(next.release(), Some(0.0));
    }

    #[test]
    fn classify_is_strict_at_threshold() {
        assert_eq!(classify(-60.0, 50.0), Swipe::Forward);
        assert_eq!(classify(60.0, 50.0), Swipe::Backward);
        assert_eq!(classify(10.0, 50.0), Swipe::Cancel);
        assert_eq!(classify(-50.0, 50.0), Swipe::Cancel);
        assert_eq!(classify(50.0, 50.0), Swipe::Cancel);
    }
}
