//! Reveal-on-scroll: elements fade and slide in the first time they
//! intersect the viewport and stay revealed afterwards.

use std::collections::HashSet;

/// Elements that get the reveal treatment.
pub const REVEAL_SELECTOR: &str = ".section, .project-card, .service-card";
/// Fraction of the element that must be visible.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Shrinks the viewport bottom so elements reveal slightly after entering.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

/// Inline style values for the two reveal states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

impl RevealStyle {
    pub const HIDDEN: RevealStyle = RevealStyle {
        opacity: "0",
        transform: "translateY(20px)",
    };
    pub const SHOWN: RevealStyle = RevealStyle {
        opacity: "1",
        transform: "translateY(0)",
    };
    pub const TRANSITION: &'static str = "opacity 0.6s ease, transform 0.6s ease";
}

/// Tracks which observed elements have been revealed.
#[derive(Debug, Clone, Default)]
pub struct RevealTracker {
    revealed: HashSet<usize>,
}

impl RevealTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an intersection report for element `index`. Returns true exactly
    /// once per element: on its first intersection. The host then applies
    /// [`RevealStyle::SHOWN`] and stops observing it.
    pub fn observe(&mut self, index: usize, intersecting: bool) -> bool {
        intersecting && self.revealed.insert(index)
    }

    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.contains(&index)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }
}
