//! Responsive pagination math for the services track.
//!
//! - `cards_per_view`: 2 at or above the breakpoint, otherwise 1
//! - `max_index`: last index at which a full view of cards is shown
//! - `Viewport::offset`: pixel translation of the track for an index

/// Cards visible at once for a viewport width.
pub fn cards_per_view(viewport_width: f64, breakpoint: f64) -> usize {
    if viewport_width >= breakpoint {
        2
    } else {
        1
    }
}

/// Highest valid index: `max(0, card_count - cards_per_view)`.
pub fn max_index(card_count: usize, cards_per_view: usize) -> usize {
    card_count.saturating_sub(cards_per_view)
}

/// Gap between cards while a drag is in progress.
///
/// The live drag preview does not read the computed style; it assumes no gap
/// on single-card layouts and 24px otherwise.
pub fn drag_gap(cards_per_view: usize) -> f64 {
    if cards_per_view == 1 {
        0.0
    } else {
        24.0
    }
}

/// Parse a CSS `gap` value the way `parseInt(value) || fallback` does:
/// leading integer digits, anything unparsable (or zero) uses the fallback.
pub fn parse_gap(css: &str, fallback: f64) -> f64 {
    let trimmed = css.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<f64>() {
        Ok(value) if value != 0.0 => sign * value,
        _ => fallback,
    }
}

/// Measured geometry of the page around the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Window inner width.
    pub width: f64,
    /// Rendered width of one card.
    pub card_width: f64,
    /// Gap between cards on the track.
    pub gap: f64,
}

impl Viewport {
    pub fn new(width: f64, card_width: f64, gap: f64) -> Self {
        Self {
            width,
            card_width,
            gap,
        }
    }

    /// Resting track offset for `index`.
    pub fn offset(&self, index: usize) -> f64 {
        index as f64 * (self.card_width + self.gap)
    }

    /// Track offset while dragging: the resting position (with the drag gap)
    /// shifted by the pointer travel.
    pub fn drag_offset(&self, index: usize, cards_per_view: usize, diff: f64) -> f64 {
        index as f64 * (self.card_width + drag_gap(cards_per_view)) - diff
    }
}
