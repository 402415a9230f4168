//! Page chrome: everything around the sliders.
//!
//! - `sidebar`: mobile sidebar open/close rules
//! - `scroll`: nav highlighting and back-to-top visibility
//! - `reveal`: one-shot reveal-on-scroll bookkeeping

pub mod reveal;
pub mod scroll;
pub mod sidebar;

use chrono::Datelike;

pub use reveal::{RevealStyle, RevealTracker};
pub use scroll::{BackToTop, NavHighlighter, SectionBounds};
pub use sidebar::Sidebar;

/// Year printed in the footer.
pub fn footer_year(today: impl Datelike) -> i32 {
    today.year()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn footer_uses_calendar_year() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(footer_year(date), 2026);
    }
}
