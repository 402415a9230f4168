//! Scroll-driven chrome: nav highlighting and the back-to-top control.

/// Vertical extent of a page section.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    /// Offset of the section's top edge from the document top.
    pub top: f64,
    pub height: f64,
}

/// Picks the nav link matching the section under the scroll position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavHighlighter {
    offset: f64,
}

impl NavHighlighter {
    pub fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Id of the current section. Sections are scanned in document order and
    /// the last match wins; `None` when the position is in no section.
    pub fn current<'a>(&self, sections: &'a [SectionBounds], scroll_y: f64) -> Option<&'a str> {
        sections
            .iter()
            .filter(|s| {
                let top = s.top - self.offset;
                scroll_y >= top && scroll_y < top + s.height
            })
            .last()
            .map(|s| s.id.as_str())
    }

    /// Active flag per nav link `href`, or `None` to leave links unchanged.
    pub fn link_states(
        &self,
        sections: &[SectionBounds],
        hrefs: &[String],
        scroll_y: f64,
    ) -> Option<Vec<bool>> {
        let id = self.current(sections, scroll_y)?;
        let target = format!("#{id}");
        Some(hrefs.iter().map(|href| *href == target).collect())
    }
}

/// Visibility rule for the back-to-top control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackToTop {
    threshold: f64,
}

impl BackToTop {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds { id: "home".into(), top: 0.0, height: 600.0 },
            SectionBounds { id: "about".into(), top: 600.0, height: 500.0 },
            SectionBounds { id: "contact".into(), top: 1100.0, height: 400.0 },
        ]
    }

    #[test]
    fn section_becomes_current_before_its_top() {
        let nav = NavHighlighter::new(120.0);
        let s = sections();
        assert_eq!(nav.current(&s, 0.0), Some("home"));
        assert_eq!(nav.current(&s, 479.0), Some("home"));
        assert_eq!(nav.current(&s, 480.0), Some("about"));
        assert_eq!(nav.current(&s, 980.0), Some("contact"));
    }

    #[test]
    fn past_last_section_is_none() {
        let nav = NavHighlighter::new(120.0);
        assert_eq!(nav.current(&sections(), 1380.0), None);
    }

    #[test]
    fn overlapping_sections_last_wins() {
        let nav = NavHighlighter::new(0.0);
        let s = vec![
            SectionBounds { id: "outer".into(), top: 0.0, height: 1000.0 },
            SectionBounds { id: "inner".into(), top: 200.0, height: 100.0 },
        ];
        assert_eq!(nav.current(&s, 250.0), Some("inner"));
        assert_eq!(nav.current(&s, 350.0), Some("outer"));
    }

    #[test]
    fn link_states_match_href() {
        let nav = NavHighlighter::new(120.0);
        let hrefs = vec!["#home".to_string(), "#about".to_string(), "/cv.pdf".to_string()];
        assert_eq!(
            nav.link_states(&sections(), &hrefs, 700.0),
            Some(vec![false, true, false])
        );
        assert_eq!(nav.link_states(&sections(), &hrefs, 5000.0), None);
    }

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        let btt = BackToTop::new(300.0);
        assert!(!btt.visible(0.0));
        assert!(!btt.visible(300.0));
        assert!(btt.visible(301.0));
    }
}
