//! Mobile sidebar.

/// Open/closed state of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sidebar {
    open: bool,
    collapse_width: f64,
}

impl Sidebar {
    pub fn new(collapse_width: f64) -> Self {
        Self {
            open: false,
            collapse_width,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Menu button. Returns the new state (mirrored into `aria-expanded`).
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// A sidebar link was followed. Closes only on narrow viewports.
    pub fn link_clicked(&mut self, viewport_width: f64) -> bool {
        if viewport_width <= self.collapse_width {
            self.open = false;
        }
        self.open
    }

    /// Click on the dimmed overlay behind the sidebar.
    pub fn overlay_clicked(&mut self) -> bool {
        self.open = false;
        self.open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips() {
        let mut sidebar = Sidebar::new(900.0);
        assert!(sidebar.toggle());
        assert!(!sidebar.toggle());
    }

    #[test]
    fn link_closes_only_when_narrow() {
        let mut sidebar = Sidebar::new(900.0);
        sidebar.toggle();
        assert!(sidebar.link_clicked(1200.0));
        assert!(!sidebar.link_clicked(900.0));
    }

    #[test]
    fn overlay_always_closes() {
        let mut sidebar = Sidebar::new(900.0);
        sidebar.toggle();
        assert!(!sidebar.overlay_clicked());
        assert!(!sidebar.is_open());
    }
}
