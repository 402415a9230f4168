//! Folio Core: page logic for the portfolio site, free of browser types.
//!
//! This crate holds every rule the page follows; the browser host only
//! measures, listens and applies effects:
//! - Timer slots with generational tokens (one live timer per slot)
//! - Gallery slideshow controller
//! - Services carousel controller (navigation, drag, auto-play, resize)
//! - Translation table, language preference, apply plans
//! - Contact form mailto handoff
//! - Sidebar, nav highlight, back-to-top, reveal-on-scroll
//! - TOML configuration

pub mod chrome;
pub mod config;
pub mod contact;
pub mod error;
pub mod gallery;
pub mod i18n;
pub mod preference;
pub mod script;
pub mod services;
pub mod timer;

pub use config::FolioConfig;
pub use contact::ContactMessage;
pub use error::FolioError;
pub use gallery::{GalleryEffect, GalleryEvent, GallerySlider, GalleryView};
pub use i18n::{Language, TranslationTable};
pub use preference::{LanguagePreference, PreferenceStore};
pub use services::{ServicesEffect, ServicesEvent, ServicesSlider, Viewport};
pub use timer::{TimerCommand, TimerKind, TimerSlot, TimerToken};

#[cfg(test)]
mod tests {
    use super::*;

    /// Controllers hold no shared state: two instances never interfere.
    #[test]
    fn slider_instances_are_independent() {
        let settings = config::ServicesSettings::default();
        let viewport = Viewport::new(500.0, 400.0, 16.0);
        let mut a = ServicesSlider::new(5, 5, viewport, settings.clone());
        let mut b = ServicesSlider::new(5, 5, viewport, settings);
        a.start();
        b.start();

        a.next();
        a.next();
        assert_eq!(a.current_index(), 2);
        assert_eq!(b.current_index(), 0);

        b.handle(ServicesEvent::PointerEnter);
        assert!(b.autoplay_token().is_none());
        assert!(a.autoplay_token().is_some());
    }

    #[test]
    fn gallery_instances_are_independent() {
        let mut a = GallerySlider::new(3, std::time::Duration::from_millis(3_500));
        let mut b = GallerySlider::new(4, std::time::Duration::from_millis(3_500));
        a.start();
        b.start();
        a.handle(GalleryEvent::Click);
        assert_eq!(a.current_index(), 1);
        assert_eq!(b.current_index(), 0);
    }
}
