//! Page configuration: timings, thresholds, breakpoints, contact recipient.
//!
//! Every field has a default matching the behaviour the page shipped with,
//! so an empty TOML document yields a working configuration. Partial files
//! override only the keys they name.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::i18n::Language;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FolioConfig {
    pub gallery: GallerySettings,
    pub services: ServicesSettings,
    pub page: PageSettings,
    pub language: LanguageSettings,
    pub contact: ContactSettings,
}

/// Gallery slideshow timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GallerySettings {
    /// Auto-advance period in milliseconds.
    pub interval_ms: u64,
}

impl Default for GallerySettings {
    fn default() -> Self {
        Self { interval_ms: 3_500 }
    }
}

impl GallerySettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Services carousel timing and geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesSettings {
    /// Auto-play period in milliseconds.
    pub autoplay_ms: u64,
    /// Quiet period after the last resize event before re-layout.
    pub resize_debounce_ms: u64,
    /// Minimum horizontal pointer travel that counts as a swipe.
    pub drag_threshold_px: f64,
    /// Viewport width at or above which two cards are shown.
    pub breakpoint_px: f64,
    /// Track gap used when the computed style cannot be read.
    pub fallback_gap_px: f64,
}

impl Default for ServicesSettings {
    fn default() -> Self {
        Self {
            autoplay_ms: 5_000,
            resize_debounce_ms: 250,
            drag_threshold_px: 50.0,
            breakpoint_px: 768.0,
            fallback_gap_px: 16.0,
        }
    }
}

impl ServicesSettings {
    pub fn autoplay(&self) -> Duration {
        Duration::from_millis(self.autoplay_ms)
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }
}

/// Sidebar, nav highlight and back-to-top thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Sidebar links close the sidebar at or below this viewport width.
    pub sidebar_collapse_px: f64,
    /// Sections count as current this many pixels before their top edge.
    pub nav_offset_px: f64,
    /// Back-to-top control shows once scrolled past this many pixels.
    pub back_to_top_px: f64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            sidebar_collapse_px: 900.0,
            nav_offset_px: 120.0,
            back_to_top_px: 300.0,
        }
    }
}

/// Language preference storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageSettings {
    pub storage_key: String,
    pub default: Language,
}

impl Default for LanguageSettings {
    fn default() -> Self {
        Self {
            storage_key: "portfolio-lang".to_string(),
            default: Language::En,
        }
    }
}

/// Mail handoff target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub recipient: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            recipient: "contact@example.com".to_string(),
        }
    }
}

impl FolioConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, FolioError> {
        let config: FolioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, FolioError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would stall timers or break layout math.
    pub fn validate(&self) -> Result<(), FolioError> {
        if self.gallery.interval_ms == 0 {
            return Err(FolioError::InvalidConfig(
                "gallery.interval_ms must be positive".into(),
            ));
        }
        if self.services.autoplay_ms == 0 {
            return Err(FolioError::InvalidConfig(
                "services.autoplay_ms must be positive".into(),
            ));
        }
        if !(self.services.breakpoint_px > 0.0) {
            return Err(FolioError::InvalidConfig(
                "services.breakpoint_px must be positive".into(),
            ));
        }
        if !(self.services.drag_threshold_px >= 0.0) {
            return Err(FolioError::InvalidConfig(
                "services.drag_threshold_px must not be negative".into(),
            ));
        }
        if self.language.storage_key.is_empty() {
            return Err(FolioError::InvalidConfig(
                "language.storage_key must not be empty".into(),
            ));
        }
        if !self.contact.recipient.contains('@') {
            return Err(FolioError::InvalidConfig(format!(
                "contact.recipient '{}' is not an email address",
                self.contact.recipient
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FolioConfig::from_toml_str("").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.gallery.interval(), Duration::from_millis(3_500));
        assert_eq!(config.services.autoplay(), Duration::from_secs(5));
        assert_eq!(config.services.resize_debounce(), Duration::from_millis(250));
        assert_eq!(config.language.storage_key, "portfolio-lang");
    }

    #[test]
    fn partial_document_overrides_named_keys_only() {
        let config = FolioConfig::from_toml_str(
            r#"
            [services]
            breakpoint_px = 1024.0

            [language]
            default = "id"
            "#,
        )
        .unwrap();
        assert_eq!(config.services.breakpoint_px, 1024.0);
        assert_eq!(config.services.drag_threshold_px, 50.0);
        assert_eq!(config.language.default, Language::Id);
        assert_eq!(config.language.storage_key, "portfolio-lang");
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = FolioConfig::from_toml_str("[gallery]\ninterval_ms = 0\n").unwrap_err();
        assert!(matches!(err, FolioError::InvalidConfig(_)));
    }

    #[test]
    fn bad_recipient_is_rejected() {
        let err =
            FolioConfig::from_toml_str("[contact]\nrecipient = \"nobody\"\n").unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = FolioConfig::from_toml_str("[gallery\n").unwrap_err();
        assert!(matches!(err, FolioError::ConfigParse(_)));
    }

    #[test]
    fn toml_roundtrip_preserves_values() {
        let mut config = FolioConfig::default();
        config.page.nav_offset_px = 80.0;
        let text = config.to_toml_string().unwrap();
        assert_eq!(FolioConfig::from_toml_str(&text).unwrap(), config);
    }
}
