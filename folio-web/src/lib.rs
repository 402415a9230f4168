//! Folio Web: browser host for the portfolio page.
//!
//! Everything here is glue: find elements, install listeners, own the real
//! timers, and apply the effects the `folio-core` controllers return.
//! - `gallery`: `.gallery-multi` slideshows
//! - `services`: the services carousel
//! - `i18n`: language buttons and `localStorage` preference
//! - `chrome`: sidebar, nav highlight, back-to-top, reveal, footer, contact
//! - `timers`: gloo timers keyed by timer kind
//! - `logging`: tracing output to the browser console
//!
//! A component whose elements are missing is simply not installed.

pub mod chrome;
pub mod dom;
pub mod gallery;
pub mod i18n;
pub mod logging;
pub mod services;
pub mod timers;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use folio_core::FolioConfig;
use gloo::events::EventListener;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, Window};

use crate::chrome::Reveal;
use crate::gallery::GalleryHost;
use crate::i18n::LanguageSwitcher;
use crate::services::ServicesHost;

/// Id of the optional `<script type="application/toml">` holding page settings.
const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Everything mounted on the page, kept alive for the page's lifetime.
struct Page {
    galleries: Vec<Rc<GalleryHost>>,
    services: Option<Rc<ServicesHost>>,
    _language: Option<Rc<LanguageSwitcher>>,
    _reveal: Option<Reveal>,
    _listeners: Vec<EventListener>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    let Some(window) = dom::window() else {
        return;
    };
    let search = window.location().search().unwrap_or_default();
    logging::init(logging::level_for_query(&search));

    let Some(document) = window.document() else {
        return;
    };
    if is_loading(&document.ready_state()) {
        let ready = document.clone();
        EventListener::once(&document, "DOMContentLoaded", move |_event: &Event| {
            mount(&window, &ready);
        })
        .forget();
    } else {
        mount(&window, &document);
    }
}

/// `document.readyState` while the parser is still running.
fn is_loading(ready_state: &str) -> bool {
    ready_state == "loading"
}

fn mount(window: &Window, document: &Document) {
    let config = page_config(document);

    chrome::install_footer_year(document);
    let mut listeners = chrome::install_sidebar(window, document, &config.page);
    listeners.extend(chrome::install_scroll(window, document, &config.page));
    listeners.extend(chrome::install_contact(window, document, &config.contact));

    let page = Page {
        _language: LanguageSwitcher::mount(window, document, &config.language),
        galleries: GalleryHost::mount_all(document, &config.gallery),
        services: ServicesHost::mount(window, document, &config.services),
        _reveal: chrome::install_reveal(document),
        _listeners: listeners,
    };
    info!(
        galleries = page.galleries.len(),
        services = page.services.is_some(),
        "page mounted"
    );
    PAGE.with(|slot| {
        *slot.borrow_mut() = Some(page);
    });
}

/// Page settings, or defaults when the config element is absent or invalid.
fn page_config(document: &Document) -> FolioConfig {
    match read_config(document) {
        Ok(Some(config)) => {
            info!("page configuration loaded");
            config
        }
        Ok(None) => FolioConfig::default(),
        Err(err) => {
            warn!("{err:#}; using defaults");
            FolioConfig::default()
        }
    }
}

fn read_config(document: &Document) -> anyhow::Result<Option<FolioConfig>> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(None);
    };
    let text = element.text_content().unwrap_or_default();
    let config = FolioConfig::from_toml_str(&text)
        .with_context(|| format!("#{CONFIG_ELEMENT_ID} rejected"))?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_waits_only_while_parsing() {
        assert!(is_loading("loading"));
        assert!(!is_loading("interactive"));
        assert!(!is_loading("complete"));
    }
}
