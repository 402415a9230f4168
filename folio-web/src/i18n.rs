//! Language switcher: `localStorage` preference plus DOM translation.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::config::LanguageSettings;
use folio_core::i18n::{plan, PageKeys, TranslationPlan};
use folio_core::{FolioError, Language, LanguagePreference, PreferenceStore, TranslationTable};
use gloo::events::EventListener;
use tracing::{debug, info, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, Storage, Window};

use crate::dom;

/// Global the page script assigns the translation table to.
const TABLE_GLOBAL: &str = "PORTFOLIO_I18N";
const BUTTON_SELECTOR: &str = ".lang-btn";

// ── Storage ──────────────────────────────────────────────────────────

/// Browser `localStorage` as a preference store.
pub struct LocalStore {
    window: Window,
}

impl LocalStore {
    pub fn new(window: &Window) -> Self {
        Self {
            window: window.clone(),
        }
    }

    fn storage(&self) -> Result<Storage, FolioError> {
        self.window
            .local_storage()
            .map_err(|err| unavailable(&err))?
            .ok_or_else(|| FolioError::StoreUnavailable("localStorage disabled".to_string()))
    }
}

impl PreferenceStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError> {
        self.storage()?.get_item(key).map_err(|err| unavailable(&err))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), FolioError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|err| unavailable(&err))
    }
}

fn unavailable(err: &JsValue) -> FolioError {
    FolioError::StoreUnavailable(format!("{err:?}"))
}

/// Translation table from `window.PORTFOLIO_I18N`. Missing or malformed
/// tables leave the page in the language it was authored in.
pub fn load_table(window: &Window) -> Option<TranslationTable> {
    let value = js_sys::Reflect::get(window, &JsValue::from_str(TABLE_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        debug!("no translation table on this page");
        return None;
    }
    let json: String = js_sys::JSON::stringify(&value).ok()?.into();
    match TranslationTable::from_json(&json) {
        Ok(table) => Some(table),
        Err(err) => {
            warn!(%err, "translation table ignored");
            None
        }
    }
}

// ── Switcher ─────────────────────────────────────────────────────────

pub struct LanguageSwitcher {
    preference: LanguagePreference<LocalStore>,
    table: TranslationTable,
    document: Document,
    listeners: RefCell<Vec<EventListener>>,
}

impl LanguageSwitcher {
    /// Apply the stored language and wire the language buttons.
    pub fn mount(
        window: &Window,
        document: &Document,
        settings: &LanguageSettings,
    ) -> Option<Rc<Self>> {
        let table = load_table(window)?;
        let preference = LanguagePreference::new(
            LocalStore::new(window),
            settings.storage_key.clone(),
            settings.default,
        );
        let switcher = Rc::new(Self {
            preference,
            table,
            document: document.clone(),
            listeners: RefCell::new(Vec::new()),
        });
        switcher.install_listeners();
        switcher.apply(switcher.preference.get());
        Some(switcher)
    }

    /// Persist `lang` and translate the page.
    pub fn switch(&self, lang: Language) {
        self.preference.set(lang);
        self.apply(lang);
    }

    fn apply(&self, lang: Language) {
        let texts: Vec<Element> = dom::query_all(&self.document, "[data-i18n]");
        let lists: Vec<Element> = dom::query_all(&self.document, "[data-i18n-list]");
        let buttons: Vec<Element> = dom::query_all(&self.document, BUTTON_SELECTOR);
        let keys = PageKeys {
            text: attrs(&texts, "data-i18n"),
            lists: attrs(&lists, "data-i18n-list"),
            buttons: attrs(&buttons, "data-lang"),
        };
        let Some(plan) = plan(&self.table, lang, &keys) else {
            debug!(%lang, "no catalog for language");
            return;
        };
        self.write(&plan, &texts, &lists, &buttons);
        info!(%lang, "language applied");
    }

    fn write(
        &self,
        plan: &TranslationPlan,
        texts: &[Element],
        lists: &[Element],
        buttons: &[Element],
    ) {
        if let Some(root) = self.document.document_element() {
            let _ = root.set_attribute("lang", plan.html_lang);
        }
        for (element, text) in texts.iter().zip(&plan.text) {
            if let Some(text) = text {
                element.set_text_content(Some(text));
            }
        }
        for (element, items) in lists.iter().zip(&plan.lists) {
            if let Some(items) = items {
                self.fill_list(element, items);
            }
        }
        for (button, active) in buttons.iter().zip(&plan.buttons) {
            dom::toggle_class(button, "active", *active);
            let _ = button.set_attribute("aria-pressed", dom::bool_attr(*active));
        }
    }

    fn fill_list(&self, list: &Element, items: &[String]) {
        list.set_inner_html("");
        for item in items {
            let Ok(li) = self.document.create_element("li") else {
                continue;
            };
            li.set_text_content(Some(item));
            let _ = list.append_child(&li);
        }
    }

    fn install_listeners(self: &Rc<Self>) {
        let mut listeners = Vec::new();
        for button in dom::query_all::<Element>(&self.document, BUTTON_SELECTOR) {
            let switcher = Rc::clone(self);
            listeners.push(EventListener::new(&button, "click", move |event: &Event| {
                let code = event
                    .current_target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                    .and_then(|element| element.get_attribute("data-lang"));
                match code.as_deref().and_then(Language::from_code) {
                    Some(lang) => switcher.switch(lang),
                    None => debug!(?code, "language button without a supported code"),
                }
            }));
        }
        *self.listeners.borrow_mut() = listeners;
    }
}

fn attrs(elements: &[Element], name: &str) -> Vec<String> {
    elements
        .iter()
        .map(|element| element.get_attribute(name).unwrap_or_default())
        .collect()
}
