//! Translations: language codes, the translation table, and apply plans.
//!
//! The table is the JSON object the page ships as `PORTFOLIO_I18N`:
//!
//! ```json
//! { "en": { "hero.title": "Hello", "about.skills": ["Rust", "Go"] },
//!   "id": { "hero.title": "Halo",  "about.skills": ["Rust", "Go"] } }
//! ```
//!
//! Applying a language never touches the DOM here. [`plan`] takes the keys
//! found on the page (in element order) and returns what each element should
//! become; the host zips the plan back onto its elements.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;

/// Supported page languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Id,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Id];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Id => "id",
        }
    }

    /// Exact-match lookup; anything other than `"en"` or `"id"` is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::En),
            "id" => Some(Language::Id),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s).ok_or_else(|| FolioError::UnknownLanguage(s.to_string()))
    }
}

/// One translated value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    List(Vec<String>),
}

impl Entry {
    fn kind(&self) -> &'static str {
        match self {
            Entry::Text(_) => "text",
            Entry::List(_) => "list",
        }
    }
}

/// All strings for one language.
pub type Catalog = BTreeMap<String, Entry>;

/// Language code → catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: BTreeMap<String, Catalog>,
}

/// A structural problem found by [`TranslationTable::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIssue {
    /// A language code the page cannot select.
    UnknownLanguage(String),
    /// A supported language with no catalog.
    MissingLanguage(Language),
    /// `key` exists for `present_in` but not for `missing_in`.
    MissingKey {
        key: String,
        present_in: String,
        missing_in: String,
    },
    /// `key` is a string in one language and a list in another.
    KindMismatch {
        key: String,
        left: String,
        right: String,
    },
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableIssue::UnknownLanguage(code) => write!(f, "unknown language '{code}'"),
            TableIssue::MissingLanguage(lang) => write!(f, "no catalog for '{lang}'"),
            TableIssue::MissingKey {
                key,
                present_in,
                missing_in,
            } => write!(f, "key '{key}' present in '{present_in}' but missing in '{missing_in}'"),
            TableIssue::KindMismatch { key, left, right } => {
                write!(f, "key '{key}' differs in kind between '{left}' and '{right}'")
            }
        }
    }
}

impl TranslationTable {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn catalog(&self, lang: Language) -> Option<&Catalog> {
        self.languages.get(lang.code())
    }

    pub fn insert(&mut self, lang: Language, key: impl Into<String>, entry: Entry) {
        self.languages
            .entry(lang.code().to_string())
            .or_default()
            .insert(key.into(), entry);
    }

    pub fn text(&self, lang: Language, key: &str) -> Option<&str> {
        match self.catalog(lang)?.get(key)? {
            Entry::Text(text) => Some(text),
            Entry::List(_) => None,
        }
    }

    pub fn list(&self, lang: Language, key: &str) -> Option<&[String]> {
        match self.catalog(lang)?.get(key)? {
            Entry::List(items) => Some(items),
            Entry::Text(_) => None,
        }
    }

    /// Compare every catalog against every other one.
    pub fn check(&self) -> Vec<TableIssue> {
        let mut issues = Vec::new();

        for code in self.languages.keys() {
            if Language::from_code(code).is_none() {
                issues.push(TableIssue::UnknownLanguage(code.clone()));
            }
        }
        for lang in Language::ALL {
            if self.catalog(lang).is_none() {
                issues.push(TableIssue::MissingLanguage(lang));
            }
        }

        let codes: Vec<&String> = self.languages.keys().collect();
        for (i, left) in codes.iter().enumerate() {
            for right in codes.iter().skip(i + 1) {
                let (a, b) = (&self.languages[*left], &self.languages[*right]);
                for (key, entry) in a {
                    match b.get(key) {
                        None => issues.push(TableIssue::MissingKey {
                            key: key.clone(),
                            present_in: (*left).clone(),
                            missing_in: (*right).clone(),
                        }),
                        Some(other) if other.kind() != entry.kind() => {
                            issues.push(TableIssue::KindMismatch {
                                key: key.clone(),
                                left: (*left).clone(),
                                right: (*right).clone(),
                            })
                        }
                        Some(_) => {}
                    }
                }
                for key in b.keys().filter(|k| !a.contains_key(*k)) {
                    issues.push(TableIssue::MissingKey {
                        key: key.clone(),
                        present_in: (*right).clone(),
                        missing_in: (*left).clone(),
                    });
                }
            }
        }
        issues
    }
}

/// Keys found on the page, in element order.
#[derive(Debug, Clone, Default)]
pub struct PageKeys {
    /// `data-i18n` values of text elements.
    pub text: Vec<String>,
    /// `data-i18n-list` values of list containers.
    pub lists: Vec<String>,
    /// `data-lang` values of the language buttons.
    pub buttons: Vec<String>,
}

/// What to apply for one language, parallel to [`PageKeys`].
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationPlan {
    /// Value for the document's `lang` attribute.
    pub html_lang: &'static str,
    /// New text per text element; `None` leaves the element untouched.
    pub text: Vec<Option<String>>,
    /// New items per list container; `None` leaves the container untouched.
    pub lists: Vec<Option<Vec<String>>>,
    /// Active (and `aria-pressed`) flag per language button.
    pub buttons: Vec<bool>,
}

/// Build the plan for `lang`. `None` when the table has no catalog for it.
pub fn plan(table: &TranslationTable, lang: Language, keys: &PageKeys) -> Option<TranslationPlan> {
    let catalog = table.catalog(lang)?;

    let text = keys
        .text
        .iter()
        .map(|key| match catalog.get(key) {
            Some(Entry::Text(text)) => Some(text.clone()),
            // Lists assigned as text render joined, the way textContent would.
            Some(Entry::List(items)) => Some(items.join(",")),
            None => None,
        })
        .collect();

    let lists = keys
        .lists
        .iter()
        .map(|key| match catalog.get(key) {
            Some(Entry::List(items)) => Some(items.clone()),
            _ => None,
        })
        .collect();

    let buttons = keys.buttons.iter().map(|code| code == lang.code()).collect();

    Some(TranslationPlan {
        html_lang: lang.code(),
        text,
        lists,
        buttons,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"{
        "en": { "hero.title": "Hello", "skills": ["Rust", "Go"], "only.en": "x" },
        "id": { "hero.title": "Halo", "skills": ["Rust", "Go"] }
    }"#;

    fn keys() -> PageKeys {
        PageKeys {
            text: vec!["hero.title".into(), "missing".into()],
            lists: vec!["skills".into(), "hero.title".into()],
            buttons: vec!["en".into(), "id".into()],
        }
    }

    #[test]
    fn language_codes_are_exact() {
        assert_eq!(Language::from_code("id"), Some(Language::Id));
        assert_eq!(Language::from_code("EN"), None);
        assert_eq!(Language::from_code(" en"), None);
        assert!("fr".parse::<Language>().is_err());
        assert_eq!("en".parse::<Language>().unwrap(), Language::En);
        assert_eq!(Language::Id.to_string(), "id");
    }

    #[test]
    fn parses_strings_and_lists() {
        let table = TranslationTable::from_json(TABLE).unwrap();
        assert_eq!(table.text(Language::Id, "hero.title"), Some("Halo"));
        assert_eq!(
            table.list(Language::En, "skills"),
            Some(&["Rust".to_string(), "Go".to_string()][..])
        );
        assert_eq!(table.text(Language::En, "skills"), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = TranslationTable::from_json("{\"en\": 3}").unwrap_err();
        assert!(matches!(err, FolioError::Translations(_)));
    }

    #[test]
    fn plan_fills_known_keys_only() {
        let table = TranslationTable::from_json(TABLE).unwrap();
        let plan = plan(&table, Language::Id, &keys()).unwrap();

        assert_eq!(plan.html_lang, "id");
        assert_eq!(plan.text, vec![Some("Halo".to_string()), None]);
        assert_eq!(
            plan.lists,
            vec![Some(vec!["Rust".to_string(), "Go".to_string()]), None]
        );
        assert_eq!(plan.buttons, vec![false, true]);
    }

    #[test]
    fn plan_for_missing_catalog_is_none() {
        let mut table = TranslationTable::default();
        table.insert(Language::En, "a", Entry::Text("A".into()));
        assert!(plan(&table, Language::Id, &keys()).is_none());
        assert!(plan(&table, Language::En, &keys()).is_some());
    }

    #[test]
    fn check_reports_missing_keys_and_kinds() {
        let table = TranslationTable::from_json(
            r#"{
                "en": { "a": "A", "b": ["x"], "c": "C" },
                "id": { "a": "A", "b": "x", "d": "D" },
                "fr": { }
            }"#,
        )
        .unwrap();
        let issues = table.check();

        assert!(issues.contains(&TableIssue::UnknownLanguage("fr".into())));
        assert!(issues.contains(&TableIssue::KindMismatch {
            key: "b".into(),
            left: "en".into(),
            right: "id".into(),
        }));
        assert!(issues.contains(&TableIssue::MissingKey {
            key: "c".into(),
            present_in: "en".into(),
            missing_in: "id".into(),
        }));
        assert!(issues.contains(&TableIssue::MissingKey {
            key: "d".into(),
            present_in: "id".into(),
            missing_in: "en".into(),
        }));
    }

    #[test]
    fn consistent_table_has_no_issues() {
        let table = TranslationTable::from_json(
            r#"{ "en": { "a": "A", "b": ["x"] }, "id": { "a": "B", "b": ["y", "z"] } }"#,
        )
        .unwrap();
        assert!(table.check().is_empty());
    }
}
