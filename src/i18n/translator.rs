// SPDX-License-Identifier: MPL-2.0
//! The translation service.

use super::dictionary::{interpolate, Dictionary};
use super::language::{Direction, Language};
use super::preference::PreferenceStore;
use super::source::DictionarySource;
use crate::ui::binding::{Slot, UiBinding, ACTIVE_CLASS, LANG_SWITCH_TAG};
use futures_util::future::join_all;
use std::collections::HashMap;
use tracing::{debug, error, warn};

/// Key of the document title.
pub const TITLE_KEY: &str = "app.title";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    /// Nothing loaded yet.
    Cold,
    /// Dictionaries loaded by an early `set_lang`, preference not yet restored.
    Loaded,
    /// `init` completed.
    Ready,
}

/// Owns the dictionaries and the current language.
pub struct Translator {
    source: Box<dyn DictionarySource>,
    preferences: Box<dyn PreferenceStore>,
    dictionaries: HashMap<Language, Dictionary>,
    current: Language,
    lifecycle: Lifecycle,
}

impl Translator {
    pub fn new(
        source: impl DictionarySource + 'static,
        preferences: impl PreferenceStore + 'static,
    ) -> Self {
        Self {
            source: Box::new(source),
            preferences: Box::new(preferences),
            dictionaries: HashMap::new(),
            current: Language::DEFAULT,
            lifecycle: Lifecycle::Cold,
        }
    }

    /// Loads every dictionary, restores the saved language and applies it.
    /// Calls after the first one return immediately.
    pub async fn init(&mut self, ui: &mut dyn UiBinding) {
        if self.lifecycle == Lifecycle::Ready {
            return;
        }
        self.ensure_loaded().await;

        let saved = self.preferences.load();
        let initial = saved
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(Language::DEFAULT);
        debug!(?saved, lang = %initial, "restoring language");

        self.apply_language(initial, ui);
        self.lifecycle = Lifecycle::Ready;
    }

    /// Drops the dictionaries. The next `init` starts from scratch.
    pub fn teardown(&mut self) {
        self.dictionaries.clear();
        self.current = Language::DEFAULT;
        self.lifecycle = Lifecycle::Cold;
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    /// Current language code.
    #[must_use]
    pub fn lang(&self) -> &'static str {
        self.current.code()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.current.direction()
    }

    /// Switches language. Unsupported codes select the default language.
    pub async fn set_lang(&mut self, code: &str, ui: &mut dyn UiBinding) {
        self.ensure_loaded().await;

        let lang = Language::from_code(code).unwrap_or_else(|| {
            warn!(code, fallback = %Language::DEFAULT, "unsupported language");
            Language::DEFAULT
        });
        self.apply_language(lang, ui);
    }

    /// Resolves `key`: current language, then English, then the key itself.
    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| {
            warn!(key, "missing translation");
            key.to_string()
        })
    }

    /// Like [`Translator::tr`], substituting `{{name}}` placeholders.
    #[must_use]
    pub fn tr_with_args(&self, key: &str, args: &[(&str, &str)]) -> String {
        match self.resolve(key) {
            Some(value) if !args.is_empty() => interpolate(&value, args),
            Some(value) => value,
            None => {
                warn!(key, "missing translation");
                key.to_string()
            }
        }
    }

    /// Translates every tagged element under `root` (the whole page when `None`)
    /// and marks the language switch matching the current language.
    pub fn apply(&self, ui: &mut dyn UiBinding, root: Option<&str>) {
        for slot in Slot::ALL {
            ui.fill_tagged(root, slot, &mut |key| self.tr(key));
        }
        let current = self.lang();
        ui.mark_tagged(root, LANG_SWITCH_TAG, ACTIVE_CLASS, &mut |code| code == current);
    }

    fn resolve(&self, key: &str) -> Option<String> {
        let lookup = |lang: Language| self.dictionaries.get(&lang).and_then(|d| d.lookup(key));
        lookup(self.current).or_else(|| {
            if self.current == Language::English {
                None
            } else {
                lookup(Language::English)
            }
        })
    }

    fn apply_language(&mut self, lang: Language, ui: &mut dyn UiBinding) {
        self.current = lang;
        if let Err(err) = self.preferences.save(lang.code()) {
            warn!(%err, "failed to persist language preference");
        }

        ui.set_locale(lang.code(), lang.direction());
        self.apply(ui, None);
        ui.set_title(&self.tr(TITLE_KEY));
    }

    async fn ensure_loaded(&mut self) {
        if self.lifecycle != Lifecycle::Cold {
            return;
        }

        let source = self.source.as_ref();
        let results = join_all(
            Language::ALL.map(|lang| async move { (lang, source.load(lang).await) }),
        )
        .await;

        for (lang, result) in results {
            let dictionary = result.unwrap_or_else(|err| {
                error!(lang = %lang, %err, "failed to load dictionary");
                Dictionary::empty()
            });
            self.dictionaries.insert(lang, dictionary);
        }
        self.lifecycle = Lifecycle::Loaded;
    }
}
