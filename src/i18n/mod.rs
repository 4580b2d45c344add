// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Translations are TOML dictionaries addressed by dotted keys. Lookups walk
//! a fallback chain: the current language, then English, then the raw key.
//!
//! # Features
//!
//! - English and Arabic, with right-to-left layout for Arabic
//! - Dictionaries embedded in the binary or read from a directory
//! - `{{name}}` placeholder interpolation
//! - Language preference persisted in `settings.toml`
//! - Bulk translation of tagged UI elements

pub mod dictionary;
pub mod language;
pub mod preference;
pub mod source;
pub mod translator;

pub use dictionary::Dictionary;
pub use language::{Direction, Language};
pub use preference::{ConfigPreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use source::{DictionarySource, DirectoryDictionaries, EmbeddedDictionaries};
pub use translator::Translator;
