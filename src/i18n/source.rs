// SPDX-License-Identifier: MPL-2.0
//! Where dictionaries come from.
//!
//! Each supported language has one `<code>.toml` resource. The default source
//! is compiled into the binary; a directory source lets translators try edits
//! without rebuilding.

use super::dictionary::Dictionary;
use super::language::Language;
use crate::error::{Error, Result};
use futures_util::future::{BoxFuture, FutureExt};
use rust_embed::RustEmbed;
use std::path::PathBuf;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Resource name of a language's dictionary.
#[must_use]
pub fn resource_name(lang: Language) -> String {
    format!("{}.toml", lang.code())
}

/// Loads one language's dictionary.
pub trait DictionarySource: Send + Sync {
    fn load(&self, lang: Language) -> BoxFuture<'_, Result<Dictionary>>;
}

impl<S: DictionarySource + ?Sized> DictionarySource for Box<S> {
    fn load(&self, lang: Language) -> BoxFuture<'_, Result<Dictionary>> {
        (**self).load(lang)
    }
}

/// Dictionaries embedded from `assets/i18n/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedDictionaries;

impl DictionarySource for EmbeddedDictionaries {
    fn load(&self, lang: Language) -> BoxFuture<'_, Result<Dictionary>> {
        async move {
            let name = resource_name(lang);
            let file = Asset::get(&name)
                .ok_or_else(|| Error::Dictionary(format!("missing embedded {name}")))?;
            Dictionary::parse(&String::from_utf8_lossy(file.data.as_ref()))
        }
        .boxed()
    }
}

/// Dictionaries read from `<root>/<code>.toml`.
#[derive(Debug, Clone)]
pub struct DirectoryDictionaries {
    root: PathBuf,
}

impl DirectoryDictionaries {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DictionarySource for DirectoryDictionaries {
    fn load(&self, lang: Language) -> BoxFuture<'_, Result<Dictionary>> {
        let path = self.root.join(resource_name(lang));
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
            Dictionary::parse(&content)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn every_language_has_an_embedded_dictionary() {
        for lang in Language::ALL {
            let dict = EmbeddedDictionaries.load(lang).await.expect("embedded dictionary");
            assert!(dict.lookup("app.title").is_some(), "{lang} lacks app.title");
        }
    }

    #[tokio::test]
    async fn directory_source_reads_code_named_files() {
        let dir = tempdir().expect("failed to create temp dir");
        std::fs::write(dir.path().join("ar.toml"), "[app]\ntitle = \"عنوان\"\n")
            .expect("failed to write dictionary");

        let source = DirectoryDictionaries::new(dir.path());
        let ar = source.load(Language::Arabic).await.expect("ar loads");
        assert_eq!(ar.lookup("app.title").as_deref(), Some("عنوان"));

        let en = source.load(Language::English).await;
        assert!(matches!(en, Err(Error::Io(_))));
    }
}
