// SPDX-License-Identifier: MPL-2.0
//! Per-language string tables addressed by dotted key paths.
//!
//! A dictionary is a TOML document. Nested tables form the path, so
//!
//! ```toml
//! [button]
//! generate = "Generate"
//! ```
//!
//! resolves `button.generate` to `"Generate"`.

use crate::error::{Error, Result};
use toml::{Table, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    root: Table,
}

impl Dictionary {
    /// An empty dictionary; every lookup misses.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(source: &str) -> Result<Self> {
        let root: Table =
            toml::from_str(source).map_err(|e| Error::Dictionary(e.to_string()))?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Resolves a dotted key path to a leaf.
    ///
    /// Strings are returned as-is, other scalars in their TOML form. A path
    /// ending on a table or an array is a miss.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<String> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut current = self.root.get(first)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }

        match current {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Datetime(d) => Some(d.to_string()),
            Value::Table(_) | Value::Array(_) => None,
        }
    }
}

/// Replaces every `{{name}}` with its value. Unknown placeholders stay verbatim.
#[must_use]
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (name, value) in args {
        result = result.replace(&format!("{{{{{name}}}}}"), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[app]
title = "QR Studio"

[input.size]
label = "Size"
max = 1024

[alert]
emptyContent = "Please enter some content"
"#;

    #[test]
    fn resolves_nested_paths() {
        let dict = Dictionary::parse(SAMPLE).expect("valid toml");
        assert_eq!(dict.lookup("app.title").as_deref(), Some("QR Studio"));
        assert_eq!(dict.lookup("input.size.label").as_deref(), Some("Size"));
        assert_eq!(
            dict.lookup("alert.emptyContent").as_deref(),
            Some("Please enter some content")
        );
    }

    #[test]
    fn scalars_render_and_tables_miss() {
        let dict = Dictionary::parse(SAMPLE).expect("valid toml");
        assert_eq!(dict.lookup("input.size.max").as_deref(), Some("1024"));
        assert_eq!(dict.lookup("input.size"), None);
        assert_eq!(dict.lookup("app.title.extra"), None);
        assert_eq!(dict.lookup("missing"), None);
    }

    #[test]
    fn invalid_toml_is_a_dictionary_error() {
        let err = Dictionary::parse("not = valid = toml").unwrap_err();
        assert!(matches!(err, Error::Dictionary(_)));
    }

    #[test]
    fn interpolation_replaces_every_occurrence() {
        assert_eq!(interpolate("Hi {{name}}", &[("name", "Ana")]), "Hi Ana");
        assert_eq!(interpolate("{{n}} and {{n}}", &[("n", "x")]), "x and x");
    }

    #[test]
    fn unmatched_placeholders_stay_literal() {
        assert_eq!(
            interpolate("Hi {{name}}, {{other}}", &[("name", "Ana")]),
            "Hi Ana, {{other}}"
        );
        assert_eq!(interpolate("Hi {{name}}", &[]), "Hi {{name}}");
    }
}
