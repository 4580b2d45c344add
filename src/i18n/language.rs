// SPDX-License-Identifier: MPL-2.0
//! Supported languages and their text direction.

use std::fmt;

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value used for the document `dir` attribute and the body class.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A language the UI ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

impl Language {
    /// Every supported language, English first.
    pub const ALL: [Language; 2] = [Language::English, Language::Arabic];

    /// Language used when nothing else is selected, and as the lookup fallback.
    pub const DEFAULT: Language = Language::English;

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Arabic => "ar",
        }
    }

    /// Exact match against the supported codes.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|lang| lang.code() == code)
    }

    #[must_use]
    pub fn direction(self) -> Direction {
        match self {
            Language::English => Direction::Ltr,
            Language::Arabic => Direction::Rtl,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn unknown_and_regional_codes_are_unsupported() {
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code("en-US"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn arabic_is_right_to_left() {
        assert_eq!(Language::Arabic.direction(), Direction::Rtl);
        assert_eq!(Language::English.direction().as_str(), "ltr");
        assert_eq!(Language::DEFAULT, Language::English);
    }
}
