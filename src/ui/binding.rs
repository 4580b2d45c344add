// SPDX-License-Identifier: MPL-2.0
//! The seam between application logic and whatever renders the page.
//!
//! Controllers never look elements up themselves; they go through
//! [`UiBinding`], which offers three capabilities: reading a field value,
//! writing a field value, and bulk-updating every element carrying a tag.
//! [`crate::ui::document::Document`] is the in-memory implementation.

use crate::i18n::Direction;

/// Attribute marking language-switch controls.
pub const LANG_SWITCH_TAG: &str = "data-lang-switch";

/// Class toggled on the language-switch control matching the current language.
pub const ACTIVE_CLASS: &str = "active";

/// Which property of a tagged element receives a translated string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Plain text content.
    Text,
    /// Raw markup content.
    Markup,
    /// `placeholder` attribute.
    Placeholder,
    /// `title` attribute.
    Title,
    /// `aria-label` attribute.
    AriaLabel,
}

impl Slot {
    pub const ALL: [Slot; 5] = [
        Slot::Text,
        Slot::Markup,
        Slot::Placeholder,
        Slot::Title,
        Slot::AriaLabel,
    ];

    /// Tag attribute whose value names the translation key.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Slot::Text => "data-i18n",
            Slot::Markup => "data-i18n-html",
            Slot::Placeholder => "data-i18n-placeholder",
            Slot::Title => "data-i18n-title",
            Slot::AriaLabel => "data-i18n-aria",
        }
    }

    /// Attribute written for attribute slots; `None` for content slots.
    #[must_use]
    pub fn attribute(self) -> Option<&'static str> {
        match self {
            Slot::Text | Slot::Markup => None,
            Slot::Placeholder => Some("placeholder"),
            Slot::Title => Some("title"),
            Slot::AriaLabel => Some("aria-label"),
        }
    }
}

/// Capabilities the application needs from a rendered page.
///
/// Element lookups use element ids. `root` arguments restrict bulk updates
/// to the subtree of the element with that id; `None` means the whole page.
pub trait UiBinding {
    /// Current value of a form field, `None` when no such element exists.
    fn field_value(&self, id: &str) -> Option<String>;

    /// Replaces the value of a form field.
    fn set_field_value(&mut self, id: &str, value: &str);

    /// Whether a checkbox is checked. Missing elements are unchecked.
    fn is_checked(&self, id: &str) -> bool;

    /// Replaces the text content of an element.
    fn set_text(&mut self, id: &str, text: &str);

    /// Enables or disables a control.
    fn set_disabled(&mut self, id: &str, disabled: bool);

    /// Adds or removes a class on an element.
    fn toggle_class(&mut self, id: &str, class: &str, on: bool);

    /// Sets the document language, direction, and the direction class on the body.
    fn set_locale(&mut self, lang: &str, direction: Direction);

    /// Sets the document title.
    fn set_title(&mut self, title: &str);

    /// Writes `resolve(key)` into `slot` of every element tagged with `slot.tag()`.
    fn fill_tagged(
        &mut self,
        root: Option<&str>,
        slot: Slot,
        resolve: &mut dyn FnMut(&str) -> String,
    );

    /// Toggles `class` on every element tagged with `tag`, on when `predicate(tag value)` holds.
    fn mark_tagged(
        &mut self,
        root: Option<&str>,
        tag: &str,
        class: &str,
        predicate: &mut dyn FnMut(&str) -> bool,
    );
}
