// SPDX-License-Identifier: MPL-2.0
//! In-memory element tree implementing [`UiBinding`].
//!
//! The tree models what the controllers need from a page and nothing more:
//! ids, attributes, classes, a text or markup body, form values and the
//! disabled flag.

use super::binding::{Slot, UiBinding};
use crate::i18n::Direction;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

/// Body of an element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    kind: String,
    id: Option<String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    content: Content,
    value: Option<String>,
    checked: bool,
    disabled: bool,
    children: Vec<Element>,
}

impl Element {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets an attribute. Translation tags are plain attributes.
    #[must_use]
    pub fn tag(self, name: &str, value: &str) -> Self {
        self.attr(name, value)
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.content = Content::Text(text.to_string());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Element>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn find(&self, id: &str) -> Option<&Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let _ = write!(out, "{}{}", "  ".repeat(depth), self.kind);
        if let Some(id) = &self.id {
            let _ = write!(out, "#{id}");
        }
        for class in &self.classes {
            let _ = write!(out, ".{class}");
        }
        for name in ["placeholder", "title", "aria-label"] {
            if let Some(value) = self.attribute(name) {
                let _ = write!(out, " [{name}={value:?}]");
            }
        }
        if let Some(value) = &self.value {
            let _ = write!(out, " = {value:?}");
        }
        if self.checked {
            out.push_str(" (checked)");
        }
        if self.disabled {
            out.push_str(" (disabled)");
        }
        match &self.content {
            Content::Empty => {}
            Content::Text(text) | Content::Markup(text) => {
                let _ = write!(out, " {text:?}");
            }
        }
        out.push('\n');
        for child in &self.children {
            child.write_outline(depth + 1, out);
        }
    }
}

/// A page: document-level locale state plus the body tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lang: String,
    direction: Direction,
    title: String,
    body_classes: BTreeSet<String>,
    body: Element,
}

impl Document {
    pub fn new(body: Element) -> Self {
        Self {
            lang: String::new(),
            direction: Direction::Ltr,
            title: String::new(),
            body_classes: BTreeSet::new(),
            body,
        }
    }

    pub fn lang(&self) -> &str {
        &self.lang
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.body.find(id)
    }

    /// Text or markup body of an element.
    pub fn text(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|el| match &el.content {
            Content::Empty => None,
            Content::Text(s) | Content::Markup(s) => Some(s.clone()),
        })
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id)
            .and_then(|el| el.attribute(name))
            .map(str::to_string)
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.classes.contains(class))
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.element(id).is_some_and(|el| el.disabled)
    }

    /// Replaces the body of an element with markup.
    pub fn set_markup(&mut self, id: &str, markup: &str) {
        if let Some(el) = self.body.find_mut(id) {
            el.content = Content::Markup(markup.to_string());
        }
    }

    /// Sets the checked state of a checkbox.
    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(el) = self.body.find_mut(id) {
            el.checked = checked;
        }
    }

    /// Indented, human-readable dump of the page.
    pub fn outline(&self) -> String {
        let mut out = format!(
            "<{} dir={}> {:?}\n",
            self.lang,
            self.direction.as_str(),
            self.title
        );
        self.body.write_outline(0, &mut out);
        out
    }

    fn subtree_mut(&mut self, root: Option<&str>) -> Option<&mut Element> {
        match root {
            Some(id) => self.body.find_mut(id),
            None => Some(&mut self.body),
        }
    }
}

impl UiBinding for Document {
    fn field_value(&self, id: &str) -> Option<String> {
        self.element(id).and_then(|el| el.value.clone())
    }

    fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(el) = self.body.find_mut(id) {
            el.value = Some(value.to_string());
        }
    }

    fn is_checked(&self, id: &str) -> bool {
        self.element(id).is_some_and(|el| el.checked)
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(el) = self.body.find_mut(id) {
            el.content = Content::Text(text.to_string());
        }
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(el) = self.body.find_mut(id) {
            el.disabled = disabled;
        }
    }

    fn toggle_class(&mut self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.body.find_mut(id) {
            if on {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        }
    }

    fn set_locale(&mut self, lang: &str, direction: Direction) {
        self.lang = lang.to_string();
        self.direction = direction;
        self.body_classes.remove(Direction::Ltr.as_str());
        self.body_classes.remove(Direction::Rtl.as_str());
        self.body_classes.insert(direction.as_str().to_string());
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn fill_tagged(
        &mut self,
        root: Option<&str>,
        slot: Slot,
        resolve: &mut dyn FnMut(&str) -> String,
    ) {
        let Some(subtree) = self.subtree_mut(root) else {
            return;
        };
        subtree.visit_mut(&mut |el| {
            let Some(key) = el.attributes.get(slot.tag()).cloned() else {
                return;
            };
            let value = resolve(&key);
            match slot.attribute() {
                Some(attribute) => {
                    el.attributes.insert(attribute.to_string(), value);
                }
                None if slot == Slot::Markup => el.content = Content::Markup(value),
                None => el.content = Content::Text(value),
            }
        });
    }

    fn mark_tagged(
        &mut self,
        root: Option<&str>,
        tag: &str,
        class: &str,
        predicate: &mut dyn FnMut(&str) -> bool,
    ) {
        let Some(subtree) = self.subtree_mut(root) else {
            return;
        };
        subtree.visit_mut(&mut |el| {
            let Some(value) = el.attributes.get(tag).cloned() else {
                return;
            };
            if predicate(&value) {
                el.classes.insert(class.to_string());
            } else {
                el.classes.remove(class);
            }
        });
    }
}
