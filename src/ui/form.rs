// SPDX-License-Identifier: MPL-2.0
//! Form fields consumed by the QR controller, addressed by element id.

/// A form input read at generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Text,
    Size,
    Margin,
    IconSize,
    BorderRadius,
    BorderWidth,
    Foreground,
    Background,
    BorderColor,
    ErrorCorrection,
    BorderStyle,
    Shadow,
    IconUpload,
}

/// Id of the download button, enabled once a result is cached.
pub const DOWNLOAD_BUTTON: &str = "download-btn";

/// Id of the generate button.
pub const GENERATE_BUTTON: &str = "generate-btn";

/// Id of the canvas showing the rendered result.
pub const CANVAS: &str = "qr-canvas";

/// Id of the placeholder shown until the first QR code is rendered.
pub const PLACEHOLDER: &str = "qr-placeholder";

/// Id of the element previewing the uploaded icon.
pub const ICON_PREVIEW: &str = "icon-preview";

/// Class hiding an element.
pub const HIDDEN_CLASS: &str = "hidden";

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Text,
        Field::Size,
        Field::Margin,
        Field::IconSize,
        Field::BorderRadius,
        Field::BorderWidth,
        Field::Foreground,
        Field::Background,
        Field::BorderColor,
        Field::ErrorCorrection,
        Field::BorderStyle,
        Field::Shadow,
        Field::IconUpload,
    ];

    /// Range inputs, each paired with a `<id>-value` label.
    pub const RANGES: [Field; 5] = [
        Field::Size,
        Field::Margin,
        Field::IconSize,
        Field::BorderRadius,
        Field::BorderWidth,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Field::Text => "qr-text",
            Field::Size => "qr-size",
            Field::Margin => "margin",
            Field::IconSize => "icon-size",
            Field::BorderRadius => "border-radius",
            Field::BorderWidth => "border-width",
            Field::Foreground => "foreground-color",
            Field::Background => "background-color",
            Field::BorderColor => "border-color",
            Field::ErrorCorrection => "error-correction",
            Field::BorderStyle => "border-style",
            Field::Shadow => "shadow",
            Field::IconUpload => "icon-upload",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.id() == id)
    }

    /// Whether a change regenerates immediately when a result is cached.
    /// The text field is debounced instead.
    #[must_use]
    pub fn is_live(self) -> bool {
        self != Field::Text
    }

    /// Unit shown after a range value in its label, `None` for non-range fields.
    #[must_use]
    pub fn range_suffix(self) -> Option<&'static str> {
        match self {
            Field::Size | Field::BorderRadius | Field::BorderWidth => Some("px"),
            Field::Margin => Some(""),
            Field::IconSize => Some("%"),
            _ => None,
        }
    }

    /// Id of the label showing a range value.
    #[must_use]
    pub fn value_label_id(self) -> Option<String> {
        self.range_suffix().map(|_| format!("{}-value", self.id()))
    }
}
