// SPDX-License-Identifier: MPL-2.0
//! Render configuration value objects.
//!
//! Every value read from the form is parsed into one of these types. Numeric
//! values are clamped into their documented bounds on construction, so the
//! encoder and the compositor never need to validate their inputs again.

use crate::config::defaults::*;
use crate::ui::binding::UiBinding;
use crate::ui::form::Field;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================================================
// Bounded Numbers
// ==========================================================================

macro_rules! bounded_u32 {
    ($(#[$meta:meta])* $name:ident, $min:expr, $max:expr, $default:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(u32);

        impl $name {
            /// Creates a new value, clamping it to the valid range.
            #[must_use]
            pub fn new(value: u32) -> Self {
                Self(value.clamp($min, $max))
            }

            /// Parses a form value, falling back to the default when it is not an integer.
            #[must_use]
            pub fn parse(raw: Option<&str>) -> Self {
                raw.and_then(|s| s.trim().parse::<i64>().ok())
                    .map(|v| Self::new(v.clamp(0, u32::MAX as i64) as u32))
                    .unwrap_or_default()
            }

            /// Returns the raw value.
            #[must_use]
            pub fn value(self) -> u32 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }
    };
}

bounded_u32!(
    /// QR image edge length in pixels.
    QrSize,
    MIN_QR_SIZE_PX,
    MAX_QR_SIZE_PX,
    DEFAULT_QR_SIZE_PX
);

bounded_u32!(
    /// Quiet zone around the symbol, in modules.
    Margin,
    0,
    MAX_MARGIN_MODULES,
    DEFAULT_MARGIN_MODULES
);

bounded_u32!(
    /// Border stroke width in pixels.
    BorderWidth,
    0,
    MAX_BORDER_WIDTH_PX,
    DEFAULT_BORDER_WIDTH_PX
);

bounded_u32!(
    /// Corner radius of the QR clip rectangle in pixels.
    BorderRadius,
    0,
    MAX_BORDER_RADIUS_PX,
    DEFAULT_BORDER_RADIUS_PX
);

bounded_u32!(
    /// Icon edge length as a percentage of the QR size.
    IconPercent,
    MIN_ICON_SIZE_PERCENT,
    MAX_ICON_SIZE_PERCENT,
    DEFAULT_ICON_SIZE_PERCENT
);

impl IconPercent {
    /// Icon edge length in pixels for a QR image of `size`.
    #[must_use]
    pub fn apply_to(self, size: QrSize) -> f32 {
        size.value() as f32 * self.0 as f32 / 100.0
    }
}

// ==========================================================================
// Color
// ==========================================================================

/// An opaque RGB color written as `#rrggbb` or `#rgb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    /// Parses a form value, falling back to `default` when it is not a hex color.
    #[must_use]
    pub fn parse_or(raw: Option<&str>, default: Rgb) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or(default)
    }

    #[must_use]
    pub fn to_skia(self) -> tiny_skia::Color {
        let [r, g, b] = self.0;
        tiny_skia::Color::from_rgba8(r, g, b, 255)
    }

    #[must_use]
    pub fn to_rgba(self) -> image_rs::Rgba<u8> {
        let [r, g, b] = self.0;
        image_rs::Rgba([r, g, b, 255])
    }
}

impl FromStr for Rgb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| format!("color must start with '#': {s}"))?;
        let digit = |c: char| c.to_digit(16).map(|d| d as u8);
        let digits: Option<Vec<u8>> = hex.chars().map(digit).collect();
        let digits = digits.ok_or_else(|| format!("invalid hex digit in color: {s}"))?;

        match digits.as_slice() {
            [r, g, b] => Ok(Rgb([r * 17, g * 17, b * 17])),
            [r1, r2, g1, g2, b1, b2] => Ok(Rgb([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2])),
            _ => Err(format!("color must have 3 or 6 hex digits: {s}")),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

// ==========================================================================
// Error Correction
// ==========================================================================

/// Error-correction level of the QR symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    /// Maps a form selection to a level. Anything unrecognized is `M`.
    #[must_use]
    pub fn from_selection(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("L") => ErrorCorrection::L,
            Some("Q") => ErrorCorrection::Q,
            Some("H") => ErrorCorrection::H,
            _ => ErrorCorrection::M,
        }
    }

    /// Ordinal handed to the encoder: L=0, M=1, Q=2, H=3.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            ErrorCorrection::L => 0,
            ErrorCorrection::M => 1,
            ErrorCorrection::Q => 2,
            ErrorCorrection::H => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }
}

// ==========================================================================
// Border Style
// ==========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    /// Maps a form selection to a style. Unknown names draw a solid line.
    #[must_use]
    pub fn from_selection(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("none") | None => BorderStyle::None,
            Some("dashed") => BorderStyle::Dashed,
            Some("dotted") => BorderStyle::Dotted,
            Some("double") => BorderStyle::Double,
            Some(_) => BorderStyle::Solid,
        }
    }

    /// Dash intervals (on, off) for the stroke; empty means a continuous line.
    #[must_use]
    pub fn dash_pattern(self) -> &'static [f32] {
        match self {
            BorderStyle::Dashed => &[10.0, 5.0],
            BorderStyle::Dotted => &[2.0, 3.0],
            BorderStyle::None | BorderStyle::Solid | BorderStyle::Double => &[],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            BorderStyle::None => "none",
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::Double => "double",
        }
    }
}

// ==========================================================================
// Render Options
// ==========================================================================

/// Border decoration drawn around the QR image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    pub width: BorderWidth,
    pub color: Rgb,
    pub radius: BorderRadius,
}

impl Border {
    /// Whether a stroke is drawn at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width.value() > 0
    }
}

/// Snapshot of every user-chosen rendering value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub text: String,
    pub size: QrSize,
    pub margin: Margin,
    pub error_correction: ErrorCorrection,
    pub foreground: Rgb,
    pub background: Rgb,
    pub border: Border,
    pub shadow: bool,
    pub icon_size: IconPercent,
}

impl RenderOptions {
    /// Reads a fresh snapshot from the form.
    pub fn read(ui: &dyn UiBinding) -> Self {
        let value = |field: Field| ui.field_value(field.id());

        Self {
            text: value(Field::Text).unwrap_or_default().trim().to_string(),
            size: QrSize::parse(value(Field::Size).as_deref()),
            margin: Margin::parse(value(Field::Margin).as_deref()),
            error_correction: ErrorCorrection::from_selection(
                value(Field::ErrorCorrection).as_deref(),
            ),
            foreground: Rgb::parse_or(value(Field::Foreground).as_deref(), Rgb::BLACK),
            background: Rgb::parse_or(value(Field::Background).as_deref(), Rgb::WHITE),
            border: Border {
                style: BorderStyle::from_selection(value(Field::BorderStyle).as_deref()),
                width: BorderWidth::parse(value(Field::BorderWidth).as_deref()),
                color: Rgb::parse_or(value(Field::BorderColor).as_deref(), Rgb::BLACK),
                radius: BorderRadius::parse(value(Field::BorderRadius).as_deref()),
            },
            shadow: ui.is_checked(Field::Shadow.id()),
            icon_size: IconPercent::parse(value(Field::IconSize).as_deref()),
        }
    }

    /// The value a range input actually holds once clamped into its bounds.
    /// `None` for fields that are not ranges.
    #[must_use]
    pub fn range_value(field: Field, raw: Option<&str>) -> Option<u32> {
        let value = match field {
            Field::Size => QrSize::parse(raw).value(),
            Field::Margin => Margin::parse(raw).value(),
            Field::BorderWidth => BorderWidth::parse(raw).value(),
            Field::BorderRadius => BorderRadius::parse(raw).value(),
            Field::IconSize => IconPercent::parse(raw).value(),
            _ => return None,
        };
        Some(value)
    }

    /// Edge length of the output canvas: the QR image plus the border band on each side.
    #[must_use]
    pub fn canvas_size(&self) -> u32 {
        self.size.value() + 2 * self.border.width.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_values_clamp_and_default() {
        assert_eq!(QrSize::new(10).value(), MIN_QR_SIZE_PX);
        assert_eq!(QrSize::new(5000).value(), MAX_QR_SIZE_PX);
        assert_eq!(QrSize::parse(Some("256")).value(), 256);
        assert_eq!(QrSize::parse(Some("abc")), QrSize::default());
        assert_eq!(Margin::parse(Some("-3")).value(), 0);
        assert_eq!(IconPercent::parse(None), IconPercent::default());
    }

    #[test]
    fn range_values_use_each_fields_bounds() {
        assert_eq!(RenderOptions::range_value(Field::Size, Some("5000")), Some(MAX_QR_SIZE_PX));
        assert_eq!(RenderOptions::range_value(Field::IconSize, Some("1")), Some(5));
        assert_eq!(RenderOptions::range_value(Field::Margin, Some("x")), Some(4));
        assert_eq!(RenderOptions::range_value(Field::Text, Some("12")), None);
    }

    #[test]
    fn icon_percent_scales_with_size() {
        let px = IconPercent::new(20).apply_to(QrSize::new(300));
        assert!((px - 60.0).abs() < f32::EPSILON);
    }

    #[test]
    fn parses_long_and_short_hex_colors() {
        assert_eq!("#ff8000".parse::<Rgb>(), Ok(Rgb([255, 128, 0])));
        assert_eq!("#F80".parse::<Rgb>(), Ok(Rgb([255, 136, 0])));
        assert!("ff8000".parse::<Rgb>().is_err());
        assert!("#ff80".parse::<Rgb>().is_err());
        assert!("#gg0000".parse::<Rgb>().is_err());
    }

    #[test]
    fn invalid_color_falls_back() {
        assert_eq!(Rgb::parse_or(Some("red"), Rgb::WHITE), Rgb::WHITE);
        assert_eq!(Rgb([1, 2, 3]).to_string(), "#010203");
    }

    #[test]
    fn error_correction_maps_to_ordinals() {
        let levels = ["L", "M", "Q", "H"]
            .map(|s| ErrorCorrection::from_selection(Some(s)).ordinal());
        assert_eq!(levels, [0, 1, 2, 3]);
        assert_eq!(ErrorCorrection::from_selection(Some("X")), ErrorCorrection::M);
        assert_eq!(ErrorCorrection::from_selection(None).ordinal(), 1);
    }

    #[test]
    fn border_style_dash_patterns() {
        assert_eq!(BorderStyle::Dashed.dash_pattern(), &[10.0, 5.0]);
        assert_eq!(BorderStyle::Dotted.dash_pattern(), &[2.0, 3.0]);
        assert!(BorderStyle::Solid.dash_pattern().is_empty());
        assert_eq!(BorderStyle::from_selection(Some("groove")), BorderStyle::Solid);
        assert_eq!(BorderStyle::from_selection(None), BorderStyle::None);
    }

    #[test]
    fn border_visibility_requires_style_and_width() {
        let mut border = Border {
            style: BorderStyle::Solid,
            width: BorderWidth::new(0),
            color: Rgb::BLACK,
            radius: BorderRadius::default(),
        };
        assert!(!border.is_visible());
        border.width = BorderWidth::new(4);
        assert!(border.is_visible());
        border.style = BorderStyle::None;
        assert!(!border.is_visible());
    }
}
