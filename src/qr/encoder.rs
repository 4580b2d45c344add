// SPDX-License-Identifier: MPL-2.0
//! Turning text into a square QR image.
//!
//! The symbol itself comes from the `qrcode` crate; this module only paints
//! its modules into an image of the requested size, quiet zone included.

use super::options::{ErrorCorrection, Margin, QrSize, RenderOptions, Rgb};
use crate::error::Result;
use futures_util::future::{BoxFuture, FutureExt};
use image_rs::RgbaImage;
use qrcode::{Color, EcLevel, QrCode};

/// What the encoder needs from the render options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeRequest {
    pub text: String,
    pub size: QrSize,
    pub margin: Margin,
    pub error_correction: ErrorCorrection,
    pub foreground: Rgb,
    pub background: Rgb,
}

impl From<&RenderOptions> for EncodeRequest {
    fn from(options: &RenderOptions) -> Self {
        Self {
            text: options.text.clone(),
            size: options.size,
            margin: options.margin,
            error_correction: options.error_correction,
            foreground: options.foreground,
            background: options.background,
        }
    }
}

/// Produces the QR image for a request. Completion is signalled by the
/// returned future; there is no polling.
pub trait Encoder: Send + Sync {
    fn encode(&self, request: EncodeRequest) -> BoxFuture<'static, Result<RgbaImage>>;
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl Encoder for QrCodeEncoder {
    fn encode(&self, request: EncodeRequest) -> BoxFuture<'static, Result<RgbaImage>> {
        async move { render_symbol(&request) }.boxed()
    }
}

/// Level for an ordinal: 0=L, 1=M, 2=Q, 3=H. Out of range is M.
#[must_use]
pub fn ec_level(ordinal: u8) -> EcLevel {
    match ordinal {
        0 => EcLevel::L,
        2 => EcLevel::Q,
        3 => EcLevel::H,
        _ => EcLevel::M,
    }
}

/// Paints the symbol for `request` into a `size × size` image.
///
/// The symbol plus `margin` light modules on each side is stretched over the
/// whole image; each pixel takes the color of the module it falls in.
pub fn render_symbol(request: &EncodeRequest) -> Result<RgbaImage> {
    let code = QrCode::with_error_correction_level(
        request.text.as_bytes(),
        ec_level(request.error_correction.ordinal()),
    )?;
    let modules = code.width() as u64;
    let colors = code.to_colors();
    let margin = u64::from(request.margin.value());
    let span = modules + 2 * margin;
    let size = request.size.value();
    let dark = request.foreground.to_rgba();
    let light = request.background.to_rgba();

    let module_at = |pixel: u32| u64::from(pixel) * span / u64::from(size);
    let symbol = margin..margin + modules;

    Ok(RgbaImage::from_fn(size, size, |x, y| {
        let (mx, my) = (module_at(x), module_at(y));
        let inside = symbol.contains(&mx) && symbol.contains(&my);
        if !inside {
            return light;
        }
        let index = ((my - margin) * modules + (mx - margin)) as usize;
        match colors[index] {
            Color::Dark => dark,
            Color::Light => light,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> EncodeRequest {
        EncodeRequest {
            text: text.to_string(),
            size: QrSize::new(210),
            margin: Margin::new(4),
            error_correction: ErrorCorrection::M,
            foreground: Rgb([10, 20, 30]),
            background: Rgb([250, 240, 230]),
        }
    }

    #[test]
    fn ordinals_map_to_levels() {
        assert_eq!(ec_level(0), EcLevel::L);
        assert_eq!(ec_level(1), EcLevel::M);
        assert_eq!(ec_level(2), EcLevel::Q);
        assert_eq!(ec_level(3), EcLevel::H);
        assert_eq!(ec_level(9), EcLevel::M);
    }

    #[test]
    fn image_has_requested_size_and_quiet_zone() {
        let img = render_symbol(&request("hello")).expect("encodes");
        assert_eq!(img.dimensions(), (210, 210));
        // Corner pixels sit in the quiet zone.
        assert_eq!(*img.get_pixel(0, 0), Rgb([250, 240, 230]).to_rgba());
        assert_eq!(*img.get_pixel(209, 209), Rgb([250, 240, 230]).to_rgba());
    }

    #[test]
    fn finder_pattern_uses_foreground() {
        // Version 1 is 21 modules; with a 4-module margin the span is 29.
        let img = render_symbol(&request("hello")).expect("encodes");
        let module_px: f64 = 210.0 / 29.0;
        let first_dark = (4.0 * module_px).ceil() as u32;
        assert_eq!(*img.get_pixel(first_dark, first_dark), Rgb([10, 20, 30]).to_rgba());
    }

    #[test]
    fn zero_margin_fills_the_image_with_the_symbol() {
        let mut req = request("hello");
        req.margin = Margin::new(0);
        let img = render_symbol(&req).expect("encodes");
        assert_eq!(*img.get_pixel(0, 0), Rgb([10, 20, 30]).to_rgba());
    }

    #[test]
    fn oversized_payload_fails() {
        let mut req = request(&"x".repeat(5000));
        req.error_correction = ErrorCorrection::H;
        assert!(render_symbol(&req).is_err());
    }

    #[tokio::test]
    async fn encoder_future_resolves_to_same_image() {
        let req = request("same input");
        let a = QrCodeEncoder.encode(req.clone()).await.expect("encodes");
        let b = render_symbol(&req).expect("encodes");
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
