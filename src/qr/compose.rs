// SPDX-License-Identifier: MPL-2.0
//! Layered drawing of the final image.
//!
//! Layers, bottom to top: border shadow, border stroke, the QR image clipped
//! to a rounded rectangle, and the icon on a white pad. The canvas is
//! `size + 2 × border_width` pixels square and starts fully transparent.

use super::options::{Border, RenderOptions};
use crate::config::defaults::{ICON_PADDING_PX, SHADOW_ALPHA, SHADOW_BLUR_PX, SHADOW_OFFSET_PX};
use crate::error::{Error, Result};
use image_rs::RgbaImage;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, IntSize, Mask, Paint, Path, PathBuilder, Pixmap,
    PixmapPaint, Rect, Stroke, StrokeDash, Transform,
};

/// Bezier handle length for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Composes every layer for `options` onto a fresh canvas.
pub fn compose(
    options: &RenderOptions,
    symbol: &RgbaImage,
    icon: Option<&RgbaImage>,
) -> Result<Pixmap> {
    let canvas_size = options.canvas_size();
    let mut canvas = Pixmap::new(canvas_size, canvas_size)
        .ok_or_else(|| Error::Render(format!("cannot allocate {canvas_size}px canvas")))?;

    let border = options.border;
    if border.is_visible() {
        let frame = border_frame(options)?;
        let stroke = border_stroke(&border);
        if options.shadow {
            draw_shadow(&mut canvas, &frame, &stroke)?;
        }
        let mut paint = Paint::default();
        paint.set_color(border.color.to_skia());
        paint.anti_alias = true;
        canvas.stroke_path(&frame, &paint, &stroke, Transform::identity(), None);
    }

    draw_symbol(&mut canvas, options, symbol)?;

    if let Some(icon) = icon {
        draw_icon(&mut canvas, options, icon)?;
    }

    Ok(canvas)
}

/// PNG bytes of a canvas.
pub fn encode_png(canvas: &Pixmap) -> Result<Vec<u8>> {
    canvas.encode_png().map_err(|e| Error::Render(e.to_string()))
}

/// Copies a straight-alpha image into a premultiplied pixmap.
pub fn pixmap_from_image(image: &RgbaImage) -> Result<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} pixmap")))?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Rectangle with circular corners. The radius is clamped to half the shorter side.
pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    if r <= 0.0 {
        return Rect::from_xywh(x, y, width, height).map(PathBuilder::from_rect);
    }

    let (right, bottom) = (x + width, y + height);
    let k = KAPPA * r;
    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + k, y, right, y + r - k, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - k, x + r - k, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Square centered in the border band, so the stroke exactly covers it.
fn border_frame(options: &RenderOptions) -> Result<Path> {
    let half = options.border.width.value() as f32 / 2.0;
    let side = options.size.value() as f32 + 2.0 * half;
    Rect::from_xywh(half, half, side, side)
        .map(PathBuilder::from_rect)
        .ok_or_else(|| Error::Render("degenerate border frame".into()))
}

fn border_stroke(border: &Border) -> Stroke {
    Stroke {
        width: border.width.value() as f32,
        dash: StrokeDash::new(border.style.dash_pattern().to_vec(), 0.0),
        ..Stroke::default()
    }
}

/// Blurred, offset copy of the border stroke.
fn draw_shadow(canvas: &mut Pixmap, frame: &Path, stroke: &Stroke) -> Result<()> {
    let (width, height) = (canvas.width(), canvas.height());
    let mut layer = Pixmap::new(width, height)
        .ok_or_else(|| Error::Render("cannot allocate shadow layer".into()))?;
    let mut paint = Paint::default();
    paint.set_color(Color::BLACK);
    paint.anti_alias = true;
    layer.stroke_path(frame, &paint, stroke, Transform::identity(), None);

    // Black stays black under premultiplication, so the raw bytes are valid
    // straight-alpha pixels as well.
    let mut shadow = RgbaImage::from_raw(width, height, layer.take())
        .ok_or_else(|| Error::Render("shadow layer size mismatch".into()))?;
    for pixel in shadow.pixels_mut() {
        pixel.0[3] = (f32::from(pixel.0[3]) * SHADOW_ALPHA).round() as u8;
    }
    let blurred = image_rs::imageops::blur(&shadow, SHADOW_BLUR_PX / 2.0);

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| Error::Render("empty shadow layer".into()))?;
    let shadow = Pixmap::from_vec(blurred.into_raw(), size)
        .ok_or_else(|| Error::Render("invalid shadow pixels".into()))?;

    canvas.draw_pixmap(
        SHADOW_OFFSET_PX,
        SHADOW_OFFSET_PX,
        shadow.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );
    Ok(())
}

fn draw_symbol(canvas: &mut Pixmap, options: &RenderOptions, symbol: &RgbaImage) -> Result<()> {
    let offset = options.border.width.value() as f32;
    let size = options.size.value() as f32;
    let radius = options.border.radius.value() as f32;

    let clip = rounded_rect(offset, offset, size, size, radius)
        .ok_or_else(|| Error::Render("degenerate clip rectangle".into()))?;
    let mut mask = Mask::new(canvas.width(), canvas.height())
        .ok_or_else(|| Error::Render("cannot allocate clip mask".into()))?;
    mask.fill_path(&clip, FillRule::Winding, true, Transform::identity());

    let source = pixmap_from_image(symbol)?;
    let transform = Transform::from_row(
        size / source.width() as f32,
        0.0,
        0.0,
        size / source.height() as f32,
        offset,
        offset,
    );
    canvas.draw_pixmap(0, 0, source.as_ref(), &smooth_paint(), transform, Some(&mask));
    Ok(())
}

fn draw_icon(canvas: &mut Pixmap, options: &RenderOptions, icon: &RgbaImage) -> Result<()> {
    let icon_px = options.icon_size.apply_to(options.size);
    let x = (canvas.width() as f32 - icon_px) / 2.0;
    let y = (canvas.height() as f32 - icon_px) / 2.0;

    if let Some(pad) = Rect::from_xywh(
        x - ICON_PADDING_PX,
        y - ICON_PADDING_PX,
        icon_px + 2.0 * ICON_PADDING_PX,
        icon_px + 2.0 * ICON_PADDING_PX,
    ) {
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        canvas.fill_rect(pad, &paint, Transform::identity(), None);
    }

    let source = pixmap_from_image(icon)?;
    let transform = Transform::from_row(
        icon_px / source.width() as f32,
        0.0,
        0.0,
        icon_px / source.height() as f32,
        x,
        y,
    );
    canvas.draw_pixmap(0, 0, source.as_ref(), &smooth_paint(), transform, None);
    Ok(())
}

fn smooth_paint() -> PixmapPaint {
    PixmapPaint {
        quality: FilterQuality::Bicubic,
        ..PixmapPaint::default()
    }
}
