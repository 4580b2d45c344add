// SPDX-License-Identifier: MPL-2.0
//! Generate, restyle and download the QR code.
//!
//! The controller starts idle. The first successful [`QrController::generate`]
//! caches the result and enables the download button; from then on every
//! live option change regenerates from a fresh snapshot of the form.

use super::compose::{compose, encode_png};
use super::encoder::{EncodeRequest, Encoder, QrCodeEncoder};
use super::export::save_png;
use super::icon::read_icon;
use super::options::RenderOptions;
use crate::error::{GenerateError, Result};
use crate::ui::binding::UiBinding;
use crate::ui::form::{Field, CANVAS, DOWNLOAD_BUTTON, HIDDEN_CLASS, ICON_PREVIEW, PLACEHOLDER};
use image_rs::RgbaImage;
use std::path::{Path, PathBuf};
use tiny_skia::Pixmap;

/// Result of an event that may or may not regenerate.
#[derive(Debug)]
pub enum Outcome {
    /// Nothing was rendered.
    Unchanged,
    /// A new image replaced the cached one.
    Rendered,
    /// Generation was attempted and must be reported to the user.
    Alert(GenerateError),
}

impl From<std::result::Result<(), GenerateError>> for Outcome {
    fn from(result: std::result::Result<(), GenerateError>) -> Self {
        match result {
            Ok(()) => Outcome::Rendered,
            Err(e) => Outcome::Alert(e),
        }
    }
}

/// Last successful render.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub options: RenderOptions,
    /// Encoder output before styling.
    pub symbol: RgbaImage,
    pub canvas: Pixmap,
}

pub struct QrController<E: Encoder = QrCodeEncoder> {
    encoder: E,
    icon: Option<RgbaImage>,
    last: Option<Rendered>,
    renders: u64,
}

impl Default for QrController<QrCodeEncoder> {
    fn default() -> Self {
        Self::new(QrCodeEncoder)
    }
}

impl<E: Encoder> QrController<E> {
    pub fn new(encoder: E) -> Self {
        Self {
            encoder,
            icon: None,
            last: None,
            renders: 0,
        }
    }

    /// Whether a result is cached, i.e. option changes regenerate.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.last.is_some()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Rendered> {
        self.last.as_ref()
    }

    /// Number of successful renders so far.
    #[must_use]
    pub fn renders(&self) -> u64 {
        self.renders
    }

    #[must_use]
    pub fn icon(&self) -> Option<&RgbaImage> {
        self.icon.as_ref()
    }

    /// Renders the form's current state.
    ///
    /// Empty (or whitespace-only) text changes nothing. On failure the
    /// previous result, canvas and button state are left as they were.
    pub async fn generate(
        &mut self,
        ui: &mut dyn UiBinding,
    ) -> std::result::Result<(), GenerateError> {
        let options = RenderOptions::read(ui);
        if options.text.is_empty() {
            return Err(GenerateError::EmptyContent);
        }

        let symbol = self
            .encoder
            .encode(EncodeRequest::from(&options))
            .await
            .inspect_err(|e| tracing::error!("QR encoding failed: {e}"))?;
        let canvas = compose(&options, &symbol, self.icon.as_ref())
            .inspect_err(|e| tracing::error!("QR compositing failed: {e}"))?;

        tracing::debug!(
            size = canvas.width(),
            ec = options.error_correction.as_str(),
            border = options.border.style.as_str(),
            "rendered QR code"
        );
        self.last = Some(Rendered {
            options,
            symbol,
            canvas,
        });
        self.renders += 1;

        ui.toggle_class(CANVAS, HIDDEN_CLASS, false);
        ui.toggle_class(PLACEHOLDER, HIDDEN_CLASS, true);
        ui.set_disabled(DOWNLOAD_BUTTON, false);
        Ok(())
    }

    /// Regenerates only when a result is already cached.
    pub async fn regenerate_if_ready(&mut self, ui: &mut dyn UiBinding) -> Outcome {
        if self.is_ready() {
            self.generate(ui).await.into()
        } else {
            Outcome::Unchanged
        }
    }

    /// Reacts to a changed input: refreshes its value label and, for live
    /// fields, regenerates. Text edits are left to the debounce timer.
    pub async fn field_changed(&mut self, field: Field, ui: &mut dyn UiBinding) -> Outcome {
        refresh_value_label(field, ui);
        if field.is_live() {
            self.regenerate_if_ready(ui).await
        } else {
            Outcome::Unchanged
        }
    }

    /// Loads the icon at `path`.
    ///
    /// A file that cannot be read or decoded leaves the current icon in
    /// place and is returned as an error.
    pub async fn load_icon(&mut self, path: &Path, ui: &mut dyn UiBinding) -> Result<Outcome> {
        let icon = read_icon(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        ui.set_field_value(Field::IconUpload.id(), &name);
        ui.set_text(ICON_PREVIEW, &format!("{name} ({}×{})", icon.width(), icon.height()));
        self.icon = Some(icon);
        Ok(self.field_changed(Field::IconUpload, ui).await)
    }

    /// PNG bytes of the cached result.
    pub fn png(&self) -> Result<Option<Vec<u8>>> {
        self.last.as_ref().map(|r| encode_png(&r.canvas)).transpose()
    }

    /// Saves the cached result as `qr-code-<millis>.png` under `dir`.
    /// Returns `None` when nothing has been generated yet.
    pub fn download(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let Some(png) = self.png()? else {
            return Ok(None);
        };
        let path = save_png(dir, &png)?;
        tracing::info!("saved {}", path.display());
        Ok(Some(path))
    }
}

/// Writes every range field's current value into its label.
pub fn refresh_value_labels(ui: &mut dyn UiBinding) {
    for field in Field::RANGES {
        refresh_value_label(field, ui);
    }
}

/// Clamps a range input into its bounds, then shows the clamped value in
/// its label so the label always matches what gets rendered.
fn refresh_value_label(field: Field, ui: &mut dyn UiBinding) {
    let (Some(label), Some(suffix)) = (field.value_label_id(), field.range_suffix()) else {
        return;
    };
    let raw = ui.field_value(field.id());
    let Some(value) = RenderOptions::range_value(field, raw.as_deref()) else {
        return;
    };
    let value = value.to_string();
    if raw.as_deref() != Some(value.as_str()) {
        ui.set_field_value(field.id(), &value);
    }
    ui.set_text(&label, &format!("{value}{suffix}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::error::Error;
    use crate::ui::document::Document;
    use crate::ui::page::qr_studio_page;
    use futures_util::future::{BoxFuture, FutureExt};
    use image_rs::{ImageFormat, Rgba};
    use std::io::Cursor;
    use tempfile::tempdir;

    struct FailingEncoder;

    impl Encoder for FailingEncoder {
        fn encode(&self, _request: EncodeRequest) -> BoxFuture<'static, Result<RgbaImage>> {
            async { Err(Error::Encode("data too long".into())) }.boxed()
        }
    }

    fn page() -> Document {
        qr_studio_page(&RenderConfig::default())
    }

    fn icon_png(dir: &Path) -> PathBuf {
        let path = dir.join("logo.png");
        let img = RgbaImage::from_pixel(8, 8, Rgba([200, 0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        std::fs::write(&path, bytes).expect("write icon");
        path
    }

    #[tokio::test]
    async fn empty_text_changes_nothing() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "   ");
        let mut controller = QrController::default();

        let result = controller.generate(&mut ui).await;

        assert!(matches!(result, Err(GenerateError::EmptyContent)));
        assert!(!controller.is_ready());
        assert!(ui.is_disabled(DOWNLOAD_BUTTON));
        assert!(!ui.has_class(PLACEHOLDER, HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn whitespace_text_keeps_cached_result() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::default();
        controller.generate(&mut ui).await.expect("generates");
        let png = controller.png().expect("encodes");

        ui.set_field_value(Field::Text.id(), "   ");
        let result = controller.generate(&mut ui).await;

        assert!(matches!(result, Err(GenerateError::EmptyContent)));
        assert_eq!(controller.png().expect("encodes"), png);
        assert_eq!(controller.renders(), 1);
        assert!(!ui.is_disabled(DOWNLOAD_BUTTON));
        assert!(ui.has_class(PLACEHOLDER, HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn successful_generate_reveals_result() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "  https://example.com  ");
        let mut controller = QrController::default();

        controller.generate(&mut ui).await.expect("generates");

        let last = controller.last().expect("cached");
        assert_eq!(last.options.text, "https://example.com");
        assert_eq!(last.canvas.width(), last.options.canvas_size());
        assert_eq!(last.symbol.width(), last.options.size.value());
        assert!(!ui.is_disabled(DOWNLOAD_BUTTON));
        assert!(ui.has_class(PLACEHOLDER, HIDDEN_CLASS));
        assert!(!ui.has_class(CANVAS, HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn failed_encoding_keeps_previous_state() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::new(FailingEncoder);

        let result = controller.generate(&mut ui).await;

        assert!(matches!(result, Err(GenerateError::Failed(Error::Encode(_)))));
        assert!(!controller.is_ready());
        assert!(ui.is_disabled(DOWNLOAD_BUTTON));
    }

    #[tokio::test]
    async fn live_fields_regenerate_only_once_ready() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::default();

        ui.set_field_value(Field::Size.id(), "400");
        assert!(matches!(
            controller.field_changed(Field::Size, &mut ui).await,
            Outcome::Unchanged
        ));
        assert_eq!(controller.renders(), 0);

        controller.generate(&mut ui).await.expect("generates");
        ui.set_field_value(Field::BorderStyle.id(), "dashed");
        ui.set_field_value(Field::BorderWidth.id(), "8");
        assert!(matches!(
            controller.field_changed(Field::BorderWidth, &mut ui).await,
            Outcome::Rendered
        ));

        assert_eq!(controller.renders(), 2);
        assert_eq!(controller.last().map(|r| r.canvas.width()), Some(416));
    }

    #[tokio::test]
    async fn text_changes_are_not_live() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::default();
        controller.generate(&mut ui).await.expect("generates");

        ui.set_field_value(Field::Text.id(), "hello again");
        let outcome = controller.field_changed(Field::Text, &mut ui).await;

        assert!(matches!(outcome, Outcome::Unchanged));
        assert_eq!(controller.renders(), 1);
    }

    #[tokio::test]
    async fn range_labels_follow_values() {
        let mut ui = page();
        let mut controller = QrController::default();

        ui.set_field_value(Field::IconSize.id(), "25");
        controller.field_changed(Field::IconSize, &mut ui).await;
        ui.set_field_value(Field::Margin.id(), "2");
        controller.field_changed(Field::Margin, &mut ui).await;

        assert_eq!(ui.text("icon-size-value").as_deref(), Some("25%"));
        assert_eq!(ui.text("margin-value").as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn out_of_range_values_are_clamped_in_form_and_label() {
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::default();
        controller.generate(&mut ui).await.expect("generates");

        ui.set_field_value(Field::Size.id(), "5000");
        controller.field_changed(Field::Size, &mut ui).await;

        assert_eq!(ui.text("qr-size-value").as_deref(), Some("1024px"));
        assert_eq!(ui.field_value(Field::Size.id()).as_deref(), Some("1024"));
        assert_eq!(controller.last().map(|r| r.canvas.width()), Some(1024));

        ui.set_field_value(Field::IconSize.id(), "2");
        controller.field_changed(Field::IconSize, &mut ui).await;
        assert_eq!(ui.text("icon-size-value").as_deref(), Some("5%"));
    }

    #[tokio::test]
    async fn icon_upload_regenerates_and_bad_file_keeps_icon() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut ui = page();
        ui.set_field_value(Field::Text.id(), "hello");
        let mut controller = QrController::default();
        controller.generate(&mut ui).await.expect("generates");

        let outcome = controller
            .load_icon(&icon_png(dir.path()), &mut ui)
            .await
            .expect("icon loads");
        assert!(matches!(outcome, Outcome::Rendered));
        assert!(controller.icon().is_some());
        assert_eq!(ui.text(ICON_PREVIEW).as_deref(), Some("logo.png (8×8)"));

        let bogus = dir.path().join("bogus.png");
        std::fs::write(&bogus, b"nope").expect("write bogus");
        assert!(controller.load_icon(&bogus, &mut ui).await.is_err());
        assert_eq!(controller.icon().map(RgbaImage::width), Some(8));
        assert_eq!(controller.renders(), 2);
    }

    #[tokio::test]
    async fn download_requires_a_result() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut ui = page();
        let mut controller = QrController::default();

        assert!(controller.download(dir.path()).expect("no-op").is_none());

        ui.set_field_value(Field::Text.id(), "hello");
        controller.generate(&mut ui).await.expect("generates");
        let path = controller.download(dir.path()).expect("saves").expect("has path");

        let bytes = std::fs::read(&path).expect("read back");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
