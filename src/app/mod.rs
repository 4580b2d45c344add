// SPDX-License-Identifier: MPL-2.0
//! Application root: owns the page, the translator and the QR controller,
//! and turns user events into their side effects.
//!
//! Events arrive on an unbounded channel. The text field's debounce timer
//! feeds the same channel, so every state change happens on one task.

pub mod command;
pub mod paths;

pub use command::{parse_command, USAGE};

use crate::config::defaults::TEXT_DEBOUNCE_MS;
use crate::error::GenerateError;
use crate::i18n::Translator;
use crate::qr::controller::refresh_value_labels;
use crate::qr::debounce::Debouncer;
use crate::qr::{Encoder, Outcome, QrCodeEncoder, QrController};
use crate::ui::binding::UiBinding;
use crate::ui::document::Document;
use crate::ui::form::Field;
use crate::ui::notifications::{Notification, Notifier, Severity};
use std::fmt;
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Everything the user (or a timer) can ask the application to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Generate,
    Download,
    /// A form input changed. Checkboxes take `true`/`false`, `on`/`off` or `1`/`0`.
    SetField(Field, String),
    /// The text field has been quiet for the debounce period. Carries the
    /// edit count it was scheduled for; a stale count is ignored.
    TextSettled(u64),
    UploadIcon(PathBuf),
    SwitchLanguage(String),
    Show,
    Help,
    UnknownCommand(String),
    Quit,
}

pub struct App<E: Encoder = QrCodeEncoder> {
    page: Document,
    translator: Translator,
    controller: QrController<E>,
    notifier: Box<dyn Notifier>,
    output_dir: PathBuf,
    debouncer: Debouncer<Event>,
    /// Bumped on every text edit and every explicit generate.
    text_edits: u64,
    sender: UnboundedSender<Event>,
    inbox: UnboundedReceiver<Event>,
}

impl<E: Encoder> fmt::Debug for App<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("lang", &self.translator.lang())
            .field("ready", &self.controller.is_ready())
            .field("output_dir", &self.output_dir)
            .finish_non_exhaustive()
    }
}

impl<E: Encoder> App<E> {
    pub fn new(
        page: Document,
        translator: Translator,
        encoder: E,
        notifier: impl Notifier + 'static,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let (sender, inbox) = mpsc::unbounded_channel();
        Self {
            page,
            translator,
            controller: QrController::new(encoder),
            notifier: Box::new(notifier),
            output_dir: output_dir.into(),
            debouncer: Debouncer::new(Duration::from_millis(TEXT_DEBOUNCE_MS), sender.clone()),
            text_edits: 0,
            sender,
            inbox,
        }
    }

    /// Handle for feeding events from other tasks.
    #[must_use]
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.sender.clone()
    }

    #[must_use]
    pub fn page(&self) -> &Document {
        &self.page
    }

    #[must_use]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    #[must_use]
    pub fn controller(&self) -> &QrController<E> {
        &self.controller
    }

    /// Translates the page and fills the range labels.
    pub async fn start(&mut self) {
        self.translator.init(&mut self.page).await;
        refresh_value_labels(&mut self.page);
    }

    /// Handles events until [`Event::Quit`].
    pub async fn run(&mut self) {
        while let Some(event) = self.next_event().await {
            if self.handle(event).await.is_break() {
                break;
            }
        }
        self.debouncer.cancel();
        self.translator.teardown();
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.inbox.recv().await
    }

    /// An already queued event, without waiting.
    pub fn try_next_event(&mut self) -> Option<Event> {
        self.inbox.try_recv().ok()
    }

    /// Handles one event when the caller does not drive a loop and has no
    /// use for [`Event::Quit`].
    pub async fn dispatch(&mut self, event: Event) {
        if self.handle(event).await.is_break() {
            tracing::debug!("quit outside the event loop");
        }
    }

    pub async fn handle(&mut self, event: Event) -> ControlFlow<()> {
        tracing::debug!(?event, "handling event");
        match event {
            Event::Generate => {
                self.debouncer.cancel();
                // A settle already queued must not render the same text again.
                self.text_edits += 1;
                let outcome = self.controller.generate(&mut self.page).await.into();
                self.report(outcome);
            }
            Event::Download => self.download(),
            Event::SetField(Field::Text, value) => {
                self.page.set_field_value(Field::Text.id(), &value);
                self.text_edits += 1;
                self.debouncer.schedule(Event::TextSettled(self.text_edits));
            }
            Event::SetField(Field::IconUpload, value) => {
                self.upload_icon(PathBuf::from(value)).await;
            }
            Event::SetField(Field::Shadow, value) => {
                self.page.set_checked(Field::Shadow.id(), parse_flag(&value));
                let outcome = self.controller.field_changed(Field::Shadow, &mut self.page).await;
                self.report(outcome);
            }
            Event::SetField(field, value) => {
                self.page.set_field_value(field.id(), &value);
                let outcome = self.controller.field_changed(field, &mut self.page).await;
                self.report(outcome);
            }
            Event::TextSettled(edits) if edits != self.text_edits => {
                tracing::debug!(edits, current = self.text_edits, "stale text settle skipped");
            }
            Event::TextSettled(_) => {
                let outcome = self.controller.regenerate_if_ready(&mut self.page).await;
                self.report(outcome);
            }
            Event::UploadIcon(path) => self.upload_icon(path).await,
            Event::SwitchLanguage(code) => {
                self.translator.set_lang(&code, &mut self.page).await;
                let name = self.translator.tr(&format!("language.{}", self.translator.lang()));
                self.notify(Notification::info("status.languageChanged").with_arg("lang", name));
            }
            Event::Show => {
                let outline = self.page.outline();
                self.notifier.notify(Severity::Info, &outline);
            }
            Event::Help => {
                self.notifier.notify(Severity::Info, USAGE.trim_end());
            }
            Event::UnknownCommand(command) => {
                self.notify(
                    Notification::warning("status.unknownCommand").with_arg("command", command),
                );
            }
            Event::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn download(&mut self) {
        match self.controller.download(&self.output_dir) {
            Ok(Some(path)) => {
                let path = path.display().to_string();
                self.notify(Notification::success("status.saved").with_arg("path", path));
            }
            Ok(None) => self.notify(Notification::info("status.nothingToDownload")),
            Err(e) => {
                tracing::error!("download failed: {e}");
                let reason = e.to_string();
                self.notify(
                    Notification::error("alert.downloadError")
                        .with_arg("reason", reason.clone())
                        .with_fallback(format!("Could not save the QR code: {reason}")),
                );
            }
        }
    }

    async fn upload_icon(&mut self, path: PathBuf) {
        match self.controller.load_icon(&path, &mut self.page).await {
            Ok(outcome) => self.report(outcome),
            Err(e) => {
                tracing::warn!("icon {} rejected: {e}", path.display());
                self.notify(
                    Notification::error("alert.iconError")
                        .with_fallback("Could not read the icon image."),
                );
            }
        }
    }

    fn report(&mut self, outcome: Outcome) {
        if let Outcome::Alert(e) = outcome {
            self.notify(alert_for(&e));
        }
    }

    /// Resolves a notification in the current language and shows it.
    fn notify(&mut self, notification: Notification) {
        let text = if self.translator.is_initialized() {
            let resolved = self
                .translator
                .tr_with_args(notification.message_key(), &notification.message_args());
            if resolved == notification.message_key() {
                notification.fallback().to_string()
            } else {
                resolved
            }
        } else {
            notification.fallback().to_string()
        };
        self.notifier.notify(notification.severity(), &text);
    }
}

fn alert_for(error: &GenerateError) -> Notification {
    Notification::error(error.i18n_key()).with_fallback(error.to_string())
}

/// Checkbox value from text.
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes" | "checked"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::i18n::{EmbeddedDictionaries, MemoryPreferenceStore};
    use crate::ui::form::{DOWNLOAD_BUTTON, HIDDEN_CLASS, PLACEHOLDER};
    use crate::ui::notifications::{RecordingNotifier, Severity};
    use crate::ui::page::qr_studio_page;
    use tempfile::{tempdir, TempDir};

    async fn app() -> (App, RecordingNotifier, TempDir) {
        let dir = tempdir().expect("failed to create temp dir");
        let notifier = RecordingNotifier::default();
        let translator = Translator::new(EmbeddedDictionaries, MemoryPreferenceStore::default());
        let mut app = App::new(
            qr_studio_page(&RenderConfig::default()),
            translator,
            QrCodeEncoder,
            notifier.clone(),
            dir.path(),
        );
        app.start().await;
        (app, notifier, dir)
    }

    #[test]
    fn flags_parse_common_spellings() {
        assert!(parse_flag("on"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("off"));
        assert!(!parse_flag(""));
    }

    #[tokio::test]
    async fn empty_generate_alerts_in_current_language() {
        let (mut app, notifier, _dir) = app().await;

        app.dispatch(Event::Generate).await;
        app.dispatch(Event::SwitchLanguage("ar".into())).await;
        app.dispatch(Event::Generate).await;

        let errors = notifier.with_severity(Severity::Error);
        assert_eq!(errors[0], "Please enter some content for the QR code");
        assert_eq!(errors[1], "يرجى إدخال محتوى لرمز QR");
        assert!(app.page().is_disabled(DOWNLOAD_BUTTON));
        assert!(!app.page().has_class(PLACEHOLDER, HIDDEN_CLASS));
    }

    #[tokio::test]
    async fn download_before_generate_saves_nothing() {
        let (mut app, notifier, dir) = app().await;

        app.dispatch(Event::Download).await;

        assert_eq!(
            notifier.with_severity(Severity::Info),
            vec!["Generate a QR code before downloading.".to_string()]
        );
        assert_eq!(std::fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0), 0);
    }

    #[tokio::test]
    async fn shadow_checkbox_accepts_flags() {
        let (mut app, _notifier, _dir) = app().await;

        app.dispatch(Event::SetField(Field::Shadow, "on".into())).await;
        assert!(app.page().is_checked(Field::Shadow.id()));
        app.dispatch(Event::SetField(Field::Shadow, "off".into())).await;
        assert!(!app.page().is_checked(Field::Shadow.id()));
    }

    #[tokio::test]
    async fn unreadable_icon_is_reported() {
        let (mut app, notifier, dir) = app().await;

        app.dispatch(Event::UploadIcon(dir.path().join("missing.png"))).await;

        assert_eq!(
            notifier.with_severity(Severity::Error),
            vec!["Could not read the icon image.".to_string()]
        );
        assert!(app.controller().icon().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn text_edits_regenerate_once_after_quiet_period() {
        let (mut app, _notifier, _dir) = app().await;
        app.dispatch(Event::SetField(Field::Text, "first".into())).await;
        app.dispatch(Event::Generate).await;
        assert_eq!(app.controller().renders(), 1);

        for text in ["s", "se", "sec", "second"] {
            app.dispatch(Event::SetField(Field::Text, text.into())).await;
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(app.try_next_event().is_none(), "still typing");

        tokio::time::sleep(Duration::from_millis(TEXT_DEBOUNCE_MS)).await;
        let settled = app.try_next_event().expect("settle queued");
        assert!(matches!(settled, Event::TextSettled(_)));
        assert!(app.try_next_event().is_none());

        app.dispatch(settled).await;
        assert_eq!(app.controller().renders(), 2);
        assert_eq!(app.controller().last().map(|r| r.options.text.as_str()), Some("second"));
    }

    #[tokio::test(start_paused = true)]
    async fn generate_supersedes_a_queued_text_settle() {
        let (mut app, _notifier, _dir) = app().await;
        app.dispatch(Event::SetField(Field::Text, "first".into())).await;
        app.dispatch(Event::Generate).await;

        app.dispatch(Event::SetField(Field::Text, "second".into())).await;
        tokio::time::sleep(Duration::from_millis(TEXT_DEBOUNCE_MS + 50)).await;
        app.dispatch(Event::Generate).await;
        assert_eq!(app.controller().renders(), 2);

        let settled = app.try_next_event().expect("settle queued before generate");
        assert!(matches!(settled, Event::TextSettled(_)));
        app.dispatch(settled).await;

        assert_eq!(app.controller().renders(), 2);
        assert_eq!(app.controller().last().map(|r| r.options.text.as_str()), Some("second"));
    }

    #[tokio::test]
    async fn dispatch_ignores_quit() {
        let (mut app, _notifier, _dir) = app().await;
        app.dispatch(Event::Quit).await;
        assert!(app.translator().is_initialized());
    }

    #[tokio::test]
    async fn quit_stops_the_loop() {
        let (mut app, _notifier, _dir) = app().await;
        let sender = app.sender();
        sender.send(Event::Show).expect("queued");
        sender.send(Event::Quit).expect("queued");

        app.run().await;

        assert!(!app.translator().is_initialized());
    }
}
