// SPDX-License-Identifier: MPL-2.0
//! User-facing alerts and status messages.
//!
//! Notifications carry an i18n key rather than text. The application
//! resolves the key through the translator at display time, so a message
//! raised before a language switch is still shown in the new language.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//! - [`sink`] - `Notifier` trait and its console and recording implementations

mod notification;
mod sink;

pub use notification::{Notification, Severity};
pub use sink::{ConsoleNotifier, Notifier, RecordingNotifier};
