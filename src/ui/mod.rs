// SPDX-License-Identifier: MPL-2.0
//! User interface model.
//!
//! - [`binding`] - the operations the application needs from a UI
//! - [`document`] - in-memory element tree implementing [`binding::UiBinding`]
//! - [`form`] - ids of the inputs, buttons and preview elements
//! - [`page`] - builds the QR studio page
//! - [`notifications`] - alerts and status messages

pub mod binding;
pub mod document;
pub mod form;
pub mod notifications;
pub mod page;
