// SPDX-License-Identifier: MPL-2.0
//! QR code generation and styling.
//!
//! - [`options`] - typed, clamped snapshot of the form
//! - [`encoder`] - text to QR image
//! - [`compose`] - border, shadow, rounded clip and icon layers
//! - [`controller`] - generate/regenerate/download state machine
//! - [`debounce`] - quiet-period timer for text edits

pub mod compose;
pub mod controller;
pub mod debounce;
pub mod encoder;
pub mod export;
pub mod icon;
pub mod options;

pub use controller::{Outcome, QrController, Rendered};
pub use encoder::{EncodeRequest, Encoder, QrCodeEncoder};
pub use options::RenderOptions;
