// SPDX-License-Identifier: MPL-2.0
//! `qr_studio` generates styled QR codes: custom colors, a border with
//! optional shadow and rounded corners, and a center icon. The interface
//! text is localized in English and Arabic, with right-to-left layout for
//! Arabic.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod qr;
pub mod ui;
