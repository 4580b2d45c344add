// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Symbol**: QR image size and quiet-zone margin
//! - **Border**: Frame width and corner radius
//! - **Icon**: Center overlay size and padding
//! - **Shadow**: Drop shadow cast by the border
//! - **Timing**: Text input debounce

// ==========================================================================
// Symbol Defaults
// ==========================================================================

/// Default QR image edge length in pixels.
pub const DEFAULT_QR_SIZE_PX: u32 = 300;

/// Minimum QR image edge length in pixels.
pub const MIN_QR_SIZE_PX: u32 = 64;

/// Maximum QR image edge length in pixels.
pub const MAX_QR_SIZE_PX: u32 = 1024;

/// Default quiet zone around the symbol, in modules.
pub const DEFAULT_MARGIN_MODULES: u32 = 4;

/// Maximum quiet zone, in modules.
pub const MAX_MARGIN_MODULES: u32 = 10;

// ==========================================================================
// Border Defaults
// ==========================================================================

/// Default border stroke width in pixels (0 = no border).
pub const DEFAULT_BORDER_WIDTH_PX: u32 = 0;

/// Maximum border stroke width in pixels.
pub const MAX_BORDER_WIDTH_PX: u32 = 50;

/// Default corner radius of the QR clip rectangle in pixels.
pub const DEFAULT_BORDER_RADIUS_PX: u32 = 0;

/// Maximum corner radius in pixels.
pub const MAX_BORDER_RADIUS_PX: u32 = 100;

/// Default foreground (dark module) color.
pub const DEFAULT_FOREGROUND: &str = "#000000";

/// Default background (light module) color.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default border stroke color.
pub const DEFAULT_BORDER_COLOR: &str = "#000000";

// ==========================================================================
// Icon Defaults
// ==========================================================================

/// Default icon edge length as a percentage of the QR size.
pub const DEFAULT_ICON_SIZE_PERCENT: u32 = 20;

/// Minimum icon size percentage.
pub const MIN_ICON_SIZE_PERCENT: u32 = 5;

/// Maximum icon size percentage.
/// Above this, high error correction can no longer recover covered modules.
pub const MAX_ICON_SIZE_PERCENT: u32 = 30;

/// White padding drawn around the icon, in pixels.
pub const ICON_PADDING_PX: f32 = 5.0;

// ==========================================================================
// Shadow Defaults
// ==========================================================================

/// Shadow opacity (0.0 to 1.0).
pub const SHADOW_ALPHA: f32 = 0.3;

/// Shadow blur length in pixels. The Gaussian sigma is half of this.
pub const SHADOW_BLUR_PX: f32 = 10.0;

/// Horizontal and vertical shadow offset in pixels.
pub const SHADOW_OFFSET_PX: i32 = 5;

// ==========================================================================
// Timing Defaults
// ==========================================================================

/// Quiet period after the last text edit before regeneration fires.
pub const TEXT_DEBOUNCE_MS: u64 = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_QR_SIZE_PX > 0);
    assert!(MIN_QR_SIZE_PX <= DEFAULT_QR_SIZE_PX);
    assert!(MAX_QR_SIZE_PX >= DEFAULT_QR_SIZE_PX);

    assert!(DEFAULT_MARGIN_MODULES <= MAX_MARGIN_MODULES);
    assert!(DEFAULT_BORDER_WIDTH_PX <= MAX_BORDER_WIDTH_PX);
    assert!(DEFAULT_BORDER_RADIUS_PX <= MAX_BORDER_RADIUS_PX);

    assert!(MIN_ICON_SIZE_PERCENT > 0);
    assert!(MIN_ICON_SIZE_PERCENT <= DEFAULT_ICON_SIZE_PERCENT);
    assert!(MAX_ICON_SIZE_PERCENT >= DEFAULT_ICON_SIZE_PERCENT);
    assert!(MAX_ICON_SIZE_PERCENT < 100);

    assert!(SHADOW_ALPHA > 0.0 && SHADOW_ALPHA <= 1.0);
    assert!(TEXT_DEBOUNCE_MS > 0);
};
