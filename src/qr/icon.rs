// SPDX-License-Identifier: MPL-2.0
//! Loading the center overlay icon.

use crate::error::{Error, Result};
use image_rs::RgbaImage;
use std::path::Path;

/// Decodes any format the `image` crate was built with into RGBA.
pub fn decode_icon(bytes: &[u8]) -> Result<RgbaImage> {
    let image = image_rs::load_from_memory(bytes)?;
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::Image("icon has no pixels".into()));
    }
    Ok(image.to_rgba8())
}

/// Reads and decodes an icon file off the event loop.
pub async fn read_icon(path: &Path) -> Result<RgbaImage> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    tokio::task::spawn_blocking(move || decode_icon(&bytes))
        .await
        .map_err(|e| Error::Image(e.to_string()))?
}
