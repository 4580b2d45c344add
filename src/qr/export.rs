// SPDX-License-Identifier: MPL-2.0
//! Writing the finished image to disk.

use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// `qr-code-<unix-millis>.png`
#[must_use]
pub fn download_file_name(unix_millis: i64) -> String {
    format!("qr-code-{unix_millis}.png")
}

/// Writes `png` into `dir` under a timestamped name and returns the path.
pub fn save_png(dir: &Path, png: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(chrono::Utc::now().timestamp_millis()));
    fs::write(&path, png)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(download_file_name(1_700_000_000_123), "qr-code-1700000000123.png");
    }

    #[test]
    fn save_png_creates_directory_and_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let out = dir.path().join("exports");
        let path = save_png(&out, b"png").expect("saves");

        assert!(path.starts_with(&out));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("qr-code-") && name.ends_with(".png"));
        assert_eq!(fs::read(&path).expect("read back"), b"png");
    }
}
