//! Theme style sheet output.
//!
//! The design-token style sheet is written once per build as
//! `theme-<hash>.css`, where the hash fingerprints its content. Pages link
//! the fingerprinted name, so caches never serve a stale palette.

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

const PREFIX: &str = "theme-";
const SUFFIX: &str = ".css";

/// Short content fingerprint: first 4 bytes of the blake3 digest, hex.
pub fn fingerprint(content: &str) -> String {
    let hash = blake3::hash(content.as_bytes());
    hex::encode(&hash.as_bytes()[..4])
}

/// File name of the style sheet for `css`, like `theme-a1b2c3d4.css`.
pub fn theme_css_filename(css: &str) -> String {
    format!("{PREFIX}{}{SUFFIX}", fingerprint(css))
}

/// Write `css` into `output_dir` under the fingerprint of `sheet`.
///
/// `sheet` is the unminified style sheet and `css` the bytes written, so
/// the name is stable across `--minify` toggles.
/// Returns the file name relative to `output_dir`.
pub fn write_theme_css(output_dir: &Path, sheet: &str, css: &[u8]) -> Result<PathBuf> {
    let filename = theme_css_filename(sheet);
    let path = output_dir.join(&filename);
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    fs::write(&path, css).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(PathBuf::from(filename))
}

/// Remove `theme-*.css` files other than `current`.
pub fn cleanup_old_theme_css(output_dir: &Path, current: &Path) -> Result<usize> {
    let current = current.to_string_lossy();
    let mut removed = 0;

    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();

        if name.starts_with(PREFIX) && name.ends_with(SUFFIX) && name != current {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    Ok(removed)
}
