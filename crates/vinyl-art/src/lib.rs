//! Placeholder album art for the Vinyl storefront.
//!
//! Provides:
//! - [`palette`]: per-genre color tables
//! - [`checksum`]: CRC-32 and Adler-32
//! - [`png`]: a minimal RGB PNG writer (IHDR / IDAT / IEND)
//! - [`render_album_art`] / [`write_album_art`]: the 100×100 diagonal
//!   gradient covers used by the seeded catalog
//!
//! # Example
//!
//! ```no_run
//! let bytes = vinyl_art::render_album_art("Jazz", 3).unwrap();
//! assert_eq!(&bytes[1..4], b"PNG");
//! ```

#![forbid(unsafe_code)]

pub mod checksum;
mod error;
pub mod palette;
pub mod png;

use std::path::Path;

pub use error::{ArtError, Result};
pub use palette::{gradient_colors, palette_color, Rgb};
pub use png::{encode_rgb, render_gradient};

/// Cover width in pixels.
pub const ART_WIDTH: u32 = 100;
/// Cover height in pixels.
pub const ART_HEIGHT: u32 = 100;

/// Render the cover for the `index`-th album of `genre` as PNG bytes.
pub fn render_album_art(genre: &str, index: i64) -> Result<Vec<u8>> {
    let (base, secondary) = gradient_colors(genre, index);
    let raster = render_gradient(ART_WIDTH, ART_HEIGHT, base, secondary)?;
    encode_rgb(ART_WIDTH, ART_HEIGHT, &raster)
}

/// Render a cover and write it to `path`, creating parent directories.
pub fn write_album_art(path: &Path, genre: &str, index: i64) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).map_err(|e| ArtError::io_with_path(e, dir))?;
        }
    }
    let bytes = render_album_art(genre, index)?;
    std::fs::write(path, &bytes).map_err(|e| ArtError::io_with_path(e, path))?;
    log::debug!("Wrote album art {} ({genre} #{index})", path.display());
    Ok(())
}
