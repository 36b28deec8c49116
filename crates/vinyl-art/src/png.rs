//! Minimal PNG writer for 8-bit RGB images.
//!
//! Output layout:
//!
//! ```text
//! signature | IHDR | IDAT (zlib: 78 01, raw deflate, adler32) | IEND
//! ```
//!
//! Each chunk is `length (BE u32) | type | data | crc32(type ++ data) (BE)`.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::checksum::{adler32, Crc32};
use crate::error::{ArtError, Result};
use crate::palette::Rgb;

/// The eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// zlib header: deflate, 32K window, fastest level, no preset dictionary.
const ZLIB_HEADER: [u8; 2] = [0x78, 0x01];

const BIT_DEPTH: u8 = 8;
const COLOR_TYPE_RGB: u8 = 2;
const FILTER_NONE: u8 = 0;

/// Largest dimension PNG allows (2^31 - 1).
const MAX_DIMENSION: u32 = 0x7FFF_FFFF;

/// Bytes in one scanline: filter byte plus three bytes per pixel.
fn stride(width: u32) -> usize {
    1 + width as usize * 3
}

fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(ArtError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Paint a diagonal gradient from `from` (top-left) toward `to` (bottom-right).
///
/// Returns filtered scanlines ready for [`encode_rgb`]: every row begins with
/// filter type 0, and pixel `(x, y)` blends with `t = (x + y) / (width + height)`.
pub fn render_gradient(width: u32, height: u32, from: Rgb, to: Rgb) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let row_len = stride(width);
    let mut raw = vec![0u8; row_len * height as usize];
    let span = (width + height) as f32;

    for (y, row) in raw.chunks_exact_mut(row_len).enumerate() {
        row[0] = FILTER_NONE;
        for (x, px) in row[1..].chunks_exact_mut(3).enumerate() {
            let t = (x + y) as f32 / span;
            px[0] = blend(from.0, to.0, t);
            px[1] = blend(from.1, to.1, t);
            px[2] = blend(from.2, to.2, t);
        }
    }
    Ok(raw)
}

fn blend(a: u8, b: u8, t: f32) -> u8 {
    let (a, b) = (f32::from(a), f32::from(b));
    // `as u8` truncates toward zero and saturates.
    (a + (b - a) * t) as u8
}

/// Encode filtered RGB scanlines (as produced by [`render_gradient`]) into a PNG file.
pub fn encode_rgb(width: u32, height: u32, raster: &[u8]) -> Result<Vec<u8>> {
    check_dimensions(width, height)?;
    let expected = stride(width) * height as usize;
    if raster.len() != expected {
        return Err(ArtError::RasterSize {
            expected,
            actual: raster.len(),
        });
    }

    let idat = zlib_stream(raster)?;
    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + idat.len() + 64);
    out.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[BIT_DEPTH, COLOR_TYPE_RGB, 0, 0, 0]);
    write_chunk(&mut out, b"IHDR", &ihdr);

    write_chunk(&mut out, b"IDAT", &idat);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

/// Append one chunk to `out`.
pub fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
    let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut crc = Crc32::new();
    crc.update(kind);
    crc.update(data);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}

/// Wrap `data` in a zlib container around a raw DEFLATE stream.
fn zlib_stream(data: &[u8]) -> Result<Vec<u8>> {
    let mut stream = ZLIB_HEADER.to_vec();
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).map_err(ArtError::Compress)?;
    let body = encoder.finish().map_err(ArtError::Compress)?;
    stream.extend_from_slice(&body);
    stream.extend_from_slice(&adler32(data).to_be_bytes());
    Ok(stream)
}
