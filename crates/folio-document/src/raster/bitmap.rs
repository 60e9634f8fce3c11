// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bitmap — an owned RGBA pixel grid, the unit of exchange between the
// rasterizer, the geometric transforms, and the page layout.

use folio_core::error::{FolioError, Result};
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use tracing::{debug, instrument};

/// A fixed-size grid of RGBA pixels produced by rasterizing a visual
/// surface.
///
/// Immutable once captured: every transform returns a new `Bitmap` and
/// leaves the source untouched.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
}

impl Bitmap {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-rendered RGBA buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode an encoded image (JPEG, PNG, ...) into a bitmap.
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(data)
            .map_err(|err| FolioError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            "bitmap decoded from bytes"
        );
        Ok(Self {
            pixels: decoded.to_rgba8(),
        })
    }

    /// A solid-colour bitmap. Used by readiness probes and tests.
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            pixels: RgbaImage::from_pixel(width, height, color),
        }
    }

    // -- Accessors ------------------------------------------------------------

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying pixel buffer.
    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Consume the bitmap and return the underlying pixel buffer.
    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    // -- Output ---------------------------------------------------------------

    /// Encode as JPEG at the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        encode_rgba_jpeg(&self.pixels, quality)
    }
}

/// Encode an RGBA buffer as JPEG. Alpha is dropped; uncovered regions are
/// expected to carry an opaque-equivalent backdrop already.
pub(crate) fn encode_rgba_jpeg(pixels: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb: RgbImage = RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let Rgba([r, g, b, _]) = *pixels.get_pixel(x, y);
        Rgb([r, g, b])
    });

    let mut buffer = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| FolioError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}
