// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Slice pagination — cutting a bitmap into horizontal bands that each fill
// one page's usable height at a fixed draw width.

use folio_core::error::{FolioError, Result};
use folio_core::types::PageGeometry;
use image::imageops::{crop_imm, replace};
use image::{Rgba, RgbaImage};
use tracing::{debug, instrument};

use crate::raster::bitmap::{Bitmap, encode_rgba_jpeg};

/// Scratch backdrop; cleared rows encode as white, matching the page.
const BACKDROP: Rgba<u8> = Rgba([255u8, 255, 255, 255]);

/// One output page: encoded image plus its draw size in millimetres.
#[derive(Debug, Clone)]
pub struct PageImage {
    pub jpeg: Vec<u8>,
    pub draw_width: f32,
    pub draw_height: f32,
}

/// Cut a bitmap into horizontal bands, top to bottom, one per output page.
///
/// The band height in source pixels is the row count that, scaled to
/// `draw_width`, exactly fills the usable page height; the final band may
/// be shorter. Every source row lands in exactly one band — the offsets
/// advance by the emitted row counts and the loop ends precisely at the
/// bitmap's height.
#[instrument(skip(bitmap, geometry), fields(width = bitmap.width(), height = bitmap.height(), draw_width))]
pub fn paginate(
    bitmap: &Bitmap,
    geometry: &PageGeometry,
    draw_width: f32,
    jpeg_quality: u8,
) -> Result<Vec<PageImage>> {
    let width = bitmap.width();
    let height = bitmap.height();
    if width == 0 || height == 0 {
        return Err(FolioError::InvalidBitmap(format!(
            "cannot paginate a zero-area bitmap ({}x{} px)",
            width, height
        )));
    }

    // Source rows per full page; at least one row so the loop always
    // advances, even under degenerate geometry.
    let slice_px = ((geometry.usable_height() * width as f32 / draw_width).floor() as u32).max(1);
    debug!(slice_px, "slice height computed");

    // Reused across iterations; cleared before each band is copied in.
    let mut scratch = RgbaImage::from_pixel(width, slice_px, BACKDROP);

    let mut pages = Vec::new();
    let mut offset = 0u32;
    while offset < height {
        let rows = slice_px.min(height - offset);

        for pixel in scratch.pixels_mut() {
            *pixel = BACKDROP;
        }
        let band = crop_imm(bitmap.as_rgba(), 0, offset, width, rows).to_image();
        replace(&mut scratch, &band, 0, 0);

        let jpeg = if rows == slice_px {
            encode_rgba_jpeg(&scratch, jpeg_quality)?
        } else {
            // Final short band: encode only the valid rows so the page
            // keeps the source aspect ratio.
            encode_rgba_jpeg(&crop_imm(&scratch, 0, 0, width, rows).to_image(), jpeg_quality)?
        };

        let draw_height = rows as f32 * draw_width / width as f32;
        pages.push(PageImage {
            jpeg,
            draw_width,
            draw_height,
        });
        offset += rows;
    }

    debug!(pages = pages.len(), "pagination complete");
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::{Orientation, PaperSize};
    use image::GenericImageView;

    fn a4_portrait() -> PageGeometry {
        PageGeometry::new(PaperSize::A4, Orientation::Portrait, 10.0)
    }

    fn decoded_dims(jpeg: &[u8]) -> (u32, u32) {
        image::load_from_memory(jpeg).unwrap().dimensions()
    }

    #[test]
    fn tall_bitmap_splits_without_losing_rows() {
        // 1000x2000 px into usable 190x277mm at draw width 190mm:
        // slice_px = floor(277 * 1000 / 190) = 1457.
        let bitmap = Bitmap::filled(1000, 2000, Rgba([60, 60, 60, 255]));
        let pages = paginate(&bitmap, &a4_portrait(), 190.0, 92).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(decoded_dims(&pages[0].jpeg), (1000, 1457));
        assert_eq!(decoded_dims(&pages[1].jpeg), (1000, 543));

        let total_rows: u32 = pages.iter().map(|p| decoded_dims(&p.jpeg).1).sum();
        assert_eq!(total_rows, 2000);
    }

    #[test]
    fn draw_heights_follow_the_slice_rows() {
        let bitmap = Bitmap::filled(1000, 2000, Rgba([60, 60, 60, 255]));
        let pages = paginate(&bitmap, &a4_portrait(), 190.0, 92).unwrap();

        assert!((pages[0].draw_height - 276.83).abs() < 0.01);
        assert!((pages[1].draw_height - 103.17).abs() < 0.01);
        for page in &pages {
            assert!(page.draw_height <= a4_portrait().usable_height());
            assert_eq!(page.draw_width, 190.0);
        }
    }

    #[test]
    fn exact_multiple_yields_full_slices_only() {
        // Custom 120x170mm page with 10mm margins: usable 100x150mm, so a
        // 100px-wide bitmap slices at exactly 150 rows.
        let geometry = PageGeometry::new(
            PaperSize::Custom {
                width_mm: 120,
                height_mm: 170,
            },
            Orientation::Portrait,
            10.0,
        );
        let bitmap = Bitmap::filled(100, 300, Rgba([10, 10, 10, 255]));
        let pages = paginate(&bitmap, &geometry, 100.0, 92).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(decoded_dims(&pages[0].jpeg), (100, 150));
        assert_eq!(decoded_dims(&pages[1].jpeg), (100, 150));
    }

    #[test]
    fn band_content_survives_the_page_boundary() {
        // Top band red, bottom band blue; the second page must start blue.
        let geometry = PageGeometry::new(
            PaperSize::Custom {
                width_mm: 120,
                height_mm: 170,
            },
            Orientation::Portrait,
            10.0,
        );
        let mut pixels = RgbaImage::from_pixel(100, 300, Rgba([220, 30, 30, 255]));
        for y in 150..300 {
            for x in 0..100 {
                pixels.put_pixel(x, y, Rgba([30, 30, 220, 255]));
            }
        }
        let bitmap = Bitmap::from_rgba(pixels);
        let pages = paginate(&bitmap, &geometry, 100.0, 92).unwrap();

        let second = image::load_from_memory(&pages[1].jpeg).unwrap().to_rgba8();
        let Rgba([r, _, b, _]) = *second.get_pixel(50, 0);
        assert!(b > 150 && r < 100, "expected blue, got r={} b={}", r, b);
    }

    #[test]
    fn short_bitmap_yields_a_single_short_page() {
        let bitmap = Bitmap::filled(1000, 500, Rgba([60, 60, 60, 255]));
        let pages = paginate(&bitmap, &a4_portrait(), 190.0, 92).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(decoded_dims(&pages[0].jpeg), (1000, 500));
        assert!((pages[0].draw_height - 95.0).abs() < 0.01);
    }

    #[test]
    fn zero_height_bitmap_is_rejected() {
        let bitmap = Bitmap::filled(100, 0, Rgba([0, 0, 0, 255]));
        let result = paginate(&bitmap, &a4_portrait(), 190.0, 92);
        assert!(matches!(result, Err(FolioError::InvalidBitmap(_))));
    }

    #[test]
    fn zero_width_bitmap_is_rejected() {
        let bitmap = Bitmap::filled(0, 100, Rgba([0, 0, 0, 255]));
        let result = paginate(&bitmap, &a4_portrait(), 190.0, 92);
        assert!(matches!(result, Err(FolioError::InvalidBitmap(_))));
    }
}
