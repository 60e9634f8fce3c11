// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometric transforms — rotation into an expanded bounding box, and the
// pixel-level upright normalisation that replaces the document writer's
// native rotation parameter.

use image::{Rgba, RgbaImage, imageops};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use tracing::{debug, instrument};

use crate::raster::bitmap::Bitmap;

/// Backdrop for regions the source does not cover after rotation.
/// Transparent white; alpha is dropped at JPEG encode time.
const BACKDROP: Rgba<u8> = Rgba([255u8, 255, 255, 0]);

/// Tolerance when snapping to the axis-aligned fast paths.
const AXIS_EPSILON: f32 = 0.01;

/// Rotate a bitmap clockwise by `degrees`, expanding the canvas to the
/// circumscribing bounding box so no corner is clipped.
///
/// Exact quarter turns take the lossless fast paths; other angles warp with
/// bilinear interpolation about the image centre. The source is untouched.
#[instrument(skip(bitmap), fields(width = bitmap.width(), height = bitmap.height(), degrees))]
pub fn rotate(bitmap: &Bitmap, degrees: f32) -> Bitmap {
    let normalised = degrees.rem_euclid(360.0);

    // Fast-path exact multiples of 90.
    if normalised < AXIS_EPSILON || (normalised - 360.0).abs() < AXIS_EPSILON {
        return bitmap.clone();
    }
    if (normalised - 90.0).abs() < AXIS_EPSILON {
        return Bitmap::from_rgba(imageops::rotate90(bitmap.as_rgba()));
    }
    if (normalised - 180.0).abs() < AXIS_EPSILON {
        return Bitmap::from_rgba(imageops::rotate180(bitmap.as_rgba()));
    }
    if (normalised - 270.0).abs() < AXIS_EPSILON {
        return Bitmap::from_rgba(imageops::rotate270(bitmap.as_rgba()));
    }

    let radians = normalised.to_radians();
    let (new_width, new_height) = rotated_bounds(bitmap.width(), bitmap.height(), radians);
    debug!(new_width, new_height, "rotating into expanded canvas");

    // Source pixels rotate about their own centre onto the centre of the
    // new canvas.
    let projection = Projection::translate(new_width as f32 / 2.0, new_height as f32 / 2.0)
        * Projection::rotate(radians)
        * Projection::translate(-(bitmap.width() as f32) / 2.0, -(bitmap.height() as f32) / 2.0);

    let mut output = RgbaImage::from_pixel(new_width, new_height, BACKDROP);
    warp_into(
        bitmap.as_rgba(),
        &projection,
        Interpolation::Bilinear,
        BACKDROP,
        &mut output,
    );
    Bitmap::from_rgba(output)
}

/// Circumscribing bounding box of a `width` x `height` rectangle rotated by
/// `radians`: `ceil(|w cos| + |h sin|) x ceil(|w sin| + |h cos|)`, never
/// below one pixel per axis.
fn rotated_bounds(width: u32, height: u32, radians: f32) -> (u32, u32) {
    let (sin, cos) = radians.sin_cos();
    let w = width as f32;
    let h = height as f32;
    let new_w = (w * cos.abs() + h * sin.abs()).ceil().max(1.0);
    let new_h = (w * sin.abs() + h * cos.abs()).ceil().max(1.0);
    (new_w as u32, new_h as u32)
}

/// Bake upright orientation into pixel data: rotate the content a quarter
/// turn clockwise, then rotate the composite back.
///
/// The document writer's native per-image rotation parameter produces blank
/// pages, so orientation correction happens in the pixels instead. The
/// round trip is geometrically an identity modulo bounding-box padding;
/// callers must treat the returned dimensions as canonical rather than
/// assuming the original's.
#[instrument(skip(bitmap), fields(width = bitmap.width(), height = bitmap.height()))]
pub fn normalize_upright(bitmap: &Bitmap) -> Bitmap {
    let turned = rotate(bitmap, 90.0);
    rotate(&turned, -90.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marked_bitmap(width: u32, height: u32) -> Bitmap {
        let mut pixels = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        Bitmap::from_rgba(pixels)
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let bitmap = Bitmap::filled(120, 40, Rgba([50, 50, 50, 255]));
        let rotated = rotate(&bitmap, 90.0);
        assert_eq!((rotated.width(), rotated.height()), (40, 120));
    }

    #[test]
    fn quarter_turn_is_lossless() {
        // Clockwise 90: (x, y) -> (height - 1 - y, x).
        let bitmap = marked_bitmap(4, 2);
        let rotated = rotate(&bitmap, 90.0);
        assert_eq!(*rotated.as_rgba().get_pixel(1, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn counter_clockwise_quarter_turn_uses_the_270_path() {
        // -90 normalises to 270: (x, y) -> (y, width - 1 - x).
        let bitmap = marked_bitmap(4, 2);
        let rotated = rotate(&bitmap, -90.0);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
        assert_eq!(*rotated.as_rgba().get_pixel(0, 3), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn zero_and_full_turns_are_identity() {
        let bitmap = marked_bitmap(7, 5);
        for degrees in [0.0, 360.0, -360.0] {
            let rotated = rotate(&bitmap, degrees);
            assert_eq!((rotated.width(), rotated.height()), (7, 5));
            assert_eq!(*rotated.as_rgba().get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        }
    }

    #[test]
    fn arbitrary_angle_matches_the_bounding_box_formula() {
        let bitmap = Bitmap::filled(100, 50, Rgba([80, 80, 80, 255]));
        let rotated = rotate(&bitmap, 45.0);

        // ceil(100*cos45 + 50*sin45) = ceil(106.066) = 107, both axes.
        assert_eq!((rotated.width(), rotated.height()), (107, 107));
    }

    #[test]
    fn rotation_never_collapses_to_zero() {
        let bitmap = Bitmap::filled(1, 1, Rgba([255, 255, 255, 255]));
        for degrees in [13.0, 30.0, 45.0, 89.5, 181.2] {
            let rotated = rotate(&bitmap, degrees);
            assert!(rotated.width() >= 1 && rotated.height() >= 1);
        }
    }

    #[test]
    fn rotation_leaves_the_source_untouched() {
        let bitmap = marked_bitmap(10, 6);
        let _ = rotate(&bitmap, 33.0);
        assert_eq!((bitmap.width(), bitmap.height()), (10, 6));
        assert_eq!(*bitmap.as_rgba().get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn upright_round_trip_stays_within_the_padding_bound() {
        // Dimension equality is not contractual; the round trip may pad.
        let bitmap = Bitmap::filled(300, 200, Rgba([120, 130, 140, 255]));
        let upright = normalize_upright(&bitmap);

        assert!(upright.width() >= 300 && upright.width() <= 302);
        assert!(upright.height() >= 200 && upright.height() <= 202);
    }

    #[test]
    fn upright_round_trip_preserves_content_orientation() {
        let bitmap = marked_bitmap(8, 4);
        let upright = normalize_upright(&bitmap);
        // The marker must come back to the top-left corner region.
        assert_eq!(*upright.as_rgba().get_pixel(0, 0), Rgba([255, 0, 0, 255]));
    }
}
