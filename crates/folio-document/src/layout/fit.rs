// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page fitting — aspect-preserving scale of a pixel grid into a page's
// usable area.

use folio_core::error::{FolioError, Result};
use folio_core::types::PageGeometry;
use tracing::{debug, instrument};

/// Where a bitmap lands on the page: draw size in millimetres and whether
/// the height overflows a single page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitPlan {
    pub draw_width: f32,
    pub draw_height: f32,
    pub needs_pagination: bool,
}

/// Scale-to-width fit: the bitmap spans the full usable width and the
/// height follows the aspect ratio, possibly overflowing onto further
/// pages.
#[instrument(skip(geometry))]
pub fn fit(width_px: u32, height_px: u32, geometry: &PageGeometry) -> Result<FitPlan> {
    validate(width_px, height_px, geometry)?;

    let draw_width = geometry.usable_width();
    let draw_height = height_px as f32 * draw_width / width_px as f32;
    let needs_pagination = draw_height > geometry.usable_height();

    debug!(draw_width, draw_height, needs_pagination, "fitted to width");
    Ok(FitPlan {
        draw_width,
        draw_height,
        needs_pagination,
    })
}

/// Contain fit: scale to width, then re-scale to height if that overflows.
/// The result always fits a single page.
#[instrument(skip(geometry))]
pub fn fit_contain(width_px: u32, height_px: u32, geometry: &PageGeometry) -> Result<FitPlan> {
    validate(width_px, height_px, geometry)?;

    let mut draw_width = geometry.usable_width();
    let mut draw_height = height_px as f32 * draw_width / width_px as f32;
    if draw_height > geometry.usable_height() {
        draw_height = geometry.usable_height();
        draw_width = width_px as f32 * draw_height / height_px as f32;
    }

    debug!(draw_width, draw_height, "contained on one page");
    Ok(FitPlan {
        draw_width,
        draw_height,
        needs_pagination: false,
    })
}

fn validate(width_px: u32, height_px: u32, geometry: &PageGeometry) -> Result<()> {
    if width_px == 0 || height_px == 0 {
        return Err(FolioError::InvalidBitmap(format!(
            "zero-area bitmap ({}x{} px)",
            width_px, height_px
        )));
    }
    if geometry.usable_width() <= 0.0 || geometry.usable_height() <= 0.0 {
        return Err(FolioError::InvalidGeometry(format!(
            "margins of {}mm leave no usable area on a {}x{}mm page",
            geometry.margin_mm, geometry.page_width_mm, geometry.page_height_mm
        )));
    }
    Ok(())
}
