// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export entry points — capture (or decode), optionally bake the
// orientation upright, lay the result out across pages, and persist.
//
// Every entry point awaits the engine readiness gate first, and a failure
// at any stage aborts the export before anything is written: save is the
// final step.

use std::path::Path;

use folio_core::config::ExportConfig;
use folio_core::error::Result;
use folio_core::types::PageGeometry;
use tracing::{info, instrument};

use crate::capture::{CaptureOptions, Rasterizer};
use crate::engine;
use crate::layout::fit::{fit, fit_contain};
use crate::layout::slices::paginate;
use crate::pdf::assembler::DocumentAssembler;
use crate::raster::bitmap::Bitmap;
use crate::raster::transform::normalize_upright;

/// Default output name for a plain surface export.
pub const DEFAULT_SURFACE_FILENAME: &str = "visualizacion.pdf";
/// Default output name for an upright-corrected surface export.
pub const DEFAULT_ROTATED_FILENAME: &str = "visualizacion_rotada.pdf";
/// Default output name for an upright-corrected export of an encoded image.
pub const DEFAULT_IMAGE_FILENAME: &str = "grafico.pdf";

/// Capture a surface and export it as a single centred page, scaled to fit
/// entirely within the usable area.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn export_surface<R: Rasterizer>(
    rasterizer: &R,
    surface: &R::Surface,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    engine::ensure_ready().await?;
    let bitmap = capture(rasterizer, surface, config).await?;
    export_bitmap(&bitmap, path, config).await
}

/// Export an already-captured bitmap as a single centred page.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn export_bitmap(
    bitmap: &Bitmap,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    engine::ensure_ready().await?;
    let path = path.as_ref();
    let geometry = PageGeometry::new(config.paper_size, config.orientation, config.margin_mm);

    let plan = fit_contain(bitmap.width(), bitmap.height(), &geometry)?;
    let (x, y) = geometry.centered_origin(plan.draw_width, plan.draw_height);

    let mut assembler = DocumentAssembler::new(geometry, &title_for(path));
    assembler.place_image(
        &bitmap.to_jpeg_bytes(config.jpeg_quality)?,
        x,
        y,
        plan.draw_width,
        plan.draw_height,
    )?;
    assembler.save(path)
}

/// Capture a surface, bake its orientation upright, and export it, slicing
/// across pages when the scaled height overflows.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn export_surface_rotated<R: Rasterizer>(
    rasterizer: &R,
    surface: &R::Surface,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    engine::ensure_ready().await?;
    let bitmap = capture(rasterizer, surface, config).await?;
    export_bitmap_upright(&bitmap, path, config).await
}

/// Decode an encoded image (PNG, JPEG, ...) and export it upright with
/// pagination.
#[instrument(skip_all, fields(data_len = data.len(), path = %path.as_ref().display()))]
pub async fn export_image_rotated(
    data: &[u8],
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    engine::ensure_ready().await?;
    let bitmap = Bitmap::from_bytes(data)?;
    export_bitmap_upright(&bitmap, path, config).await
}

/// Upright-correct a bitmap and export it, one page per slice when the
/// content overflows a single page.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub async fn export_bitmap_upright(
    bitmap: &Bitmap,
    path: impl AsRef<Path>,
    config: &ExportConfig,
) -> Result<()> {
    engine::ensure_ready().await?;
    let path = path.as_ref();
    let upright = normalize_upright(bitmap);
    let geometry = PageGeometry::new(config.paper_size, config.orientation, config.margin_mm);

    let mut assembler = DocumentAssembler::new(geometry, &title_for(path));
    place_paginated(&mut assembler, &upright, config.jpeg_quality)?;
    assembler.save(path)
}

async fn capture<R: Rasterizer>(
    rasterizer: &R,
    surface: &R::Surface,
    config: &ExportConfig,
) -> Result<Bitmap> {
    let options = CaptureOptions {
        scale: config.capture_scale,
        ..CaptureOptions::default()
    };
    let bitmap = rasterizer.capture(surface, &options).await?;
    info!(
        width = bitmap.width(),
        height = bitmap.height(),
        "surface captured"
    );
    Ok(bitmap)
}

/// Place a bitmap into the assembler: one centred page when it fits, one
/// page per slice when it does not. The first slice draws on the page the
/// assembler already has open.
fn place_paginated(
    assembler: &mut DocumentAssembler,
    bitmap: &Bitmap,
    jpeg_quality: u8,
) -> Result<()> {
    let geometry = *assembler.geometry();
    let plan = fit(bitmap.width(), bitmap.height(), &geometry)?;

    if !plan.needs_pagination {
        let (x, y) = geometry.centered_origin(plan.draw_width, plan.draw_height);
        return assembler.place_image(
            &bitmap.to_jpeg_bytes(jpeg_quality)?,
            x,
            y,
            plan.draw_width,
            plan.draw_height,
        );
    }

    let pages = paginate(bitmap, &geometry, plan.draw_width, jpeg_quality)?;
    info!(pages = pages.len(), "content split across pages");
    for (index, page) in pages.iter().enumerate() {
        if index > 0 {
            assembler.add_page();
        }
        let (x, y) = geometry.centered_origin(page.draw_width, page.draw_height);
        assembler.place_image(&page.jpeg, x, y, page.draw_width, page.draw_height)?;
    }
    Ok(())
}

fn title_for(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("Folio Export")
        .to_string()
}
