// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture capability — the interface a rasterizer implements to turn a
// visual surface into pixels. The pipeline never depends on a concrete
// rendering engine.

use async_trait::async_trait;
use folio_core::error::Result;
use image::Rgba;

use crate::raster::bitmap::Bitmap;

/// Options handed to the rasterizer for one capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    /// Supersampling factor applied while rendering.
    pub scale: f32,
    /// Backdrop composited behind transparent content.
    pub background: Rgba<u8>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Rgba([255u8, 255, 255, 255]),
        }
    }
}

/// Renders a visual surface into an owned pixel grid.
///
/// Implementations bring their own rendering engine (a headless browser, a
/// scene graph, a chart backend); the export pipeline only ever sees the
/// resulting `Bitmap`.
#[async_trait]
pub trait Rasterizer {
    /// Opaque handle to the surface being captured.
    type Surface: Sync + ?Sized;

    /// Render the surface into a bitmap at the requested scale.
    async fn capture(&self, surface: &Self::Surface, options: &CaptureOptions) -> Result<Bitmap>;
}
