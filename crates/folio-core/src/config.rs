// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export configuration.

use serde::{Deserialize, Serialize};

use crate::types::{Orientation, PaperSize};

/// Settings for one export run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Target paper size.
    pub paper_size: PaperSize,
    /// Page orientation.
    pub orientation: Orientation,
    /// Margin on all four sides, millimetres.
    pub margin_mm: f32,
    /// JPEG quality for embedded page images (1-100).
    pub jpeg_quality: u8,
    /// Supersampling factor handed to the rasterizer when capturing.
    pub capture_scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 10.0,
            jpeg_quality: 92,
            capture_scale: 2.0,
        }
    }
}

impl ExportConfig {
    /// Defaults for the upright-corrected export path: landscape pages with
    /// a tighter margin, matching the layout the double rotation produces.
    pub fn rotated() -> Self {
        Self {
            orientation: Orientation::Landscape,
            margin_mm: 8.0,
            ..Self::default()
        }
    }
}
