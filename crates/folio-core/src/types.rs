// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Folio export engine.

use serde::{Deserialize, Serialize};

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height), portrait.
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Tabloid => (279, 432),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Page orientation.
///
/// Landscape swaps the paper's portrait dimensions; the document format has
/// no other orientation concept here — upright correction happens at the
/// pixel level before insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Apply the orientation to portrait paper dimensions.
    pub fn apply(&self, (width_mm, height_mm): (u32, u32)) -> (u32, u32) {
        match self {
            Self::Portrait => (width_mm, height_mm),
            Self::Landscape => (height_mm, width_mm),
        }
    }
}

/// Page dimensions, margin, and the usable area they leave.
///
/// One instance per target page size/orientation; computed once per document
/// and never mutated afterwards. All values are millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
}

impl PageGeometry {
    /// Build the geometry for a paper size in the given orientation.
    pub fn new(paper: PaperSize, orientation: Orientation, margin_mm: f32) -> Self {
        let (width_mm, height_mm) = orientation.apply(paper.dimensions_mm());
        Self {
            page_width_mm: width_mm as f32,
            page_height_mm: height_mm as f32,
            margin_mm,
        }
    }

    /// Page width minus both margins.
    pub fn usable_width(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Page height minus both margins.
    pub fn usable_height(&self) -> f32 {
        self.page_height_mm - 2.0 * self.margin_mm
    }

    /// Top-left origin (x, y) that centres a draw rectangle on the page,
    /// both axes.
    pub fn centered_origin(&self, draw_width: f32, draw_height: f32) -> (f32, f32) {
        (
            (self.page_width_mm - draw_width) / 2.0,
            (self.page_height_mm - draw_height) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_portrait_usable_area() {
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Portrait, 10.0);
        assert_eq!(geometry.page_width_mm, 210.0);
        assert_eq!(geometry.page_height_mm, 297.0);
        assert_eq!(geometry.usable_width(), 190.0);
        assert_eq!(geometry.usable_height(), 277.0);
    }

    #[test]
    fn landscape_swaps_dimensions() {
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Landscape, 8.0);
        assert_eq!(geometry.page_width_mm, 297.0);
        assert_eq!(geometry.page_height_mm, 210.0);
        assert_eq!(geometry.usable_width(), 281.0);
        assert_eq!(geometry.usable_height(), 194.0);
    }

    #[test]
    fn centered_origin_is_symmetric() {
        let geometry = PageGeometry::new(PaperSize::A4, Orientation::Portrait, 10.0);
        let (x, y) = geometry.centered_origin(190.0, 95.0);
        assert_eq!(x, 10.0);
        assert_eq!(y, 101.0);
    }

    #[test]
    fn custom_paper_dimensions() {
        let paper = PaperSize::Custom {
            width_mm: 100,
            height_mm: 150,
        };
        assert_eq!(paper.dimensions_mm(), (100, 150));
    }
}
