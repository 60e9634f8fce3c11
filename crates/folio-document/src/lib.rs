// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// folio-document — Raster-to-document pagination pipeline.
//
// Provides bitmap transforms (rotation into an expanded bounding box,
// upright normalisation), page layout (aspect-preserving fit and slice
// pagination), PDF assembly, and the async export entry points.

pub mod capture;
pub mod engine;
pub mod export;
pub mod layout;
pub mod pdf;
pub mod raster;

// Re-export the primary types so callers can use `folio_document::Bitmap` etc.
pub use capture::{CaptureOptions, Rasterizer};
pub use layout::fit::FitPlan;
pub use layout::slices::PageImage;
pub use pdf::assembler::DocumentAssembler;
pub use raster::bitmap::Bitmap;
