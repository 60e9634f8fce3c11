// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Folio.

use thiserror::Error;

/// Top-level error type for all Folio operations.
#[derive(Debug, Error)]
pub enum FolioError {
    // -- Input errors --
    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("invalid page geometry: {0}")]
    InvalidGeometry(String),

    // -- Processing errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF assembly failed: {0}")]
    PdfError(String),

    // -- Environment / persistence --
    #[error("export dependencies unavailable: {0}")]
    DependenciesUnavailable(String),

    #[error("could not persist document: {0}")]
    Persistence(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FolioError>;
