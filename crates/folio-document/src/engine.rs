// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Engine readiness — a process-wide, memoized gate that proves the JPEG
// encoder and the PDF serialiser work before any export proceeds.

use folio_core::error::{FolioError, Result};
use image::Rgba;
use printpdf::{Mm, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::raster::bitmap::Bitmap;

static ENGINES_READY: OnceCell<()> = OnceCell::const_new();

/// Wait until the encoding and document-writing capabilities are known to
/// work in this process.
///
/// The first caller runs the probe; concurrent callers await the same
/// in-flight initialisation. Success is latched for the process lifetime.
/// A failed probe surfaces as `DependenciesUnavailable` and is re-attempted
/// on the next call — retrying the whole export is the caller's decision.
pub async fn ensure_ready() -> Result<()> {
    ENGINES_READY
        .get_or_try_init(|| async {
            tokio::task::spawn_blocking(probe).await.map_err(|err| {
                FolioError::DependenciesUnavailable(format!("readiness probe aborted: {}", err))
            })?
        })
        .await?;
    Ok(())
}

/// Exercise both capabilities end to end on trivial inputs.
fn probe() -> Result<()> {
    let pixel = Bitmap::filled(1, 1, Rgba([255u8, 255, 255, 255]));
    pixel.to_jpeg_bytes(92).map_err(|err| {
        FolioError::DependenciesUnavailable(format!("JPEG encoder probe failed: {}", err))
    })?;

    let mut doc = PdfDocument::new("folio readiness probe");
    doc.with_pages(vec![PdfPage::new(Mm(10.0), Mm(10.0), Vec::new())]);
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if bytes.is_empty() {
        return Err(FolioError::DependenciesUnavailable(
            "PDF serialiser probe produced no output".into(),
        ));
    }

    debug!(probe_pdf_len = bytes.len(), "export engines ready");
    Ok(())
}
