// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembler — builds the output PDF page by page using `printpdf`
// 0.8 and persists it exactly once.
//
// printpdf 0.8 uses a data-oriented API: documents are built by
// constructing `PdfPage` structs containing `Vec<Op>` operation lists, then
// serialised via `PdfDocument::save()`.

use std::path::{Path, PathBuf};

use folio_core::error::{FolioError, Result};
use folio_core::types::PageGeometry;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument};

/// Embedded images are sized at this DPI before scaling; the value cancels
/// out of the placement math.
const PLACEMENT_DPI: f32 = 150.0;

/// Builds the output document page by page.
///
/// The assembler opens with one blank page; `place_image` draws on the
/// current page and `add_page` appends another with the same geometry.
/// `finish` and `save` consume the assembler, so a persisted document can
/// never be mutated afterwards.
pub struct DocumentAssembler {
    doc: PdfDocument,
    geometry: PageGeometry,
    completed: Vec<PdfPage>,
    current_ops: Vec<Op>,
}

impl DocumentAssembler {
    /// Open a new document with a single blank page of the given geometry.
    pub fn new(geometry: PageGeometry, title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            geometry,
            completed: Vec::new(),
            current_ops: Vec::new(),
        }
    }

    /// The page geometry every page of this document uses.
    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Pages so far, including the currently open one.
    pub fn page_count(&self) -> usize {
        self.completed.len() + 1
    }

    /// Close the current page and open a fresh one with the same geometry.
    pub fn add_page(&mut self) {
        let ops = std::mem::take(&mut self.current_ops);
        self.completed.push(self.page(ops));
        debug!(pages = self.completed.len() + 1, "page appended");
    }

    /// Draw an encoded JPEG at `(x_mm, y_mm)` from the page's top-left
    /// corner, scaled to `width_mm` x `height_mm`.
    #[instrument(skip_all, fields(jpeg_len = jpeg.len(), x_mm, y_mm, width_mm, height_mm))]
    pub fn place_image(
        &mut self,
        jpeg: &[u8],
        x_mm: f32,
        y_mm: f32,
        width_mm: f32,
        height_mm: f32,
    ) -> Result<()> {
        let decoded = image::load_from_memory(jpeg).map_err(|err| {
            FolioError::ImageError(format!("failed to decode page image: {}", err))
        })?;
        let width_px = decoded.width() as usize;
        let height_px = decoded.height() as usize;

        // Convert to RGB8 for printpdf.
        let rgb = decoded.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width_px,
            height: height_px,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = self.doc.add_image(&raw);

        // Native image size at PLACEMENT_DPI, scaled to the target rectangle.
        let native_w_pt = width_px as f32 / PLACEMENT_DPI * 72.0;
        let native_h_pt = height_px as f32 / PLACEMENT_DPI * 72.0;
        let scale_x = Mm(width_mm).into_pt().0 / native_w_pt;
        let scale_y = Mm(height_mm).into_pt().0 / native_h_pt;

        // Page space has a bottom-left origin; callers speak top-left mm.
        let translate_x = Mm(x_mm).into_pt();
        let translate_y = Mm(self.geometry.page_height_mm - y_mm - height_mm).into_pt();

        self.current_ops.push(Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(translate_x),
                translate_y: Some(translate_y),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(PLACEMENT_DPI),
                // The writer's native rotation parameter produces blank
                // pages; rotation is always baked into pixels beforehand.
                rotate: None,
            },
        });

        debug!(width_px, height_px, "image placed on current page");
        Ok(())
    }

    /// Serialise the document and return its bytes. Terminal.
    pub fn finish(self) -> Result<Vec<u8>> {
        let Self {
            mut doc,
            geometry,
            mut completed,
            current_ops,
        } = self;

        completed.push(PdfPage::new(
            Mm(geometry.page_width_mm),
            Mm(geometry.page_height_mm),
            current_ops,
        ));
        let page_count = completed.len();
        doc.with_pages(completed);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "PDF serialiser reported warnings");
        }
        if bytes.is_empty() {
            return Err(FolioError::PdfError("serialiser produced no output".into()));
        }

        info!(pages = page_count, bytes = bytes.len(), "document serialised");
        Ok(bytes)
    }

    /// Serialise and write to `path`. Terminal. The file appears complete
    /// or not at all: bytes go to a temporary sibling first, then a rename.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn save(self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.finish()?;

        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        let written = std::fs::write(&tmp, &bytes).and_then(|_| std::fs::rename(&tmp, path));
        if let Err(err) = written {
            let _ = std::fs::remove_file(&tmp);
            return Err(FolioError::Persistence(format!(
                "failed to write {}: {}",
                path.display(),
                err
            )));
        }

        info!(bytes = bytes.len(), "document saved");
        Ok(())
    }

    fn page(&self, ops: Vec<Op>) -> PdfPage {
        PdfPage::new(
            Mm(self.geometry.page_width_mm),
            Mm(self.geometry.page_height_mm),
            ops,
        )
    }
}
