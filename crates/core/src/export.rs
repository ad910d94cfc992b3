//! Label export: rows in, one paginated PDF out.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use loclabel_barcode::{BarcodeRaster, RasterOptions, SymbolRenderError};
use loclabel_pdf::{ImageRef, LabelDocument};
use serde::Serialize;

use crate::validate::{InputRow, ParsedTable};
use crate::ExportError;

/// File name of the generated document.
pub const OUTPUT_FILE_NAME: &str = "etiquetas_localizacao.pdf";

// ── Renderer seam ───────────────────────────────────────────────────────

/// Turns a location code into a barcode raster.
pub trait SymbolRenderer {
    /// Render `code`. Errors are per-code and never abort an export.
    fn render(&self, code: &str) -> Result<BarcodeRaster, SymbolRenderError>;
}

/// The production renderer: Code 128 with fixed raster options.
#[derive(Debug, Clone, Default)]
pub struct Code128Renderer {
    options: RasterOptions,
}

impl Code128Renderer {
    /// A renderer using `options` for every code.
    pub fn new(options: RasterOptions) -> Self {
        Self { options }
    }
}

impl SymbolRenderer for Code128Renderer {
    fn render(&self, code: &str) -> Result<BarcodeRaster, SymbolRenderError> {
        loclabel_barcode::render(code, &self.options)
    }
}

// ── Results ─────────────────────────────────────────────────────────────

/// A row that produced no pages because its code could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRow {
    /// 1-based source line.
    pub line: u64,
    /// The code as it would have been printed.
    pub code: String,
    /// Why rendering failed.
    pub reason: String,
}

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Name to save [`pdf`](Self::pdf) under.
    pub file_name: &'static str,
    /// The serialised document.
    pub pdf: Vec<u8>,
    /// Code printed on each page, in page order.
    pub pages: Vec<String>,
    /// Rows skipped because their barcode failed.
    pub failed: Vec<FailedRow>,
}

/// What an export produced, without the document bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    /// Output file name.
    pub file_name: String,
    /// Pages written.
    pub pages: usize,
    /// Distinct codes printed.
    pub codes: usize,
    /// Document size in bytes.
    pub bytes: usize,
    /// Rows skipped because their barcode failed.
    pub failed: Vec<FailedRow>,
}

impl ExportOutcome {
    /// Counts for reporting.
    pub fn summary(&self) -> ExportSummary {
        let mut codes: Vec<&str> = self.pages.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes.dedup();
        ExportSummary {
            file_name: self.file_name.to_owned(),
            pages: self.pages.len(),
            codes: codes.len(),
            bytes: self.pdf.len(),
            failed: self.failed.clone(),
        }
    }
}

// ── Export ──────────────────────────────────────────────────────────────

/// Build the label document for `table`.
///
/// Rows are visited in order. Blank codes are skipped. Each remaining row
/// emits [`InputRow::copies`] identical pages; a row whose barcode fails
/// emits none and is listed in [`ExportOutcome::failed`]. Each distinct code
/// is rendered once per call and its raster shared by every page showing it.
///
/// An empty table fails with [`ExportError::NoDataToExport`] before the
/// renderer is touched. A run that ends with zero pages fails with
/// [`ExportError::NoLabelsRendered`] and produces no document.
pub fn export<R>(table: &ParsedTable, renderer: &R) -> Result<ExportOutcome, ExportError>
where
    R: SymbolRenderer + ?Sized,
{
    if table.is_empty() {
        return Err(ExportError::NoDataToExport);
    }

    let mut doc = LabelDocument::new();
    let mut images: HashMap<&str, Result<ImageRef, String>> = HashMap::new();
    let mut pages = Vec::new();
    let mut failed = Vec::new();

    for row in table.rows() {
        let Some(code) = row.code() else {
            tracing::debug!(line = row.line, "row has no location code, skipped");
            continue;
        };
        let image = match images.entry(code) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(rasterize(&mut doc, renderer, code)).clone(),
        };
        match emit_row(&mut doc, row, code, image) {
            Ok(copies) => pages.extend(std::iter::repeat_n(code.to_owned(), copies)),
            Err(RowError::Render(failure)) => {
                tracing::warn!(
                    line = failure.line,
                    code = %failure.code,
                    reason = %failure.reason,
                    "barcode failed, row skipped"
                );
                failed.push(failure);
            }
            Err(RowError::Document(err)) => return Err(err.into()),
        }
    }

    if pages.is_empty() {
        return Err(ExportError::NoLabelsRendered { failed });
    }

    let pdf = doc.finish()?;
    tracing::info!(
        pages = pages.len(),
        failed = failed.len(),
        bytes = pdf.len(),
        "labels exported"
    );
    Ok(ExportOutcome {
        file_name: OUTPUT_FILE_NAME,
        pdf,
        pages,
        failed,
    })
}

/// Render every distinct code once and report the rows that would fail,
/// without building a document.
pub fn preflight<R>(table: &ParsedTable, renderer: &R) -> Vec<FailedRow>
where
    R: SymbolRenderer + ?Sized,
{
    let mut verdicts: HashMap<&str, Option<String>> = HashMap::new();
    let mut failed = Vec::new();
    for row in table.rows() {
        let Some(code) = row.code() else { continue };
        let verdict = verdicts
            .entry(code)
            .or_insert_with(|| renderer.render(code).err().map(|e| e.to_string()));
        if let Some(reason) = verdict {
            failed.push(FailedRow {
                line: row.line,
                code: code.to_owned(),
                reason: reason.clone(),
            });
        }
    }
    failed
}

enum RowError {
    Render(FailedRow),
    Document(loclabel_pdf::PdfError),
}

/// Emit every copy of one row, returning how many pages were added.
fn emit_row(
    doc: &mut LabelDocument,
    row: &InputRow,
    code: &str,
    image: Result<ImageRef, String>,
) -> Result<usize, RowError> {
    let image = image.map_err(|reason| {
        RowError::Render(FailedRow {
            line: row.line,
            code: code.to_owned(),
            reason,
        })
    })?;
    let copies = row.copies() as usize;
    for _ in 0..copies {
        doc.push_label(code, &image).map_err(RowError::Document)?;
    }
    tracing::debug!(line = row.line, code, copies, "row emitted");
    Ok(copies)
}

/// Render `code` and embed the raster, keeping the failure text on error.
fn rasterize<R>(doc: &mut LabelDocument, renderer: &R, code: &str) -> Result<ImageRef, String>
where
    R: SymbolRenderer + ?Sized,
{
    let raster = renderer.render(code).map_err(|e| e.to_string())?;
    doc.add_raster(raster.image()).map_err(|e| e.to_string())
}
