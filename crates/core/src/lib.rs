//! Warehouse location label pipeline.
//!
//! Turns a `;`-delimited location list into a PDF of 100 × 70 mm labels:
//! [`parse`] reads the file, [`validate`] gates it on the `LOCALIZACAO`
//! column, and [`export`] renders one Code 128 label page per requested
//! copy. [`Session`] ties the steps together the way an operator drives
//! them: load a file, fix it if rejected, generate.

/// Error types for loading and exporting.
pub mod error;
/// Label export and the barcode renderer seam.
pub mod export;
/// `QUANTIDADE` parse-or-default.
pub mod quantity;
/// Operator session state.
pub mod session;
/// File admission and delimited text parsing.
pub mod table;
/// The downloadable input template.
pub mod template;
/// Header gate and admitted rows.
pub mod validate;

// ── Convenience re-exports ──────────────────────────────────────────────────

pub use error::{ExportError, TableError};
pub use export::{
    Code128Renderer, ExportOutcome, ExportSummary, FailedRow, OUTPUT_FILE_NAME, SymbolRenderer,
    export, preflight,
};
pub use quantity::{DEFAULT_QUANTITY, parse_quantity};
pub use session::Session;
pub use table::{RawRecord, RawTable, Upload, check_file_type, parse};
pub use template::{TEMPLATE_FILE_NAME, template_bytes};
pub use validate::{
    InputRow, LOCATION_COLUMN, ParsedTable, QUANTITY_COLUMN, TableSummary, validate,
};

// Re-exported so renderer implementations need only this crate.
pub use loclabel_barcode::{BarcodeRaster, RasterOptions, SymbolRenderError};
