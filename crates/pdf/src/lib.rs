//! Label page writer.
//!
//! Produces a paginated PDF where each page is one 100 × 70 mm landscape
//! label: a 2 mm cut-guide border, the fixed inventory title, a barcode
//! raster and the location code in large bold type. The layout is fixed;
//! see [`layout`] for the measurements.

mod document;
mod error;
pub mod font;
pub mod layout;

pub use document::{ImageRef, LabelDocument};
pub use error::PdfError;
