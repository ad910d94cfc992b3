//! Code 128 barcode rendering for warehouse location labels.
//!
//! [`render`] turns a location code such as `A-01-05` into a greyscale bar
//! raster with no human-readable text. [`code128::encode`] exposes the
//! symbol values on their own for callers that draw bars themselves.

pub mod code128;
mod config;
mod error;
mod raster;

pub use config::RasterOptions;
pub use error::SymbolRenderError;
pub use raster::{BarcodeRaster, render};
