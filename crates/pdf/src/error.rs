//! Errors raised while serialising a label document.

/// Label document failures.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    /// `finish` was called before any label was pushed.
    #[error("document has no pages")]
    NoPages,

    /// A page content stream could not be encoded.
    #[error("failed to encode page content: {0}")]
    Content(String),

    /// Writing the finished document failed.
    #[error("failed to write PDF: {0}")]
    Write(String),

    /// The raster handed to the document is unusable.
    #[error("invalid raster: {0}")]
    InvalidRaster(&'static str),
}
