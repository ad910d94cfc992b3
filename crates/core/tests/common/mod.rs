//! Shared test helpers for `loclabel_core` integration tests.

#![allow(unreachable_pub)]

use std::cell::Cell;

use loclabel_core::{
    BarcodeRaster, Code128Renderer, ParsedTable, SymbolRenderError, SymbolRenderer, parse,
    validate,
};
use lopdf::Document;

/// Parse and validate `text`, panicking on any table error.
pub fn table(text: &str) -> ParsedTable {
    let raw = parse(text.as_bytes()).unwrap_or_else(|e| panic!("parse failed: {e}"));
    validate(raw).unwrap_or_else(|e| panic!("validate failed: {e}"))
}

/// Number of pages in a serialised PDF.
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    Document::load_mem(bytes)
        .unwrap_or_else(|e| panic!("output is not a readable PDF: {e}"))
        .get_pages()
        .len()
}

// ─── Renderers ───────────────────────────────────────────────────────────────

/// Production renderer that counts how often it is called.
#[derive(Default)]
pub struct Counting {
    inner: Code128Renderer,
    pub calls: Cell<usize>,
}

impl SymbolRenderer for Counting {
    fn render(&self, code: &str) -> Result<BarcodeRaster, SymbolRenderError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.render(code)
    }
}

/// Renderer that refuses every code.
pub struct Refusing;

impl SymbolRenderer for Refusing {
    fn render(&self, code: &str) -> Result<BarcodeRaster, SymbolRenderError> {
        Err(SymbolRenderError::UnsupportedCharacter {
            code: code.to_owned(),
            character: code.chars().next().unwrap_or('?'),
            position: 0,
        })
    }
}
