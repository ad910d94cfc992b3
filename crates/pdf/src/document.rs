//! Multi-page label document.

use image::GrayImage;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};

use crate::PdfError;
use crate::font::{self, FONT_NAME};
use crate::layout::{self, BARCODE_REGION, RegionMm};

/// Resource name of the label font inside every page.
const FONT_RESOURCE: &str = "F1";

/// Handle to a barcode raster already embedded in a [`LabelDocument`].
///
/// The same handle can be placed on any number of pages; the image bytes are
/// stored once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    id: ObjectId,
    name: String,
}

impl ImageRef {
    /// Resource name used in page content (e.g. `Im1`).
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Builds a PDF where every page is one 100 × 70 mm label.
///
/// ```
/// use loclabel_pdf::LabelDocument;
///
/// let raster = image::GrayImage::from_pixel(40, 10, image::Luma([0]));
/// let mut doc = LabelDocument::new();
/// let barcode = doc.add_raster(&raster).unwrap();
/// doc.push_label("A-01-01", &barcode).unwrap();
/// doc.push_label("A-01-01", &barcode).unwrap();
/// assert_eq!(doc.page_count(), 2);
/// let bytes = doc.finish().unwrap();
/// assert!(bytes.starts_with(b"%PDF-"));
/// ```
pub struct LabelDocument {
    doc: Document,
    pages_id: ObjectId,
    font_id: ObjectId,
    pages: Vec<ObjectId>,
    images: usize,
}

impl Default for LabelDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelDocument {
    /// Start an empty document.
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => FONT_NAME,
            "Encoding" => "WinAnsiEncoding",
        });
        Self {
            doc,
            pages_id,
            font_id,
            pages: Vec::new(),
            images: 0,
        }
    }

    /// Number of label pages pushed so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of distinct rasters embedded.
    pub fn image_count(&self) -> usize {
        self.images
    }

    /// Embed a greyscale raster and return a handle for placing it.
    pub fn add_raster(&mut self, raster: &GrayImage) -> Result<ImageRef, PdfError> {
        if raster.width() == 0 || raster.height() == 0 {
            return Err(PdfError::InvalidRaster("raster has no pixels"));
        }
        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(raster.width()),
                "Height" => i64::from(raster.height()),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8_i64,
                // Bars must keep hard edges when scaled up.
                "Interpolate" => false,
            },
            raster.as_raw().clone(),
        );
        let id = self.doc.add_object(stream);
        self.images += 1;
        Ok(ImageRef {
            id,
            name: format!("Im{}", self.images),
        })
    }

    /// Append one label page showing `barcode` and the human-readable `code`.
    pub fn push_label(&mut self, code: &str, barcode: &ImageRef) -> Result<(), PdfError> {
        let content = Content {
            operations: label_operations(code, barcode.name()),
        };
        let encoded = content
            .encode()
            .map_err(|e| PdfError::Content(e.to_string()))?;
        let content_id = self.doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0_i64.into(),
                0_i64.into(),
                layout::page_width_pt().into(),
                layout::page_height_pt().into(),
            ],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "Font" => dictionary! { FONT_RESOURCE => self.font_id },
                "XObject" => dictionary! { barcode.name() => barcode.id },
            },
        });
        self.pages.push(page_id);
        Ok(())
    }

    /// Close the page tree and serialise the document.
    pub fn finish(mut self) -> Result<Vec<u8>, PdfError> {
        if self.pages.is_empty() {
            return Err(PdfError::NoPages);
        }

        let kids: Vec<Object> = self.pages.iter().map(|&id| id.into()).collect();
        let count = self.pages.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        let info_id = self.doc.add_object(dictionary! {
            "Producer" => Object::string_literal(concat!("loclabel ", env!("CARGO_PKG_VERSION"))),
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.trailer.set("Info", info_id);

        self.doc.compress();
        let mut out = Vec::new();
        self.doc
            .save_to(&mut out)
            .map_err(|e| PdfError::Write(e.to_string()))?;
        tracing::debug!(
            pages = count,
            images = self.images,
            bytes = out.len(),
            "label document written"
        );
        Ok(out)
    }
}

/// Content stream for one label: border, title, barcode, code text.
fn label_operations(code: &str, image_name: &str) -> Vec<Operation> {
    let mut ops = Vec::with_capacity(24);

    let (bx, by, bw, bh) = layout::border_region().to_pdf();
    ops.push(Operation::new("w", vec![layout::BORDER_LINE_PT.into()]));
    ops.push(Operation::new(
        "re",
        vec![bx.into(), by.into(), bw.into(), bh.into()],
    ));
    ops.push(Operation::new("S", vec![]));

    centred_text(
        &mut ops,
        layout::TITLE,
        layout::TITLE_SIZE_PT,
        layout::TITLE_BASELINE_MM,
    );

    draw_image(&mut ops, image_name, BARCODE_REGION);

    centred_text(
        &mut ops,
        code,
        code_size(code),
        layout::CODE_BASELINE_MM,
    );

    ops
}

/// Code text size: the fixed size, shrunk only when the code would run past
/// the border.
fn code_size(code: &str) -> f32 {
    let max_width = layout::mm_to_pt(layout::CODE_MAX_WIDTH_MM);
    let width = font::text_width(code, layout::CODE_SIZE_PT);
    if width <= max_width {
        layout::CODE_SIZE_PT
    } else {
        (layout::CODE_SIZE_PT * max_width / width).max(layout::CODE_MIN_SIZE_PT)
    }
}

fn centred_text(ops: &mut Vec<Operation>, text: &str, size_pt: f32, baseline_mm: f32) {
    let x = (layout::page_width_pt() - font::text_width(text, size_pt)) / 2.0;
    let y = layout::y_from_top(baseline_mm);
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![FONT_RESOURCE.into(), size_pt.into()],
    ));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(
            font::encode_win_ansi(text),
            StringFormat::Literal,
        )],
    ));
    ops.push(Operation::new("ET", vec![]));
}

fn draw_image(ops: &mut Vec<Operation>, name: &str, region: RegionMm) {
    let (x, y, w, h) = region.to_pdf();
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "cm",
        vec![w.into(), 0_i64.into(), 0_i64.into(), h.into(), x.into(), y.into()],
    ));
    ops.push(Operation::new("Do", vec![name.into()]));
    ops.push(Operation::new("Q", vec![]));
}
