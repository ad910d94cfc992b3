//! Label geometry.
//!
//! Positions are given in millimetres from the top-left corner of the label,
//! the way a label designer measures them, and converted to PDF points
//! (bottom-left origin) when drawn.

/// Label width in millimetres (landscape).
pub const PAGE_WIDTH_MM: f32 = 100.0;
/// Label height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 70.0;

/// Inset of the cut-guide border from every edge.
pub const BORDER_INSET_MM: f32 = 2.0;
/// Stroke width of the border, in points.
pub const BORDER_LINE_PT: f32 = 0.5;

/// Fixed heading printed on every label.
pub const TITLE: &str = "IDENTIFICAÇÃO DE INVENTÁRIO";
/// Title font size in points.
pub const TITLE_SIZE_PT: f32 = 12.0;
/// Title baseline, measured from the top edge.
pub const TITLE_BASELINE_MM: f32 = 11.0;

/// Barcode region, measured from the top-left corner.
pub const BARCODE_REGION: RegionMm = RegionMm {
    x: 10.0,
    top: 16.0,
    width: 80.0,
    height: 30.0,
};

/// Code text font size in points.
pub const CODE_SIZE_PT: f32 = 24.0;
/// Smallest size the code text may shrink to when it would overflow.
pub const CODE_MIN_SIZE_PT: f32 = 10.0;
/// Code text baseline, measured from the top edge.
pub const CODE_BASELINE_MM: f32 = 58.0;
/// Widest the code text may run before it is shrunk.
pub const CODE_MAX_WIDTH_MM: f32 = 86.0;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// A rectangle in label millimetres, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionMm {
    /// Distance from the left edge.
    pub x: f32,
    /// Distance from the top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

/// Convert millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Page width in points.
pub fn page_width_pt() -> f32 {
    mm_to_pt(PAGE_WIDTH_MM)
}

/// Page height in points.
pub fn page_height_pt() -> f32 {
    mm_to_pt(PAGE_HEIGHT_MM)
}

/// Convert a distance from the top edge into a PDF y coordinate.
pub fn y_from_top(top_mm: f32) -> f32 {
    mm_to_pt(PAGE_HEIGHT_MM - top_mm)
}

impl RegionMm {
    /// The region as `(x, y, width, height)` in PDF points, y at the bottom
    /// edge.
    pub fn to_pdf(self) -> (f32, f32, f32, f32) {
        (
            mm_to_pt(self.x),
            y_from_top(self.top + self.height),
            mm_to_pt(self.width),
            mm_to_pt(self.height),
        )
    }
}

/// The cut-guide border as a region.
pub fn border_region() -> RegionMm {
    RegionMm {
        x: BORDER_INSET_MM,
        top: BORDER_INSET_MM,
        width: PAGE_WIDTH_MM - 2.0 * BORDER_INSET_MM,
        height: PAGE_HEIGHT_MM - 2.0 * BORDER_INSET_MM,
    }
}
