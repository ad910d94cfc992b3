//! Rasterisation of encoded symbols.

use image::{GrayImage, Luma};

use crate::{RasterOptions, SymbolRenderError, code128};

const BLACK: Luma<u8> = Luma([0]);
const WHITE: Luma<u8> = Luma([255]);

/// A rendered Code 128 symbol for one location code.
///
/// The bitmap holds bars only; the human-readable code is drawn by whoever
/// places the raster on a page.
#[derive(Debug, Clone)]
pub struct BarcodeRaster {
    code: String,
    image: GrayImage,
}

impl BarcodeRaster {
    /// The code this raster encodes.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The 8-bit greyscale bitmap.
    pub fn image(&self) -> &GrayImage {
        &self.image
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the raster, returning the bitmap.
    pub fn into_image(self) -> GrayImage {
        self.image
    }
}

/// Encode `code` and draw it as a bar raster.
pub fn render(code: &str, options: &RasterOptions) -> Result<BarcodeRaster, SymbolRenderError> {
    if options.module_px == 0 {
        return Err(SymbolRenderError::InvalidOptions("module_px must be at least 1"));
    }
    if options.bar_height_px == 0 {
        return Err(SymbolRenderError::InvalidOptions("bar_height_px must be at least 1"));
    }

    let values = code128::encode(code)?;
    let widths = code128::modules(&values);
    let total_modules = code128::module_count(&values) + 2 * options.quiet_zone_modules;
    let width = total_modules.saturating_mul(options.module_px);
    if width > options.max_width_px {
        return Err(SymbolRenderError::TooWide {
            code: code.to_owned(),
            width,
            max: options.max_width_px,
        });
    }

    let mut image = GrayImage::from_pixel(width, options.bar_height_px, WHITE);
    let mut x = options.quiet_zone_modules * options.module_px;
    for (i, &w) in widths.iter().enumerate() {
        let span = u32::from(w) * options.module_px;
        // Even positions are bars, odd positions are spaces.
        if i % 2 == 0 {
            for column in x..x + span {
                for y in 0..options.bar_height_px {
                    image.put_pixel(column, y, BLACK);
                }
            }
        }
        x += span;
    }

    Ok(BarcodeRaster {
        code: code.to_owned(),
        image,
    })
}
