//! Raster settings for the barcode renderer.

/// Raster geometry for a rendered symbol.
///
/// Defaults give crisp bars once the raster is scaled into the 80 mm wide
/// barcode region of a label: 2 px per module keeps every bar edge on a
/// pixel boundary, and 100 px of bar height leaves room for a handheld
/// scanner to sweep at an angle.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterOptions {
    /// Pixels per narrow module (the magnification).
    pub module_px: u32,
    /// Bar height in pixels.
    pub bar_height_px: u32,
    /// Blank modules on each side of the symbol.
    pub quiet_zone_modules: u32,
    /// Upper bound on the raster width in pixels.
    pub max_width_px: u32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            module_px: 2,
            bar_height_px: 100,
            quiet_zone_modules: 10,
            max_width_px: 2400,
        }
    }
}

impl RasterOptions {
    /// Override the magnification.
    pub fn with_module_px(mut self, module_px: u32) -> Self {
        self.module_px = module_px;
        self
    }

    /// Override the bar height.
    pub fn with_bar_height_px(mut self, bar_height_px: u32) -> Self {
        self.bar_height_px = bar_height_px;
        self
    }
}
