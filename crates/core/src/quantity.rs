//! `QUANTIDADE` interpretation.

/// Copies printed when the quantity cell is missing or unusable.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Parse a copy count, falling back to [`DEFAULT_QUANTITY`].
///
/// Surrounding whitespace is ignored. Anything that is not a positive
/// base-10 integer (absent, empty, text, zero, negative, overflowing)
/// yields the default rather than an error.
pub fn parse_quantity(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_QUANTITY)
}
