//! Typed error for barcode rendering.

/// A location code that could not be turned into a Code 128 symbol.
///
/// Every variant carries the offending code so the caller can report which
/// row failed without keeping its own copy around.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SymbolRenderError {
    /// The code was empty; Code 128 needs at least one data character.
    #[error("cannot encode an empty code")]
    Empty,

    /// The code contains a character outside printable ASCII.
    #[error("unsupported character {character:?} at position {position} in code {code:?}")]
    UnsupportedCharacter {
        /// The full code as supplied.
        code: String,
        /// The first character Code 128 set B cannot carry.
        character: char,
        /// Character index (not byte offset) of `character` in `code`.
        position: usize,
    },

    /// The raster would exceed the configured maximum width.
    #[error("code {code:?} needs {width}px, more than the {max}px limit")]
    TooWide {
        /// The full code as supplied.
        code: String,
        /// Computed raster width in pixels.
        width: u32,
        /// Configured limit.
        max: u32,
    },

    /// The raster options cannot produce a visible symbol.
    #[error("invalid raster options: {0}")]
    InvalidOptions(&'static str),
}

impl SymbolRenderError {
    /// The code that failed, when the error is tied to one.
    pub fn code(&self) -> Option<&str> {
        match self {
            SymbolRenderError::UnsupportedCharacter { code, .. }
            | SymbolRenderError::TooWide { code, .. } => Some(code),
            SymbolRenderError::Empty => Some(""),
            SymbolRenderError::InvalidOptions(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_reported_for_data_errors() {
        let err = SymbolRenderError::UnsupportedCharacter {
            code: "AÇ-1".into(),
            character: 'Ç',
            position: 1,
        };
        assert_eq!(err.code(), Some("AÇ-1"));
        assert_eq!(SymbolRenderError::Empty.code(), Some(""));
        assert_eq!(SymbolRenderError::InvalidOptions("x").code(), None);
    }

    #[test]
    fn message_names_the_character() {
        let err = SymbolRenderError::UnsupportedCharacter {
            code: "A\tB".into(),
            character: '\t',
            position: 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("'\\t'"), "unexpected message: {msg}");
        assert!(msg.contains("position 1"), "unexpected message: {msg}");
    }
}
