//! The sample input file offered to operators.

/// File name the template is saved under.
pub const TEMPLATE_FILE_NAME: &str = "modelo_localizacao.csv";

/// Template contents. The leading BOM makes spreadsheet tools open the file
/// as UTF-8.
const TEMPLATE_CSV: &str = "\u{FEFF}LOCALIZACAO;QUANTIDADE\nA-01-01;1\nA-01-02;2\nB-05-10;1";

/// The template file, byte for byte.
pub fn template_bytes() -> &'static [u8] {
    TEMPLATE_CSV.as_bytes()
}
