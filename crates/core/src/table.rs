//! Tabular input: file admission and `;`-delimited parsing.

use crate::TableError;

/// MIME type accepted without looking at the file name.
pub const CSV_MIME: &str = "text/csv";

const BOM: char = '\u{FEFF}';

/// A file handed over by the operator, before it is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// File name, used for the type filter and for status messages.
    pub name: String,
    /// MIME type declared by whatever supplied the file.
    pub mime: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// An upload with no declared MIME type.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            mime: None,
            bytes: bytes.into(),
        }
    }

    /// Attach a declared MIME type.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// One data record as read, before any column is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// 1-based line where the record starts.
    pub line: u64,
    /// Field values, in column order.
    pub fields: Vec<String>,
}

/// Header plus records, all values still strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the header line.
    pub columns: Vec<String>,
    /// Data records in file order; blank lines are not included.
    pub records: Vec<RawRecord>,
}

/// Accept files declared as `text/csv` or named `*.csv`.
///
/// Runs before any byte is read, so a rejected file leaves no trace.
pub fn check_file_type(name: &str, mime: Option<&str>) -> Result<(), TableError> {
    let declared_csv = mime.is_some_and(|m| m.eq_ignore_ascii_case(CSV_MIME));
    let named_csv = name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("csv"));
    if declared_csv || named_csv {
        Ok(())
    } else {
        Err(TableError::InvalidFileType {
            name: name.to_owned(),
            mime: mime.map(str::to_owned),
        })
    }
}

/// Parse `;`-delimited UTF-8 text. The first line is the header; blank lines
/// are skipped; short and long records are kept as they are.
pub fn parse(bytes: &[u8]) -> Result<RawTable, TableError> {
    let text = std::str::from_utf8(bytes).map_err(|e| TableError::Parse {
        message: format!("o arquivo não está codificado em UTF-8 ({e})"),
        offset: Some(e.valid_up_to() as u64),
    })?;
    let (text, skipped) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, BOM.len_utf8() as u64),
        None => (text, 0),
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e, skipped))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, skipped))?;
        records.push(RawRecord {
            line: record.position().map_or(0, |p| source_line(text, p.byte())),
            fields: record.iter().map(str::to_owned).collect(),
        });
    }

    tracing::debug!(
        columns = columns.len(),
        records = records.len(),
        "parsed delimited text"
    );
    Ok(RawTable { columns, records })
}

/// 1-based line of the record whose position is `byte`.
///
/// The reader reports where it resumed, which may be inside the previous
/// terminator or before skipped blank lines, so terminators are stepped over
/// first. Lines are counted by `\n`, which covers both LF and CRLF files.
fn source_line(text: &str, byte: u64) -> u64 {
    let bytes = text.as_bytes();
    let mut start = usize::try_from(byte).map_or(bytes.len(), |b| b.min(bytes.len()));
    while start < bytes.len() && matches!(bytes[start], b'\r' | b'\n') {
        start += 1;
    }
    1 + bytes[..start].iter().filter(|&&b| b == b'\n').count() as u64
}

fn csv_error(err: csv::Error, skipped: u64) -> TableError {
    let offset = err.position().map(|p| p.byte() + skipped);
    TableError::Parse {
        message: err.to_string(),
        offset,
    }
}
