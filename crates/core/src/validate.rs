//! Column gate between parsing and export.

use serde::Serialize;

use crate::quantity::parse_quantity;
use crate::table::RawTable;
use crate::TableError;

/// Required column holding the location code.
pub const LOCATION_COLUMN: &str = "LOCALIZACAO";
/// Optional column holding the number of copies.
pub const QUANTITY_COLUMN: &str = "QUANTIDADE";

/// One data row of an admitted table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputRow {
    /// 1-based source line.
    pub line: u64,
    /// `LOCALIZACAO` cell as read; may be blank.
    pub location_code: String,
    /// `QUANTIDADE` cell as read, `None` when the column or cell is absent.
    pub quantity: Option<String>,
}

impl InputRow {
    /// The code to print, or `None` for a blank cell.
    pub fn code(&self) -> Option<&str> {
        let code = self.location_code.trim();
        (!code.is_empty()).then_some(code)
    }

    /// Copies to print for this row; see [`parse_quantity`].
    pub fn copies(&self) -> u32 {
        parse_quantity(self.quantity.as_deref())
    }
}

/// Rows admitted by [`validate`], in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    columns: Vec<String>,
    rows: Vec<InputRow>,
}

/// Counts shown to the operator after a file is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Header columns.
    pub columns: Vec<String>,
    /// Data rows admitted.
    pub rows: usize,
    /// Rows with a non-blank code.
    pub printable_rows: usize,
    /// Rows with a blank code; they produce no label.
    pub blank_rows: usize,
    /// Label pages an export would produce if every code renders.
    pub labels: u64,
}

impl ParsedTable {
    /// Column names from the header.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in file order.
    pub fn rows(&self) -> &[InputRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when there is nothing to export.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row and label counts.
    pub fn summary(&self) -> TableSummary {
        let printable: Vec<&InputRow> = self.rows.iter().filter(|r| r.code().is_some()).collect();
        TableSummary {
            columns: self.columns.clone(),
            rows: self.rows.len(),
            printable_rows: printable.len(),
            blank_rows: self.rows.len() - printable.len(),
            labels: printable.iter().map(|r| u64::from(r.copies())).sum(),
        }
    }
}

/// Require a `LOCALIZACAO` column and admit every record.
///
/// This is a gate on the header only: rows with blank codes pass through and
/// are dropped later, at export time.
pub fn validate(raw: RawTable) -> Result<ParsedTable, TableError> {
    let Some(code_index) = raw.columns.iter().position(|c| c == LOCATION_COLUMN) else {
        tracing::debug!(columns = ?raw.columns, "header lacks {LOCATION_COLUMN}");
        return Err(TableError::MissingRequiredColumn {
            columns: raw.columns,
        });
    };
    let quantity_index = raw.columns.iter().position(|c| c == QUANTITY_COLUMN);

    let rows = raw
        .records
        .into_iter()
        .map(|record| {
            let mut fields = record.fields;
            let quantity = quantity_index.and_then(|i| fields.get_mut(i).map(std::mem::take));
            let location_code = fields
                .get_mut(code_index)
                .map(std::mem::take)
                .unwrap_or_default();
            InputRow {
                line: record.line,
                location_code,
                quantity,
            }
        })
        .collect();

    Ok(ParsedTable {
        columns: raw.columns,
        rows,
    })
}
