//! Error types for loading tables and exporting labels.
//!
//! Display strings are the operator-facing messages and stay in Portuguese;
//! log lines and field docs are in English.

use loclabel_pdf::PdfError;

use crate::export::FailedRow;

/// Failures while admitting an input file.
///
/// Every variant leaves a [`Session`](crate::Session) in a retryable state:
/// the operator may pick another file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The file is neither declared as `text/csv` nor named `*.csv`.
    #[error("Por favor, selecione um arquivo CSV válido.")]
    InvalidFileType {
        /// File name as supplied.
        name: String,
        /// Declared MIME type, when known.
        mime: Option<String>,
    },

    /// The file could not be read or decoded as `;`-delimited UTF-8 text.
    #[error("Erro ao processar o arquivo CSV: {message}")]
    Parse {
        /// Underlying reader or decoder message.
        message: String,
        /// Byte offset in the file where the problem was detected.
        offset: Option<u64>,
    },

    /// The header has no `LOCALIZACAO` column.
    #[error("O arquivo CSV deve conter a coluna LOCALIZACAO.")]
    MissingRequiredColumn {
        /// Columns that were found instead.
        columns: Vec<String>,
    },
}

impl TableError {
    /// Stable identifier for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            TableError::InvalidFileType { .. } => "invalid_file_type",
            TableError::Parse { .. } => "parse_error",
            TableError::MissingRequiredColumn { .. } => "missing_required_column",
        }
    }
}

/// Failures of a whole export run.
///
/// Per-row barcode failures are not errors here; they are collected in
/// [`ExportOutcome::failed`](crate::ExportOutcome::failed).
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The table is empty; nothing was rendered.
    #[error("Nenhum dado para exportar.")]
    NoDataToExport,

    /// Rows existed but none produced a page.
    #[error("Nenhuma etiqueta pôde ser gerada ({} linha(s) com erro).", .failed.len())]
    NoLabelsRendered {
        /// Rows whose code could not be rendered.
        failed: Vec<FailedRow>,
    },

    /// The label document could not be serialised.
    #[error("Erro ao gerar o PDF: {0}")]
    Document(#[from] PdfError),
}

impl ExportError {
    /// Stable identifier for machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            ExportError::NoDataToExport => "no_data_to_export",
            ExportError::NoLabelsRendered { .. } => "no_labels_rendered",
            ExportError::Document(_) => "document_error",
        }
    }
}
