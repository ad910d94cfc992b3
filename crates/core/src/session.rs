//! Operator session state.
//!
//! A [`Session`] owns what the operator has loaded and what happened last:
//! the admitted table, the file name and the last user-facing error. Every
//! operation takes the session explicitly; there is no global state.
//!
//! [`Session::export`] borrows the session mutably for the whole run, so a
//! second export, or a load, cannot start until the first one returns.

use std::fs;
use std::path::Path;

use crate::export::{ExportOutcome, SymbolRenderer, export};
use crate::table::{Upload, check_file_type, parse};
use crate::validate::{ParsedTable, validate};
use crate::{ExportError, TableError};

/// State of one interactive session.
#[derive(Debug, Default)]
pub struct Session {
    table: ParsedTable,
    file_name: Option<String>,
    error: Option<String>,
}

impl Session {
    /// A session with nothing loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// The admitted table; empty until a file loads successfully.
    pub fn table(&self) -> &ParsedTable {
        &self.table
    }

    /// Name of the last accepted file.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Last user-facing error message, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the generate action should be enabled.
    pub fn can_export(&self) -> bool {
        !self.table.is_empty()
    }

    /// Load an uploaded file, replacing the current table.
    ///
    /// A file rejected by the type filter changes nothing but the error
    /// message. A file that fails to parse or lacks `LOCALIZACAO` clears the
    /// table, which disables export.
    pub fn load(&mut self, upload: &Upload) -> Result<&ParsedTable, TableError> {
        if let Err(err) = check_file_type(&upload.name, upload.mime.as_deref()) {
            return Err(self.reject(err));
        }
        self.file_name = Some(upload.name.clone());
        let result = parse(&upload.bytes).and_then(validate);
        self.admit(result)
    }

    /// Load a file from disk, filtering on its name before reading it.
    pub fn load_path(&mut self, path: &Path) -> Result<&ParsedTable, TableError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if let Err(err) = check_file_type(&name, None) {
            return Err(self.reject(err));
        }
        self.file_name = Some(name);
        let result = fs::read(path)
            .map_err(|e| TableError::Parse {
                message: e.to_string(),
                offset: None,
            })
            .and_then(|bytes| parse(&bytes))
            .and_then(validate);
        self.admit(result)
    }

    /// Forget the loaded table and any message.
    pub fn clear(&mut self) {
        self.table = ParsedTable::default();
        self.file_name = None;
        self.error = None;
    }

    /// Export the loaded table.
    ///
    /// Fails fast with [`ExportError::NoDataToExport`] when nothing is
    /// loaded. Whatever the outcome, the table stays loaded so the operator
    /// can retry.
    pub fn export<R>(&mut self, renderer: &R) -> Result<ExportOutcome, ExportError>
    where
        R: SymbolRenderer + ?Sized,
    {
        if self.table.is_empty() {
            let err = ExportError::NoDataToExport;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let result = export(&self.table, renderer);

        match &result {
            Ok(_) => self.error = None,
            Err(err) => self.error = Some(err.to_string()),
        }
        result
    }

    fn reject(&mut self, err: TableError) -> TableError {
        tracing::info!(error = %err, "file rejected");
        self.error = Some(err.to_string());
        err
    }

    fn admit(
        &mut self,
        result: Result<ParsedTable, TableError>,
    ) -> Result<&ParsedTable, TableError> {
        match result {
            Ok(table) => {
                tracing::info!(
                    file = self.file_name.as_deref().unwrap_or_default(),
                    rows = table.len(),
                    "table loaded"
                );
                self.table = table;
                self.error = None;
                Ok(&self.table)
            }
            Err(err) => {
                self.table = ParsedTable::default();
                Err(self.reject(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Code128Renderer;

    const GOOD: &str = "LOCALIZACAO;QUANTIDADE\nA-01-01;1\nA-01-02;2\n";

    fn upload(name: &str, text: &str) -> Upload {
        Upload::new(name, text.as_bytes())
    }

    #[test]
    fn fresh_session_cannot_export() {
        let mut session = Session::new();
        assert!(!session.can_export());
        let err = session.export(&Code128Renderer::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoDataToExport));
        assert_eq!(session.error(), Some("Nenhum dado para exportar."));
    }

    #[test]
    fn invalid_file_type_keeps_the_current_table() {
        let mut session = Session::new();
        session.load(&upload("locais.csv", GOOD)).unwrap();
        let err = session.load(&upload("locais.pdf", GOOD)).unwrap_err();
        assert!(matches!(err, TableError::InvalidFileType { .. }));
        assert_eq!(session.table().len(), 2);
        assert_eq!(session.file_name(), Some("locais.csv"));
        assert!(session.error().is_some());
    }

    #[test]
    fn missing_column_clears_a_previously_loaded_table() {
        let mut session = Session::new();
        session.load(&upload("a.csv", GOOD)).unwrap();
        assert!(session.can_export());

        let err = session.load(&upload("b.csv", "CODIGO\nA-01-01\n")).unwrap_err();
        assert!(matches!(err, TableError::MissingRequiredColumn { .. }));
        assert!(session.table().is_empty());
        assert!(!session.can_export());
        assert_eq!(
            session.error(),
            Some("O arquivo CSV deve conter a coluna LOCALIZACAO.")
        );
    }

    #[test]
    fn parse_failure_clears_the_table() {
        let mut session = Session::new();
        session.load(&upload("a.csv", GOOD)).unwrap();
        let bad = Upload::new("b.csv", b"LOCALIZACAO\n\xff\xfe\n".to_vec());
        assert!(matches!(
            session.load(&bad),
            Err(TableError::Parse { .. })
        ));
        assert!(session.table().is_empty());
    }

    #[test]
    fn mime_type_admits_unnamed_uploads() {
        let mut session = Session::new();
        let file = upload("blob", GOOD).with_mime("text/csv");
        assert_eq!(session.load(&file).unwrap().len(), 2);
    }

    #[test]
    fn success_clears_the_error() {
        let mut session = Session::new();
        let _ = session.load(&upload("x.txt", GOOD));
        assert!(session.error().is_some());
        session.load(&upload("a.csv", GOOD)).unwrap();
        assert!(session.error().is_none());

        let outcome = session.export(&Code128Renderer::default()).unwrap();
        assert_eq!(outcome.pages.len(), 3);
        assert!(session.can_export());
    }

    #[test]
    fn exports_can_be_repeated() {
        let mut session = Session::new();
        session.load(&upload("a.csv", GOOD)).unwrap();
        let first = session.export(&Code128Renderer::default()).unwrap();
        let second = session.export(&Code128Renderer::default()).unwrap();
        assert_eq!(first.pages, second.pages);
        assert_eq!(first.pdf.len(), second.pdf.len());
    }

    #[test]
    fn failed_export_keeps_the_table_for_a_retry() {
        let mut session = Session::new();
        session
            .load(&upload("a.csv", "LOCALIZACAO\nÇ-01\n"))
            .unwrap();
        let err = session.export(&Code128Renderer::default()).unwrap_err();
        assert!(matches!(err, ExportError::NoLabelsRendered { .. }));
        assert!(session.error().is_some());
        assert!(session.can_export());
    }

    #[test]
    fn load_path_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locais.csv");
        fs::write(&path, GOOD).unwrap();

        let mut session = Session::new();
        assert_eq!(session.load_path(&path).unwrap().len(), 2);
        assert_eq!(session.file_name(), Some("locais.csv"));

        let missing = dir.path().join("nope.csv");
        assert!(matches!(
            session.load_path(&missing),
            Err(TableError::Parse { offset: None, .. })
        ));
        assert!(session.table().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut session = Session::new();
        session.load(&upload("a.csv", GOOD)).unwrap();
        session.clear();
        assert!(session.table().is_empty());
        assert!(session.file_name().is_none());
        assert!(session.error().is_none());
    }
}
