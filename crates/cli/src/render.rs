//! Terminal and JSON rendering for command results.
//!
//! Table errors with a known position are drawn against the input file with
//! ariadne. Everything else is a one-line message on stderr in pretty mode,
//! or a single JSON object on stdout in JSON mode.

use std::io::{self, IsTerminal};
use std::ops::Range;
use std::path::Path;

use anyhow::Result;
use ariadne::{Color, Config, Fmt, IndexType, Label, Report, ReportKind, Source};
use loclabel_core::{
    ExportError, ExportSummary, FailedRow, LOCATION_COLUMN, TableError, TableSummary,
};
use serde_json::json;

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, otherwise pick by whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Table errors ────────────────────────────────────────────────────────

/// Render a rejected input file.
pub(crate) fn render_table_error(err: &TableError, filename: &str, bytes: &[u8], format: Format) {
    match format {
        Format::Json => {
            let mut out = json!({
                "success": false,
                "error": err.kind(),
                "message": err.to_string(),
                "file": filename,
            });
            match err {
                TableError::MissingRequiredColumn { columns } => {
                    out["columns"] = json!(columns);
                }
                TableError::Parse {
                    offset: Some(offset),
                    ..
                } => {
                    out["offset"] = json!(offset);
                }
                _ => {}
            }
            // Nothing useful to do if stdout is gone.
            let _ = print_json(&out);
        }
        Format::Pretty => render_table_error_pretty(err, filename, bytes),
    }
}

fn render_table_error_pretty(err: &TableError, filename: &str, bytes: &[u8]) {
    let source = String::from_utf8_lossy(bytes);
    let located = match err {
        TableError::MissingRequiredColumn { columns } => header_span(&source).map(|span| {
            let found = if columns.is_empty() {
                "cabeçalho vazio".to_owned()
            } else {
                format!("colunas encontradas: {}", columns.join(", "))
            };
            (span, found)
        }),
        TableError::Parse {
            offset: Some(offset),
            message,
        } => char_span(&source, *offset).map(|span| (span, message.clone())),
        _ => None,
    };

    let Some((span, label)) = located else {
        eprintln!("{}[{}]: {err}", "erro".fg(Color::Red), err.kind());
        if let TableError::InvalidFileType { name, .. } = err {
            eprintln!("  = note: arquivo '{name}' não termina em .csv");
        }
        return;
    };

    let config = Config::default()
        .with_compact(false)
        .with_index_type(IndexType::Byte);
    let mut cache = (filename, Source::from(&*source));
    let mut report = Report::build(ReportKind::Error, (filename, span.clone()))
        .with_code(err.kind())
        .with_message(err.to_string())
        .with_config(config)
        .with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        );
    if matches!(err, TableError::MissingRequiredColumn { .. }) {
        report = report.with_help(format!(
            "a primeira linha deve conter {LOCATION_COLUMN}; gere um modelo com `loclabel template`"
        ));
    }
    report.finish().eprint(&mut cache).ok();
}

/// Byte range of the header line, after any byte order mark.
fn header_span(source: &str) -> Option<Range<usize>> {
    let start = source
        .char_indices()
        .find(|&(_, c)| c != '\u{FEFF}')
        .map(|(i, _)| i)?;
    let len = source[start..]
        .find(['\r', '\n'])
        .unwrap_or(source.len() - start);
    (len > 0).then(|| start..start + len)
}

/// The character starting at byte `offset`, clamped to the source.
fn char_span(source: &str, offset: u64) -> Option<Range<usize>> {
    let start = usize::try_from(offset).ok()?.min(source.len());
    if !source.is_char_boundary(start) {
        return None;
    }
    let end = start + source[start..].chars().next().map_or(0, char::len_utf8);
    Some(start..end)
}

// ── Command failures ────────────────────────────────────────────────────

/// Report a failed command.
pub(crate) fn report_failure(err: &anyhow::Error, format: Format) {
    let export = err.downcast_ref::<ExportError>();
    let failed: &[FailedRow] = match export {
        Some(ExportError::NoLabelsRendered { failed }) => failed,
        _ => &[],
    };

    match format {
        Format::Json => {
            let mut out = json!({
                "success": false,
                "error": export.map_or("command_failed", ExportError::kind),
                "message": format!("{err:#}"),
            });
            if !failed.is_empty() {
                out["failed"] = json!(failed);
            }
            let _ = print_json(&out);
        }
        Format::Pretty => {
            eprintln!("{}: {err:#}", "erro".fg(Color::Red));
            print_failed_rows(failed);
        }
    }
}

fn print_failed_rows(failed: &[FailedRow]) {
    for row in failed {
        eprintln!(
            "  {} linha {}: {} ({})",
            "aviso".fg(Color::Yellow),
            row.line,
            row.code,
            row.reason
        );
    }
}

// ── Results ─────────────────────────────────────────────────────────────

/// Report a written template.
pub(crate) fn print_template(target: &Path, bytes: usize, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&json!({
            "success": true,
            "output": target.display().to_string(),
            "bytes": bytes,
        })),
        Format::Pretty => {
            eprintln!("modelo gravado: {}", target.display().fg(Color::Green));
            Ok(())
        }
    }
}

/// Label totals above this are more likely a typo in `QUANTIDADE` than a
/// real print run.
pub(crate) const LARGE_RUN_LABELS: u64 = 10_000;

/// Report a loaded table and the rows whose barcode would fail.
///
/// Warns when the run would print more than [`LARGE_RUN_LABELS`] pages; the
/// count is still exported as requested.
pub(crate) fn print_check(
    file: &str,
    summary: &TableSummary,
    failed: &[FailedRow],
    format: Format,
) -> Result<()> {
    match format {
        Format::Json => print_json(&json!({
            "success": true,
            "file": file,
            "summary": summary,
            "failed": failed,
            "large_run": summary.labels > LARGE_RUN_LABELS,
        })),
        Format::Pretty => {
            println!("{}: {} linha(s)", file.fg(Color::Cyan), summary.rows);
            println!("  colunas: {}", summary.columns.join(";"));
            println!(
                "  com código: {}, em branco: {}",
                summary.printable_rows, summary.blank_rows
            );
            println!("  etiquetas a imprimir: {}", summary.labels);
            print_failed_rows(failed);
            if summary.labels > LARGE_RUN_LABELS {
                eprintln!(
                    "{}: {} etiquetas é incomum; confira a coluna QUANTIDADE antes de gerar",
                    "aviso".fg(Color::Yellow),
                    summary.labels
                );
            }
            if summary.rows == 0 {
                eprintln!("{}: {}", "aviso".fg(Color::Yellow), ExportError::NoDataToExport);
            }
            Ok(())
        }
    }
}

/// Report a generated PDF.
pub(crate) fn print_generated(target: &Path, summary: &ExportSummary, format: Format) -> Result<()> {
    match format {
        Format::Json => print_json(&json!({
            "success": true,
            "output": target.display().to_string(),
            "pages": summary.pages,
            "codes": summary.codes,
            "bytes": summary.bytes,
            "failed": summary.failed,
        })),
        Format::Pretty => {
            print_failed_rows(&summary.failed);
            let s = if summary.pages == 1 { "" } else { "s" };
            eprintln!(
                "{} etiqueta{s} gerada{s} em {}",
                summary.pages,
                target.display().fg(Color::Green)
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_span_skips_the_byte_order_mark() {
        let source = "\u{FEFF}CODIGO;QTD\nA\n";
        let span = header_span(source).unwrap();
        assert_eq!(&source[span], "CODIGO;QTD");
    }

    #[test]
    fn header_span_of_empty_input_is_none() {
        assert_eq!(header_span(""), None);
        assert_eq!(header_span("\u{FEFF}"), None);
        assert_eq!(header_span("\n"), None);
    }

    #[test]
    fn char_span_covers_one_character() {
        let source = "ab\u{e7}d";
        assert_eq!(char_span(source, 2), Some(2..4));
        assert_eq!(char_span(source, 3), None);
        assert_eq!(char_span(source, 99), Some(5..5));
    }

    #[test]
    fn explicit_format_wins() {
        assert_eq!(Format::resolve_or_detect(Some("json")), Format::Json);
        assert_eq!(Format::resolve_or_detect(Some("pretty")), Format::Pretty);
    }
}
