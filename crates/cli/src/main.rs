mod render;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use loclabel_core::{
    Code128Renderer, OUTPUT_FILE_NAME, Session, TEMPLATE_FILE_NAME, Upload, check_file_type,
    preflight, template_bytes,
};
use tracing_subscriber::EnvFilter;

use crate::render::{Format, print_check, print_generated, print_template, report_failure};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "loclabel",
    version,
    about = "Warehouse location labels: turn a LOCALIZACAO;QUANTIDADE list into a Code 128 label PDF"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log more: `-v` for progress, `-vv` for every row. `RUST_LOG` wins
    /// when set.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Write the input template (`modelo_localizacao.csv`).
    Template {
        /// Directory to write into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Overwrite an existing template.
        #[arg(long)]
        force: bool,
    },

    /// Load a location list and report what would be printed.
    Check {
        /// `;`-delimited file with a LOCALIZACAO column.
        file: PathBuf,
    },

    /// Generate the label PDF (`etiquetas_localizacao.pdf`).
    Generate {
        /// `;`-delimited file with a LOCALIZACAO column.
        file: PathBuf,
        /// Directory to write into.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Overwrite an existing PDF.
        #[arg(long)]
        force: bool,
    },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    let result = match cli.cmd {
        Cmd::Template { out_dir, force } => cmd_template(&out_dir, force, format),
        Cmd::Check { file } => cmd_check(&file, format),
        Cmd::Generate {
            file,
            out_dir,
            force,
        } => cmd_generate(&file, &out_dir, force, format),
    };

    if let Err(err) = result {
        report_failure(&err, format);
        process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for JSON.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "error",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .init();
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_template(out_dir: &Path, force: bool, format: Format) -> Result<()> {
    let target = out_dir.join(TEMPLATE_FILE_NAME);
    refuse_overwrite(&target, force)?;
    write_output(&target, template_bytes())?;
    tracing::info!(path = %target.display(), "template written");
    print_template(&target, template_bytes().len(), format)
}

fn cmd_check(file: &Path, format: Format) -> Result<()> {
    let session = load_table(file, format)?;
    let summary = session.table().summary();
    let failed = preflight(session.table(), &Code128Renderer::default());
    print_check(
        session.file_name().unwrap_or_default(),
        &summary,
        &failed,
        format,
    )
}

fn cmd_generate(file: &Path, out_dir: &Path, force: bool, format: Format) -> Result<()> {
    let mut session = load_table(file, format)?;
    let target = out_dir.join(OUTPUT_FILE_NAME);
    refuse_overwrite(&target, force)?;

    let outcome = session.export(&Code128Renderer::default())?;
    write_output(&target, &outcome.pdf)?;
    print_generated(&target, &outcome.summary(), format)
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Load `file` into a fresh session.
///
/// Table errors are rendered against the file contents and end the process
/// with status 1; I/O failures are returned.
fn load_table(file: &Path, format: Format) -> Result<Session> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if let Err(err) = check_file_type(&name, None) {
        render::render_table_error(&err, &name, &[], format);
        process::exit(1);
    }

    let bytes =
        fs::read(file).with_context(|| format!("falha ao ler '{}'", file.display()))?;
    let upload = Upload::new(name, bytes);
    let mut session = Session::new();
    if let Err(err) = session.load(&upload) {
        render::render_table_error(&err, &upload.name, &upload.bytes, format);
        process::exit(1);
    }
    Ok(session)
}

fn refuse_overwrite(target: &Path, force: bool) -> Result<()> {
    if target.exists() && !force {
        bail!(
            "'{}' já existe; use --force para sobrescrever",
            target.display()
        );
    }
    Ok(())
}

fn write_output(target: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("falha ao criar o diretório '{}'", dir.display()))?;
    }
    fs::write(target, bytes).with_context(|| format!("falha ao gravar '{}'", target.display()))
}
