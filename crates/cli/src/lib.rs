use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inkpage_core::{export_json, load_page, save_page, summarize, InkConfig, PageSummary};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "inkpage")]
#[command(about = "Inspect and edit inkpage stroke documents")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print a machine-readable summary of a page.
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Remove every stroke under an eraser placed at X/Y.
    Erase {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
        /// Half the eraser side; defaults to the configured eraser size.
        #[arg(long)]
        half_size: Option<f64>,
        /// Where to write the result; defaults to FILE.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print every stroke and point as JSON.
    ExportJson {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
struct InfoOutput {
    path: String,
    #[serde(flatten)]
    page: PageSummary,
}

#[derive(Debug, Serialize)]
struct EraseOutput {
    removed: usize,
    remaining: usize,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    match cli.command {
        Commands::Info { file } => run_info(&file),
        Commands::Erase { file, x, y, half_size, output } => {
            run_erase(&file, x, y, half_size, output.as_deref())
        }
        Commands::ExportJson { file } => run_export_json(&file),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_info(file: &Path) -> Result<()> {
    ensure_file_exists(file)?;

    let page = load_page(file).context("failed to read page")?;
    let payload = InfoOutput { path: file.display().to_string(), page: summarize(&page, false) };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_erase(
    file: &Path,
    x: f64,
    y: f64,
    half_size: Option<f64>,
    output: Option<&Path>,
) -> Result<()> {
    ensure_file_exists(file)?;

    let half_size = match half_size {
        Some(half_size) => half_size,
        None => InkConfig::load().context("failed to load configuration")?.eraser_half_size,
    };
    if half_size.is_nan() || half_size < 0.0 {
        anyhow::bail!("--half-size must be >= 0");
    }

    let mut page = load_page(file).context("failed to read page")?;
    let removed = page.erase_whole_strokes(x, y, half_size);
    tracing::debug!(x, y, half_size, removed = removed.len(), "erase");

    let output = output.unwrap_or(file);
    save_page(output, &page).with_context(|| format!("failed to write {}", output.display()))?;

    let payload = EraseOutput { removed: removed.len(), remaining: page.len() };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_export_json(file: &Path) -> Result<()> {
    ensure_file_exists(file)?;

    let page = load_page(file).context("failed to read page")?;
    println!("{}", export_json(&page)?);
    Ok(())
}

fn ensure_file_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("file does not exist: {}", path.display());
    }

    if !path.is_file() {
        anyhow::bail!("path is not a file: {}", path.display());
    }

    Ok(())
}
