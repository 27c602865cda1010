use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};

use crate::filters::{apply_filters, parse_filter};
use crate::ingest::{IngestOptions, IngestSummary, autoload, ingest_files};
use crate::models::{Frame, UploadedFile};
use crate::parsers::DispatchPolicy;
use crate::query::{
    GroupBy, Statistic, aggregate, indicator_columns, select_view, write_csv, write_xlsx,
};
use crate::report::{Reporter, StderrReporter};
use crate::store::ThemeStore;
use crate::utils::terminal::sanitize_cell;
use crate::utils::{format_path_with_tilde, get_data_dir};

#[derive(Parser)]
#[command(name = "peer-portal")]
#[command(version = "0.1.0")]
#[command(about = "Load themed country datasets and compare peers", long_about = None)]
pub struct Cli {
    /// Directory loaded at startup [default: $PEER_PORTAL_DATA_DIR or ./data]
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Extra file to ingest after the data directory (repeatable)
    #[arg(long = "upload", global = true, value_name = "FILE")]
    pub uploads: Vec<PathBuf>,

    /// How unknown file suffixes are handled: strict or fallback
    #[arg(long, global = true, default_value = "strict")]
    pub dispatch: DispatchPolicy,

    /// Store columns holding only Yes/No as 1/0
    #[arg(long, global = true)]
    pub recode_yes_no: bool,

    /// Skip files larger than this many megabytes
    #[arg(long, global = true, value_name = "MB")]
    pub max_file_mb: Option<u64>,

    /// Parse files in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every dataset and summarize what was stored
    Load,
    /// List themes with their row counts
    Themes {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the rows of one theme
    Table {
        #[arg(long)]
        theme: String,
        /// Row filter, e.g. region:"South Asia" income:"Low income"
        #[arg(long)]
        filter: Option<String>,
        /// Indicator column to show (repeatable; default all)
        #[arg(long = "indicator", value_name = "NAME")]
        indicators: Vec<String>,
        /// Write to this file instead of printing (XLSX for `.xlsx`, CSV otherwise)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
        /// Print rows as JSON records
        #[arg(long)]
        json: bool,
    },
    /// Compute a per-group statistic for one theme
    Aggregate {
        #[arg(long)]
        theme: String,
        /// country, region or income
        #[arg(long)]
        group_by: GroupBy,
        /// mean or median
        #[arg(long, default_value = "mean")]
        stat: Statistic,
        #[arg(long)]
        filter: Option<String>,
        #[arg(long = "indicator", value_name = "NAME")]
        indicators: Vec<String>,
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let data_dir = cli.data_dir.clone().unwrap_or_else(get_data_dir);
    let (store, summary) = load_store(&cli, &data_dir)?;

    match command {
        Commands::Load => show_load(&store, &summary, &data_dir),
        Commands::Themes { json } => show_themes(&store, *json),
        Commands::Table { theme, filter, indicators, output, json } => {
            let frame = filtered_theme(&store, theme, filter.as_deref())?;
            let view = select_view(&frame, indicators)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&view.to_records())?);
                Ok(())
            } else {
                emit(&view, output.as_deref())
            }
        }
        Commands::Aggregate { theme, group_by, stat, filter, indicators, output } => {
            let frame = filtered_theme(&store, theme, filter.as_deref())?;
            let indicators = if indicators.is_empty() {
                indicator_columns(&frame).into_iter().map(String::from).collect()
            } else {
                indicators.clone()
            };
            let result = aggregate(&frame, *group_by, &indicators, *stat)?;
            emit(&result, output.as_deref())
        }
    }
}

fn options(cli: &Cli) -> IngestOptions {
    let mut options = IngestOptions::default()
        .with_dispatch(cli.dispatch)
        .with_recode_yes_no(cli.recode_yes_no)
        .with_parallel(cli.parallel);
    if let Some(mb) = cli.max_file_mb {
        options = options.with_max_file_bytes(mb.saturating_mul(1024 * 1024));
    }
    options
}

/// Autoload the data directory, then ingest `--upload` files in order
fn load_store(cli: &Cli, data_dir: &Path) -> Result<(ThemeStore, IngestSummary)> {
    let options = options(cli);
    let mut store = ThemeStore::new();
    let mut reporter = StderrReporter::new();

    let mut summary = autoload(data_dir, &mut store, &mut reporter, &options)
        .with_context(|| format!("Failed to load data directory: {}", data_dir.display()))?;
    if summary.files_seen() > 0 {
        reporter.info(&format!(
            "Loaded {} of {} files from {}",
            summary.files_loaded,
            summary.files_seen(),
            format_path_with_tilde(data_dir)
        ));
    }

    if !cli.uploads.is_empty() {
        let uploads: Vec<UploadedFile> =
            cli.uploads.iter().cloned().map(UploadedFile::from_path).collect();
        let added = ingest_files(&uploads, &mut store, &mut reporter, &options);
        if added.files_loaded > 0 {
            let themes: Vec<&str> = added.themes_touched.iter().map(String::as_str).collect();
            reporter.success(&format!(
                "Datasets added: {} file(s), {} rows ({})",
                added.files_loaded,
                added.rows_added,
                themes.join(", ")
            ));
        }
        summary.merge(added);
    }

    Ok((store, summary))
}

fn filtered_theme(store: &ThemeStore, theme: &str, filter: Option<&str>) -> Result<Frame> {
    let frame = store.get(theme).ok_or_else(|| {
        let known: Vec<&str> = store.themes().collect();
        anyhow!("Unknown theme: '{}' (available: {})", theme, known.join(", "))
    })?;

    match filter {
        Some(expr) => {
            let expr = parse_filter(expr).context("Invalid --filter expression")?;
            Ok(apply_filters(frame, &expr))
        }
        None => Ok(frame.clone()),
    }
}

fn show_load(store: &ThemeStore, summary: &IngestSummary, data_dir: &Path) -> Result<()> {
    println!("Ingestion Summary");
    println!("=================");
    println!("Files loaded: {}", summary.files_loaded);
    println!("Files failed: {}", summary.files_failed);
    println!("Rows added: {}", summary.rows_added);
    if summary.rows_without_theme > 0 {
        println!("Rows without a theme: {}", summary.rows_without_theme);
    }
    println!();
    println!("Themes: {}", store.len());
    for stats in store.stats() {
        println!("  {}: {} rows", sanitize_cell(&stats.theme), stats.rows);
    }
    println!();
    println!("Data directory: {}", format_path_with_tilde(data_dir));

    Ok(())
}

fn show_themes(store: &ThemeStore, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&store.stats())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No themes loaded");
        return Ok(());
    }
    for stats in store.stats() {
        println!("{}\t{} rows\t{} columns", sanitize_cell(&stats.theme), stats.rows, stats.columns);
    }
    Ok(())
}

/// Write `output` as XLSX or CSV by its suffix, or print an aligned text table
fn emit(frame: &Frame, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            match path.extension().and_then(|e| e.to_str()) {
                Some("xlsx") => write_xlsx(frame, &mut writer)?,
                _ => write_csv(frame, &mut writer)?,
            }
            writer.flush().context("Failed to flush output file")?;
            println!("Wrote {} rows to {}", frame.len(), format_path_with_tilde(path));
            Ok(())
        }
        None => print_table(frame, &mut io::stdout().lock()),
    }
}

fn print_table(frame: &Frame, out: &mut impl Write) -> Result<()> {
    let header: Vec<String> = frame.columns().iter().map(|c| sanitize_cell(c)).collect();
    let cells: Vec<Vec<String>> = frame
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| sanitize_cell(&v.to_string())).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |row: &[String]| -> String {
        row.iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    writeln!(out, "{}", line(header.as_slice()))?;
    for row in &cells {
        writeln!(out, "{}", line(row.as_slice()))?;
    }
    writeln!(out, "({} rows)", frame.len())?;
    Ok(())
}
