//! Batch command - extract multiple purchase orders into a directory.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{debug, warn};

use poex_core::{ArtifactWriter, OrderExtraction, Supplier};

use super::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory for payload files
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Supplier layout (dreamprice, winners)
    #[arg(short, long)]
    supplier: Option<Supplier>,
}

/// Result of processing a single file.
struct BatchEntry {
    path: PathBuf,
    rows: usize,
    error: Option<String>,
    artifact: Option<PathBuf>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let Some(out_dir) = args.out_dir.or(config.output.out_dir.clone()) else {
        anyhow::bail!("An output directory is required (--out-dir or output.out_dir in config)");
    };

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let supplier = args.supplier.unwrap_or(config.extraction.default_supplier);
    let writer = ArtifactWriter::new(out_dir);
    let mut entries = Vec::with_capacity(files.len());

    for path in files {
        // Each document gets its own extractor and parser state
        let outcome = OrderExtraction::new(supplier)
            .with_pdf_config(config.pdf.clone())
            .run(&path);

        let artifact = match writer.persist(&outcome.payload) {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                warn!("Failed to persist payload for {}: {}", path.display(), e);
                None
            }
        };

        entries.push(BatchEntry {
            path,
            rows: outcome.payload.rows.len(),
            error: outcome.payload.error.clone(),
            artifact,
        });
    }

    print_summary(&entries);
    debug!("Batch processing time: {:?}", start.elapsed());

    let failed = entries
        .iter()
        .any(|e| e.error.is_some() || e.artifact.is_none());
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

fn print_summary(entries: &[BatchEntry]) {
    for entry in entries {
        match (&entry.error, &entry.artifact) {
            (None, Some(artifact)) => eprintln!(
                "{} {} - {} rows -> {}",
                style("✓").green(),
                entry.path.display(),
                entry.rows,
                artifact.display()
            ),
            (Some(error), _) => eprintln!(
                "{} {} - {}",
                style("✗").red(),
                entry.path.display(),
                error
            ),
            (None, None) => eprintln!(
                "{} {} - {} rows, payload not saved",
                style("!").yellow(),
                entry.path.display(),
                entry.rows
            ),
        }
    }

    let succeeded = entries.iter().filter(|e| e.error.is_none()).count();
    eprintln!(
        "\n{} {}/{} documents extracted",
        style("ℹ").blue(),
        succeeded,
        entries.len()
    );
}
