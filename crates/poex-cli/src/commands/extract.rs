//! Extract command - parse a single purchase order.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Args;
use tracing::{debug, error, info, warn};

use poex_core::{
    ArtifactWriter, ExtractionPayload, OrderExtraction, ResultSink, Supplier, WriterSink,
};

use super::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input document (PDF, or text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Supplier layout (dreamprice, winners)
    #[arg(short, long)]
    supplier: Option<Supplier>,

    /// Also persist the payload as a timestamp-named file in this directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Pretty-print the payload
    #[arg(long)]
    pretty: bool,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<ExitCode> {
    let start = Instant::now();
    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            let supplier = args.supplier.unwrap_or_default();
            error!("Failed to load configuration: {:#}", e);
            let payload = ExtractionPayload::failure(
                supplier,
                supplier.extractor().columns(),
                e.to_string(),
                format!("{:?}", e),
            );
            WriterSink::new(io::stdout().lock())
                .with_pretty(args.pretty)
                .emit(&payload)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let supplier = args.supplier.unwrap_or(config.extraction.default_supplier);
    info!("Processing file: {} ({})", args.input.display(), supplier);

    let outcome = OrderExtraction::new(supplier)
        .with_pdf_config(config.pdf.clone())
        .run(&args.input);

    if let Some(dir) = args.out_dir.or(config.output.out_dir) {
        match ArtifactWriter::new(dir).persist(&outcome.payload) {
            Ok(path) => info!("Payload written to {}", path.display()),
            Err(e) => warn!("Failed to persist payload: {}", e),
        }
    }

    let stdout = io::stdout();
    WriterSink::new(stdout.lock())
        .with_pretty(args.pretty || config.output.pretty)
        .emit(&outcome.payload)?;

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(ExitCode::from(outcome.exit_code() as u8))
}
