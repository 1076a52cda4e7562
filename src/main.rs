//! scad2trotec - CLI tool to turn an OpenSCAD file into Trotec-ready SVG and PDF.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use scad_trotec::{export_trotec, ExportError, ToolConfig};

/// Render the cut and engrave layers of an OpenSCAD file and combine them
/// into `<name>_trotec.svg` and `<name>_trotec.pdf` next to the source.
///
/// Set OPENSCAD_PATH / INKSCAPE_PATH when the tools are not found
/// automatically, and SCAD_TROTEC_TIMEOUT_SECS to change the per-tool
/// time limit (0 disables it).
#[derive(Parser, Debug)]
#[command(name = "scad2trotec")]
#[command(author, version, about, long_about)]
struct Args {
    /// OpenSCAD source file
    source: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Tools are resolved before anything is rendered
    let tools = ToolConfig::resolve().map_err(stage_failed)?;
    info!("Using openscad: {}", tools.openscad.display());
    info!("Using inkscape: {}", tools.inkscape.display());

    info!("Processing: {}", args.source.display());

    let paths = export_trotec(&args.source, &tools).map_err(stage_failed)?;

    info!("Generated: {}", paths.svg.display());
    info!("Generated: {}", paths.pdf.display());

    Ok(())
}

/// Wrap a pipeline error so the message leads with the failing stage.
fn stage_failed(err: ExportError) -> anyhow::Error {
    let stage = err.code().stage();
    anyhow::Error::new(err).context(format!("{} stage failed", stage))
}
