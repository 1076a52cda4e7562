//! Inkscape invocation turning the combined SVG into a PDF.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::config::{ToolConfig, EXPORT_MARGIN, PDF_EXTENSION, PDF_VERSION};
use crate::error::{ExportError, Result};

use super::run::run_captured;
use super::Tool;

/// Command-line arguments converting `svg` into `pdf`, cropped to the drawing.
pub fn convert_args(svg: &Path, pdf: &Path) -> Vec<OsString> {
    let mut filename = OsString::from("--export-filename=");
    filename.push(pdf.as_os_str());

    vec![
        format!("--export-type={}", PDF_EXTENSION).into(),
        filename,
        "--export-area-drawing".into(),
        format!("--export-pdf-version={}", PDF_VERSION).into(),
        format!("--export-margin={}", EXPORT_MARGIN).into(),
        svg.as_os_str().to_os_string(),
    ]
}

/// Convert the combined SVG to PDF. The SVG is left in place on failure.
pub fn convert_to_pdf(config: &ToolConfig, svg: &Path, pdf: &Path) -> Result<()> {
    let failure = |message: String| ExportError::ConversionFailure { message };

    let mut command = Command::new(&config.inkscape);
    command.args(convert_args(svg, pdf));

    info!("Converting {} to PDF", svg.display());
    debug!("Running {:?}", command);

    let captured = run_captured(command, config.timeout)
        .map_err(|e| e.into_export(Tool::Inkscape, failure))?;

    if !captured.stderr.is_empty() {
        debug!("inkscape stderr:\n{}", captured.stderr.trim_end());
    }

    if !captured.status.success() {
        return Err(failure(captured.failure_message(Tool::Inkscape)));
    }

    if !pdf.is_file() {
        return Err(failure(format!(
            "inkscape reported success but {} was not written",
            pdf.display()
        )));
    }

    Ok(())
}
