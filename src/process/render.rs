//! OpenSCAD invocation for one layer.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

use crate::config::{ToolConfig, LAYER_PARAMETER};
use crate::error::{ExportError, Result};
use crate::model::LayerRole;

use super::run::run_captured;
use super::Tool;

/// Command-line arguments rendering `layer` of `source` as SVG on stdout.
pub fn render_args(source: &Path, layer: LayerRole) -> Vec<OsString> {
    vec![
        "-o".into(),
        "-".into(),
        "--export-format".into(),
        "svg".into(),
        "-D".into(),
        format!("{}={}", LAYER_PARAMETER, layer.parameter_value()).into(),
        source.as_os_str().to_os_string(),
    ]
}

/// Render one layer of an OpenSCAD source and return the SVG text.
pub fn render_layer(config: &ToolConfig, source: &Path, layer: LayerRole) -> Result<String> {
    let failure = |message: String| ExportError::RenderFailure { layer, message };

    let mut command = Command::new(&config.openscad);
    command.args(render_args(source, layer));

    info!("Rendering {} layer ({}={})", layer, LAYER_PARAMETER, layer.parameter_value());
    debug!("Running {:?}", command);

    let captured = run_captured(command, config.timeout)
        .map_err(|e| e.into_export(Tool::OpenScad, failure))?;

    if !captured.stderr.is_empty() {
        debug!("openscad stderr:\n{}", captured.stderr.trim_end());
    }

    if !captured.status.success() {
        return Err(failure(captured.failure_message(Tool::OpenScad)));
    }

    if captured.stdout.trim().is_empty() {
        return Err(failure("renderer produced no output".to_string()));
    }

    debug!("Rendered {} layer: {} bytes", layer, captured.stdout.len());
    Ok(captured.stdout)
}
