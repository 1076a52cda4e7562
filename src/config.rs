//! Configuration constants and settings for the exporter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::process::{locate_tool, Platform, Tool};

/// Name of the OpenSCAD variable selecting which layer is rendered.
pub const LAYER_PARAMETER: &str = "layer";

/// Layer parameter value for the cut geometry.
pub const CUT_LAYER_VALUE: u8 = 1;

/// Layer parameter value for the engrave geometry.
pub const ENGRAVE_LAYER_VALUE: u8 = 2;

/// Element id given to the cut path.
pub const CUT_PATH_ID: &str = "cut_path";

/// Element id given to the engrave path.
pub const ENGRAVE_PATH_ID: &str = "engrave_path";

/// Stroke colour the laser driver maps to vector cutting.
pub const CUT_STROKE: &str = "red";

/// Hairline stroke width required for vector cutting.
pub const CUT_STROKE_WIDTH: &str = "0.01";

/// Fill colour the laser driver maps to raster engraving.
pub const ENGRAVE_FILL: &str = "black";

/// Value used for an absent stroke or fill.
pub const NONE: &str = "none";

/// Suffix appended to the source base name for produced artifacts.
pub const OUTPUT_SUFFIX: &str = "_trotec";

/// Extension of the combined vector document.
pub const SVG_EXTENSION: &str = "svg";

/// Extension of the converted page document.
pub const PDF_EXTENSION: &str = "pdf";

/// PDF version requested from the page converter.
pub const PDF_VERSION: &str = "1.5";

/// Margin around the cropped drawing, in document units.
pub const EXPORT_MARGIN: u32 = 1;

/// Environment variable overriding the subprocess timeout in seconds.
pub const TIMEOUT_ENV: &str = "SCAD_TROTEC_TIMEOUT_SECS";

/// Default subprocess timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Locations of the external tools, resolved once at startup.
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// OpenSCAD executable.
    pub openscad: PathBuf,
    /// Inkscape executable.
    pub inkscape: PathBuf,
    /// Upper bound on each subprocess run. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl ToolConfig {
    /// Create a configuration from explicit paths with the default timeout.
    pub fn new(openscad: impl Into<PathBuf>, inkscape: impl Into<PathBuf>) -> Self {
        Self {
            openscad: openscad.into(),
            inkscape: inkscape.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    /// Resolve both tools from the process environment and the host platform.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(
            Platform::current(),
            |key| std::env::var_os(key),
            |path| path.is_file(),
        )
    }

    /// Resolve both tools with injectable environment and filesystem probes.
    pub fn resolve_with<E, F>(platform: Platform, env: E, exists: F) -> Result<Self>
    where
        E: Fn(&str) -> Option<std::ffi::OsString>,
        F: Fn(&Path) -> bool,
    {
        let openscad = locate_tool(Tool::OpenScad, platform, &env, &exists)?;
        let inkscape = locate_tool(Tool::Inkscape, platform, &env, &exists)?;
        let timeout = parse_timeout(env(TIMEOUT_ENV).as_deref().and_then(|v| v.to_str()));

        Ok(Self {
            openscad,
            inkscape,
            timeout,
        })
    }

    /// Path of the executable for a tool.
    pub fn path(&self, tool: Tool) -> &Path {
        match tool {
            Tool::OpenScad => &self.openscad,
            Tool::Inkscape => &self.inkscape,
        }
    }
}

/// Interpret the timeout override. `0` disables the limit, junk falls back to the default.
fn parse_timeout(value: Option<&str>) -> Option<Duration> {
    let default = Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    match value.map(str::trim) {
        None | Some("") => default,
        Some(raw) => match raw.parse::<u64>() {
            Ok(0) => None,
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}", TIMEOUT_ENV, raw);
                default
            }
        },
    }
}
