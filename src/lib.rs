//! scad-trotec - Turn an OpenSCAD design into a Trotec-ready SVG and PDF.
//!
//! The source is rendered twice through OpenSCAD, once per layer (`layer=1`
//! for cutting, `layer=2` for engraving). The two SVGs are merged into one
//! document where the cut path is a red hairline and the engrave path is a
//! black fill, and Inkscape converts that document to PDF.
//!
//! # Example
//!
//! ```no_run
//! use scad_trotec::{export_trotec, ToolConfig};
//! use std::path::Path;
//!
//! let tools = ToolConfig::resolve().unwrap();
//! let paths = export_trotec(Path::new("widget.scad"), &tools).unwrap();
//! println!("{}", paths.pdf.display());
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod merge;
pub mod model;
pub mod parser;
pub mod process;
pub mod validation;

use std::path::{Path, PathBuf};
use tracing::{info, warn};

// Re-exports for convenience
pub use config::ToolConfig;
pub use error::{ErrorCode, ExportError, Result};
pub use generator::write_document;
pub use merge::{merge, merge_documents, restyle};
pub use model::{Element, LayerRole, LayerStyle, Node, StructureIssue, VectorDocument};
pub use parser::parse_document;
pub use process::{convert_to_pdf, render_layer, Platform, Tool};
pub use validation::{validate_layer, ValidationResult};

/// Files produced for one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Source file stem, used as the combined document's title.
    pub base_name: String,
    /// Combined SVG, next to the source.
    pub svg: PathBuf,
    /// Converted PDF, next to the source.
    pub pdf: PathBuf,
}

impl ExportPaths {
    /// Derive output names from the source path.
    pub fn for_source(source: &Path) -> Result<Self> {
        let base_name = source
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ExportError::InvalidSource {
                path: source.to_path_buf(),
            })?
            .to_string();

        let dir = source.parent().unwrap_or_else(|| Path::new(""));
        let stem = format!("{}{}", base_name, config::OUTPUT_SUFFIX);

        Ok(Self {
            svg: dir.join(format!("{}.{}", stem, config::SVG_EXTENSION)),
            pdf: dir.join(format!("{}.{}", stem, config::PDF_EXTENSION)),
            base_name,
        })
    }
}

/// Render, merge and convert one OpenSCAD source.
///
/// This is the full pipeline:
/// 1. Render the cut layer and the engrave layer
/// 2. Parse and validate both documents
/// 3. Merge them and write `<name>_trotec.svg`
/// 4. Convert that file to `<name>_trotec.pdf`
///
/// Every step must succeed before the next starts. Files already written
/// are left in place when a later step fails.
pub fn export_trotec(source: &Path, tools: &ToolConfig) -> Result<ExportPaths> {
    if !source.is_file() {
        return Err(ExportError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }
    let paths = ExportPaths::for_source(source)?;

    let cut = render_and_parse(tools, source, LayerRole::Cut)?;
    let engrave = render_and_parse(tools, source, LayerRole::Engrave)?;

    let mut validation = validate_layer(&cut, LayerRole::Cut);
    validation.merge(validate_layer(&engrave, LayerRole::Engrave));
    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    let combined = merge_documents(cut, engrave, &paths.base_name)?;
    std::fs::write(&paths.svg, write_document(&combined))?;
    info!("Wrote {}", paths.svg.display());

    convert_to_pdf(tools, &paths.svg, &paths.pdf)?;
    info!("Wrote {}", paths.pdf.display());

    Ok(paths)
}

/// Render one layer and parse it; unparsable renderer output is a render failure.
fn render_and_parse(tools: &ToolConfig, source: &Path, layer: LayerRole) -> Result<VectorDocument> {
    let text = render_layer(tools, source, layer)?;
    parse_document(&text).map_err(|e| ExportError::RenderFailure {
        layer,
        message: format!("output is not a usable SVG document ({})", e),
    })
}
