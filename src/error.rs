//! Error types for the OpenSCAD to Trotec export pipeline.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::model::{LayerRole, StructureIssue};
use crate::process::Tool;

/// Pipeline stage an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Source file missing or unusable (-1)
    InvalidSource = -1,
    /// External tool could not be located (-2)
    ToolNotFound = -2,
    /// Renderer failed or produced unusable output (-3)
    RenderFailure = -3,
    /// Vector document text could not be parsed (-4)
    MalformedDocument = -4,
    /// Rendered document lacks the expected title/path shape (-5)
    MergeStructureViolation = -5,
    /// Page converter failed (-6)
    ConversionFailure = -6,
    /// Filesystem error (-7)
    Io = -7,
}

impl ErrorCode {
    /// Human readable stage name used in CLI messages.
    pub fn stage(&self) -> &'static str {
        match self {
            ErrorCode::InvalidSource => "source",
            ErrorCode::ToolNotFound => "tool lookup",
            ErrorCode::RenderFailure => "render",
            ErrorCode::MalformedDocument => "parse",
            ErrorCode::MergeStructureViolation => "merge",
            ErrorCode::ConversionFailure => "conversion",
            ErrorCode::Io => "io",
        }
    }
}

/// Main error type for the exporter.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Source file not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Source path has no usable file name: {path}")]
    InvalidSource { path: PathBuf },

    #[error("{tool} not found (set {env_var} to override); searched: {}", format_searched(.searched))]
    ToolNotFound {
        tool: Tool,
        env_var: &'static str,
        searched: Vec<PathBuf>,
    },

    #[error("Rendering the {layer} layer failed: {message}")]
    RenderFailure { layer: LayerRole, message: String },

    #[error("Malformed vector document: {message}")]
    MalformedDocument { message: String },

    #[error("The {layer} document cannot be merged: {issue}")]
    MergeStructureViolation {
        layer: LayerRole,
        issue: StructureIssue,
    },

    #[error("Page conversion failed: {message}")]
    ConversionFailure { message: String },

    #[error("{tool} did not finish within {}s", .limit.as_secs())]
    Timeout { tool: Tool, limit: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::SourceNotFound { .. } => ErrorCode::InvalidSource,
            ExportError::InvalidSource { .. } => ErrorCode::InvalidSource,
            ExportError::ToolNotFound { .. } => ErrorCode::ToolNotFound,
            ExportError::RenderFailure { .. } => ErrorCode::RenderFailure,
            ExportError::MalformedDocument { .. } => ErrorCode::MalformedDocument,
            ExportError::MergeStructureViolation { .. } => ErrorCode::MergeStructureViolation,
            ExportError::ConversionFailure { .. } => ErrorCode::ConversionFailure,
            ExportError::Timeout { tool, .. } => match tool {
                Tool::OpenScad => ErrorCode::RenderFailure,
                Tool::Inkscape => ErrorCode::ConversionFailure,
            },
            ExportError::Io(_) => ErrorCode::Io,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }
}

fn format_searched(searched: &[PathBuf]) -> String {
    if searched.is_empty() {
        return "nothing".to_string();
    }
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for exporter operations.
pub type Result<T> = std::result::Result<T, ExportError>;
