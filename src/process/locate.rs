//! Executable lookup for the external tools.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{ExportError, Result};

/// External tool invoked as a subprocess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// CAD renderer producing one SVG per layer.
    OpenScad,
    /// Vector editor converting the combined SVG to PDF.
    Inkscape,
}

impl Tool {
    /// Environment variable that overrides the tool location.
    pub fn env_var(&self) -> &'static str {
        match self {
            Tool::OpenScad => "OPENSCAD_PATH",
            Tool::Inkscape => "INKSCAPE_PATH",
        }
    }

    /// Executable file name looked up on `PATH`.
    pub fn executable_name(&self, platform: Platform) -> &'static str {
        match (self, platform) {
            (Tool::OpenScad, Platform::Windows) => "openscad.exe",
            (Tool::OpenScad, _) => "openscad",
            (Tool::Inkscape, Platform::Windows) => "inkscape.exe",
            (Tool::Inkscape, _) => "inkscape",
        }
    }

    /// Well-known install locations, most likely first.
    pub fn candidates(&self, platform: Platform) -> &'static [&'static str] {
        match (self, platform) {
            (Tool::OpenScad, Platform::Linux) => &[
                "/usr/bin/openscad",
                "/usr/local/bin/openscad",
                "/snap/bin/openscad",
                "/var/lib/flatpak/exports/bin/org.openscad.OpenSCAD",
            ],
            (Tool::OpenScad, Platform::MacOs) => &[
                "/Applications/OpenSCAD.app/Contents/MacOS/OpenSCAD",
                "/opt/homebrew/bin/openscad",
                "/usr/local/bin/openscad",
            ],
            // The .com launcher is the console build; it keeps stdout attached.
            (Tool::OpenScad, Platform::Windows) => &[
                r"C:\Program Files\OpenSCAD\openscad.com",
                r"C:\Program Files\OpenSCAD\openscad.exe",
                r"C:\Program Files (x86)\OpenSCAD\openscad.exe",
            ],
            (Tool::Inkscape, Platform::Linux) => &[
                "/usr/bin/inkscape",
                "/usr/local/bin/inkscape",
                "/snap/bin/inkscape",
                "/var/lib/flatpak/exports/bin/org.inkscape.Inkscape",
            ],
            (Tool::Inkscape, Platform::MacOs) => &[
                "/Applications/Inkscape.app/Contents/MacOS/inkscape",
                "/opt/homebrew/bin/inkscape",
                "/usr/local/bin/inkscape",
            ],
            (Tool::Inkscape, Platform::Windows) => &[
                r"C:\Program Files\Inkscape\bin\inkscape.com",
                r"C:\Program Files\Inkscape\bin\inkscape.exe",
                r"C:\Program Files (x86)\Inkscape\bin\inkscape.exe",
            ],
            (_, Platform::Other) => &[],
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::OpenScad => write!(f, "openscad"),
            Tool::Inkscape => write!(f, "inkscape"),
        }
    }
}

/// Host platform family, selecting the candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other,
}

impl Platform {
    /// Platform this binary was built for.
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a platform family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" | "freebsd" | "openbsd" | "netbsd" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            _ => Platform::Other,
        }
    }
}

/// Find a tool: env override first, then the platform candidates, then `PATH`.
pub fn locate_tool<E, F>(tool: Tool, platform: Platform, env: &E, exists: &F) -> Result<PathBuf>
where
    E: Fn(&str) -> Option<OsString>,
    F: Fn(&Path) -> bool,
{
    let mut searched = Vec::new();

    if let Some(value) = env(tool.env_var()).filter(|v| !v.is_empty()) {
        let path = PathBuf::from(value);
        if exists(&path) {
            debug!("Using {} from {}: {}", tool, tool.env_var(), path.display());
            return Ok(path);
        }
        warn!(
            "{} points to {}, which does not exist; probing defaults",
            tool.env_var(),
            path.display()
        );
        searched.push(path);
    }

    let on_path = env("PATH")
        .map(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(tool.executable_name(platform)))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let probes = tool
        .candidates(platform)
        .iter()
        .map(|candidate| PathBuf::from(*candidate))
        .chain(on_path);

    for candidate in probes {
        if exists(&candidate) {
            debug!("Found {} at {}", tool, candidate.display());
            return Ok(candidate);
        }
        searched.push(candidate);
    }

    Err(ExportError::ToolNotFound {
        tool,
        env_var: tool.env_var(),
        searched,
    })
}
