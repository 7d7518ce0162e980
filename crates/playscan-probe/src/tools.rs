//! External tool detection.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{ProbeError, Result};

/// Availability information for an external tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    /// Tool name.
    pub name: String,
    /// Whether the tool ran successfully.
    pub available: bool,
    /// Version string (first line of the version output), if available.
    pub version: Option<String>,
    /// Resolved path to the executable.
    pub path: Option<PathBuf>,
}

/// Check if a tool is available by running it with `version_arg`.
///
/// `program` may be a bare name looked up on `PATH` or a path to an executable.
///
/// # Example
///
/// ```no_run
/// use playscan_probe::tools::check_tool_with_arg;
/// use std::path::Path;
///
/// let info = check_tool_with_arg("ffprobe", Path::new("ffprobe"), "-version");
/// if info.available {
///     println!("ffprobe version: {:?}", info.version);
/// }
/// ```
pub fn check_tool_with_arg(name: &str, program: &Path, version_arg: &str) -> ToolInfo {
    let result = Command::new(program).arg(version_arg).output();

    match result {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout)
                .lines()
                .next()
                .map(|s| s.to_string());

            ToolInfo {
                name: name.to_string(),
                available: true,
                version,
                path: which::which(program).ok(),
            }
        }
        _ => ToolInfo {
            name: name.to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Check the ffprobe binary that a scan would use.
pub fn check_ffprobe(configured: Option<&Path>) -> ToolInfo {
    match get_tool_path("ffprobe", configured) {
        Ok(path) => check_tool_with_arg("ffprobe", &path, "-version"),
        Err(_) => ToolInfo {
            name: "ffprobe".to_string(),
            available: false,
            version: None,
            path: None,
        },
    }
}

/// Require that a tool is available on `PATH`, returning its path.
///
/// # Errors
///
/// Returns [`ProbeError::ToolNotFound`] if the tool is not found.
pub fn require_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| ProbeError::tool_not_found(name))
}

/// Get the path to a tool, preferring a configured path over PATH lookup.
///
/// A configured path that does not exist falls back to `PATH` with a warning.
pub fn get_tool_path(name: &str, configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        tracing::warn!(
            "Configured {} path {} does not exist, searching PATH",
            name,
            path.display()
        );
    }

    require_tool(name)
}
