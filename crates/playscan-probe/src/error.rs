//! Error types for playscan-probe.

use std::time::Duration;

/// Result type alias using [`ProbeError`].
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur while probing a single media file.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The probe executable could not be located.
    #[error("tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// Launching or waiting on the probe process failed.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The probe process exited with a non-zero status.
    #[error("{tool} failed: {message}")]
    Failed { tool: String, message: String },

    /// The probe process did not finish in time and was killed.
    #[error("{tool} timed out after {timeout:?}")]
    TimedOut { tool: String, timeout: Duration },

    /// The probe output was not valid JSON (or not valid UTF-8).
    #[error("failed to parse {tool} output: {message}")]
    Parse { tool: String, message: String },

    /// The probe output parsed but lacks a field the classifier relies on.
    #[error("malformed {tool} output: {message}")]
    Malformed { tool: String, message: String },
}

impl ProbeError {
    /// Create a tool not found error.
    pub fn tool_not_found(tool: impl Into<String>) -> Self {
        Self::ToolNotFound { tool: tool.into() }
    }

    /// Create a spawn error, mapping `NotFound` to [`ProbeError::ToolNotFound`].
    pub fn spawn(tool: impl Into<String>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::tool_not_found(tool);
        }
        Self::Spawn {
            tool: tool.into(),
            source,
        }
    }

    /// Create a tool execution failed error.
    pub fn failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a parse error.
    pub fn parse_error(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Create a malformed output error.
    pub fn malformed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
