//! Builder for executing external tool commands with timeout support.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::Command;

use crate::{ProbeError, Result};

/// Default command timeout: 2 minutes.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Output captured from a tool execution.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Process exit status.
    pub status: ExitStatus,
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

/// A builder for constructing and executing external tool invocations.
///
/// # Example
///
/// ```no_run
/// use playscan_probe::ToolCommand;
/// use std::path::PathBuf;
///
/// # async fn example() -> playscan_probe::Result<()> {
/// let output = ToolCommand::new(PathBuf::from("ffprobe"))
///     .args(["-v", "quiet", "-print_format", "json"])
///     .arg("-show_format")
///     .arg("-show_streams")
///     .arg("/path/to/video.mkv")
///     .execute()
///     .await?;
/// println!("{}", String::from_utf8_lossy(&output.stdout));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    timeout: Duration,
}

impl ToolCommand {
    /// Create a new command for the given program path.
    pub fn new(program: PathBuf) -> Self {
        Self {
            program,
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<OsString>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<OsString>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Set the maximum execution time.
    pub fn timeout(&mut self, d: Duration) -> &mut Self {
        self.timeout = d;
        self
    }

    /// Name used in error messages: the program's file name.
    pub fn program_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }

    /// Execute the command, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`ProbeError::ToolNotFound`] if the program does not exist.
    /// - [`ProbeError::Spawn`] if spawning or waiting on the process fails.
    /// - [`ProbeError::TimedOut`] if the process outlives the timeout. The
    ///   child is killed.
    /// - [`ProbeError::Failed`] if the process exits with a non-zero status
    ///   (message includes stderr when there is any).
    pub async fn execute(&self) -> Result<ToolOutput> {
        let program_name = self.program_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::trace!(program = %self.program.display(), args = ?self.args, "Spawning tool");

        let child = cmd
            .spawn()
            .map_err(|e| ProbeError::spawn(program_name.clone(), e))?;

        // On timeout the wait future is dropped along with the child, and
        // kill_on_drop takes care of the process.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ProbeError::spawn(program_name, e)),
            Err(_elapsed) => {
                return Err(ProbeError::TimedOut {
                    tool: program_name,
                    timeout: self.timeout,
                })
            }
        };

        let tool_output = ToolOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        };

        if !tool_output.status.success() {
            let stderr = tool_output.stderr.trim();
            let message = if stderr.is_empty() {
                format!("exited with {}", tool_output.status)
            } else {
                format!("exited with {}: {}", tool_output.status, stderr)
            };
            return Err(ProbeError::failed(program_name, message));
        }

        Ok(tool_output)
    }
}
