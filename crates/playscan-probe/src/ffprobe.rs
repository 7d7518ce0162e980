//! FFprobe-based [`Prober`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and maps the JSON output into [`MediaProbeResult`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use crate::prober::Prober;
use crate::types::{CodecType, Format, MediaProbeResult, Stream};
use crate::{ProbeError, Result};

const TOOL: &str = "ffprobe";

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    /// Path to the ffprobe binary.
    ffprobe_path: PathBuf,
    /// Per-file time limit.
    timeout: Duration,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self {
            ffprobe_path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-file timeout. A probe that outlives it is killed and
    /// reported as [`ProbeError::TimedOut`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn probe_async(&self, path: &Path) -> Result<MediaProbeResult> {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path.as_os_str());
        cmd.timeout(self.timeout);

        let output = cmd.execute().await?;
        let stdout = std::str::from_utf8(&output.stdout)
            .map_err(|e| ProbeError::parse_error(TOOL, format!("invalid UTF-8: {e}")))?;

        parse_ffprobe_json(stdout)
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        TOOL
    }

    fn probe(&self, path: &Path) -> Result<MediaProbeResult> {
        // The Prober trait is sync; each call drives the timed command on a
        // small current-thread runtime. Callers must not be inside a runtime.
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ProbeError::spawn(TOOL, e))?;
        rt.block_on(self.probe_async(path))
    }
}

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    codec_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse the JSON document printed by
/// `ffprobe -print_format json -show_format -show_streams`.
///
/// Fields other than `format.format_name`, `streams[].codec_type` and
/// `streams[].codec_name` are ignored. A missing `streams` array yields an
/// empty stream list.
///
/// # Errors
///
/// - [`ProbeError::Parse`] if the text is not a JSON object of the expected shape.
/// - [`ProbeError::Malformed`] if `format.format_name` is missing, a stream has
///   no `codec_type`, or a video/audio stream has no `codec_name`.
pub fn parse_ffprobe_json(json: &str) -> Result<MediaProbeResult> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| ProbeError::parse_error(TOOL, format!("JSON parse error: {e}")))?;

    let format_name = output
        .format
        .and_then(|f| f.format_name)
        .ok_or_else(|| ProbeError::malformed(TOOL, "missing format.format_name"))?;

    let streams = output
        .streams
        .into_iter()
        .enumerate()
        .map(|(position, stream)| convert_stream(position, stream))
        .collect::<Result<Vec<_>>>()?;

    Ok(MediaProbeResult {
        streams,
        format: Format { format_name },
    })
}

fn convert_stream(position: usize, stream: FfprobeStream) -> Result<Stream> {
    let index = stream.index.map(|i| i as usize).unwrap_or(position);

    let codec_type = stream
        .codec_type
        .as_deref()
        .map(CodecType::from_ffprobe)
        .ok_or_else(|| ProbeError::malformed(TOOL, format!("stream {index} has no codec_type")))?;

    let codec_name = match (stream.codec_name, codec_type) {
        (Some(name), _) => name,
        (None, CodecType::Other) => String::new(),
        (None, _) => {
            return Err(ProbeError::malformed(
                TOOL,
                format!("stream {index} has no codec_name"),
            ))
        }
    };

    Ok(Stream {
        codec_type,
        codec_name,
    })
}
