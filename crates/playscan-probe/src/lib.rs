//! # playscan-probe
//!
//! Container and stream probing for the playscan library scanner.
//!
//! This crate provides:
//!
//! - **Probe types** ([`MediaProbeResult`], [`Stream`], [`Format`]) -- the
//!   subset of `ffprobe` output the compatibility rules consume.
//! - **The [`Prober`] trait** -- a narrow `probe(path)` seam so scanners can
//!   be driven by a fake in tests.
//! - **[`FfprobeProber`]** -- shells out to `ffprobe` with a per-call timeout.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Tool discovery** ([`tools`]) -- locate `ffprobe` and report its version.
//!
//! ## Example
//!
//! ```no_run
//! use playscan_probe::{tools, FfprobeProber, Prober};
//! use std::path::Path;
//!
//! let prober = FfprobeProber::new(tools::get_tool_path("ffprobe", None)?);
//! let info = prober.probe(Path::new("/media/movie.mkv"))?;
//! println!("{} streams in {}", info.streams.len(), info.format.format_name);
//! # Ok::<(), playscan_probe::ProbeError>(())
//! ```

pub mod command;
mod error;
pub mod ffprobe;
pub mod prober;
pub mod tools;
pub mod types;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use error::{ProbeError, Result};
pub use ffprobe::FfprobeProber;
pub use prober::Prober;
pub use tools::ToolInfo;
pub use types::{CodecType, Format, MediaProbeResult, Stream};
