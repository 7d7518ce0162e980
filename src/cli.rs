use clap::Parser;
use playscan::config::Config;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playscan")]
#[command(
    author,
    version,
    about = "Scan a media library for video files that will likely direct play"
)]
pub struct Cli {
    /// Directory to scan (prompted for on stdin when omitted)
    pub directory: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of files to probe in parallel
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Per-file probe timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to the ffprobe binary
    #[arg(long, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Check that ffprobe is available and exit
    #[arg(long)]
    pub check_tools: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file/default configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(jobs) = self.jobs {
            config.scan.jobs = jobs;
        }
        if self.follow_links {
            config.scan.follow_links = true;
        }
        if let Some(timeout) = self.timeout {
            config.probe.timeout_secs = timeout;
        }
        if let Some(ref ffprobe) = self.ffprobe {
            config.probe.ffprobe_path = Some(ffprobe.clone());
        }
    }
}
