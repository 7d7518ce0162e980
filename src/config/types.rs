use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub probe: ProbeConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Number of files probed at once (1 = sequential)
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Descend into symlinked directories
    #[serde(default)]
    pub follow_links: bool,
}

fn default_jobs() -> usize {
    1
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            jobs: default_jobs(),
            follow_links: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Explicit ffprobe binary; looked up on PATH when unset
    #[serde(default)]
    pub ffprobe_path: Option<PathBuf>,

    /// Per-file probe timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ffprobe_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
