//! Shared test harness for integration tests.
//!
//! Provides [`FakeProber`], a [`Prober`] that answers from a table keyed by
//! file name instead of running ffprobe, and [`MediaTree`] for laying out
//! throwaway library directories.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use playscan_probe::{MediaProbeResult, ProbeError, Prober, Stream};
use tempfile::TempDir;

/// A prober that looks up canned results by file name.
///
/// Files without an entry fail the way ffprobe does on a non-media file.
#[derive(Default)]
pub struct FakeProber {
    results: HashMap<String, MediaProbeResult>,
    calls: CallLog,
}

/// Shared record of probed paths, readable after the prober is boxed.
pub type CallLog = Arc<Mutex<Vec<PathBuf>>>;

impl FakeProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer probes of `file_name` with `result`.
    pub fn with(mut self, file_name: &str, result: MediaProbeResult) -> Self {
        self.results.insert(file_name.to_string(), result);
        self
    }

    /// Handle to the paths probed so far, in call order.
    pub fn call_log(&self) -> CallLog {
        Arc::clone(&self.calls)
    }
}

impl Prober for FakeProber {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn probe(&self, path: &Path) -> playscan_probe::Result<MediaProbeResult> {
        self.calls.lock().unwrap().push(path.to_path_buf());

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        self.results.get(&name).cloned().ok_or_else(|| {
            ProbeError::failed("ffprobe", "exited with exit status: 1")
        })
    }
}

/// A temporary directory tree of (empty) media files.
pub struct MediaTree {
    pub dir: TempDir,
}

impl MediaTree {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create a file (and its parent directories) relative to the root.
    pub fn touch(&self, relative: &str) -> PathBuf {
        self.write(relative, "")
    }

    /// Create a file with content relative to the root.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        std::fs::write(&path, content).expect("failed to write file");
        path
    }
}

// ===== Fixture functions =====

pub fn h264_aac_mp4() -> MediaProbeResult {
    MediaProbeResult::new(
        vec![Stream::video("h264"), Stream::audio("aac")],
        "mov,mp4,m4a,3gp,3g2,mj2",
    )
}

pub fn hevc_ac3_mkv() -> MediaProbeResult {
    MediaProbeResult::new(
        vec![
            Stream::video("hevc"),
            Stream::audio("truehd"),
            Stream::audio("ac3"),
            Stream::other("hdmv_pgs_subtitle"),
        ],
        "matroska,webm",
    )
}

pub fn mpeg4_aac_avi() -> MediaProbeResult {
    MediaProbeResult::new(vec![Stream::video("mpeg4"), Stream::audio("aac")], "avi")
}

pub fn h264_mp3_mp4() -> MediaProbeResult {
    MediaProbeResult::new(vec![Stream::video("h264"), Stream::audio("mp3")], "mp4")
}

pub fn h264_aac_mpegts() -> MediaProbeResult {
    MediaProbeResult::new(vec![Stream::video("h264"), Stream::audio("aac")], "mpegts")
}
