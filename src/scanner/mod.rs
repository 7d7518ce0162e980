//! Media library scanner.
//!
//! Walks a directory tree, probes every file with a video extension and sorts
//! each one into exactly one of three buckets: likely direct play compatible,
//! needs conversion, or unprocessed (the probe failed).

pub mod classifier;

use std::path::{Path, PathBuf};

use playscan_probe::{ProbeError, Prober};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::ScanConfig;

pub use classifier::{classify, Reason, Verdict};

/// File extensions (lowercase, without the dot) that are scanned.
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "ts", "m2ts",
];

/// Check if a path has a scanned video extension (case-insensitive).
///
/// Matches on the file name suffix, so a bare `.mp4` counts as well.
pub fn is_video_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_lowercase();
    VIDEO_EXTENSIONS
        .iter()
        .any(|ext| name.strip_suffix(ext).is_some_and(|stem| stem.ends_with('.')))
}

/// Errors that abort a scan before any file is analyzed.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The root is missing, not a directory, or cannot be listed.
    #[error("Directory '{}' not found.", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The probe worker pool could not be started.
    #[error("failed to start probe workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Progress notifications emitted while scanning.
#[derive(Debug)]
pub enum ScanEvent<'a> {
    /// A file is about to be probed.
    Analyzing(&'a Path),
    /// Probing a file failed; it will be listed as unprocessed.
    ProbeFailed { path: &'a Path, error: &'a ProbeError },
}

/// Progress callback for scan operations.
pub type ProgressCallback = Box<dyn Fn(&ScanEvent<'_>) + Send + Sync>;

/// A classified file and the reason for its verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub path: PathBuf,
    pub reason: Reason,
}

/// The three result buckets of a scan, each in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub compatible: Vec<ScanEntry>,
    pub needs_conversion: Vec<ScanEntry>,
    pub unprocessed: Vec<PathBuf>,
}

impl ScanReport {
    /// Number of video files found, i.e. the sum of all buckets.
    pub fn total(&self) -> usize {
        self.compatible.len() + self.needs_conversion.len() + self.unprocessed.len()
    }

    /// Append a file to the bucket its outcome selects.
    pub fn record(&mut self, path: PathBuf, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Classified(verdict) if verdict.compatible => {
                self.compatible.push(ScanEntry {
                    path,
                    reason: verdict.reason,
                });
            }
            FileOutcome::Classified(verdict) => {
                self.needs_conversion.push(ScanEntry {
                    path,
                    reason: verdict.reason,
                });
            }
            FileOutcome::Unprocessed => self.unprocessed.push(path),
        }
    }
}

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Classified(Verdict),
    Unprocessed,
}

/// Fail with [`ScanError::DirectoryNotFound`] unless `path` is a listable directory.
pub fn ensure_directory(path: &Path) -> Result<(), ScanError> {
    let listable = path.is_dir() && std::fs::read_dir(path).is_ok();
    if listable {
        Ok(())
    } else {
        Err(ScanError::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Scanner for classifying the video files under a directory.
pub struct Scanner {
    prober: Box<dyn Prober>,
    config: ScanConfig,
    progress: Option<ProgressCallback>,
}

impl Scanner {
    /// Create a sequential scanner around a prober.
    pub fn new(prober: Box<dyn Prober>) -> Self {
        Self {
            prober,
            config: ScanConfig::default(),
            progress: None,
        }
    }

    /// Use the given traversal and worker settings.
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Receive a [`ScanEvent`] for each file as it is analyzed.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Scan a directory tree and classify every video file in it.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::DirectoryNotFound`] before touching any file when
    /// `root` is not a readable directory. Per-file probe failures never
    /// abort the scan; those files land in [`ScanReport::unprocessed`].
    pub fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        ensure_directory(root)?;
        info!("Scanning directory: {:?}", root);

        let files = self.discover(root);
        debug!("Found {} video files under {:?}", files.len(), root);

        let mut report = ScanReport::default();

        if self.config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()?;
            // Indexed collect keeps discovery order regardless of completion order.
            let outcomes: Vec<FileOutcome> =
                pool.install(|| files.par_iter().map(|path| self.analyze(path)).collect());
            for (path, outcome) in files.into_iter().zip(outcomes) {
                report.record(path, outcome);
            }
        } else {
            for path in files {
                let outcome = self.analyze(&path);
                report.record(path, outcome);
            }
        }

        info!(
            "Scan complete: {} compatible, {} need conversion, {} unprocessed",
            report.compatible.len(),
            report.needs_conversion.len(),
            report.unprocessed.len()
        );
        Ok(report)
    }

    /// List the video files under `root` in a stable, name-sorted walk order.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(self.config.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            // is_file() follows symlinks, so links to regular files count too.
            let file_path = entry.path();
            if !file_path.is_file() || !is_video_file(file_path) {
                continue;
            }

            files.push(file_path.to_path_buf());
        }

        files
    }

    /// Probe and classify one file.
    pub fn analyze(&self, path: &Path) -> FileOutcome {
        self.emit(&ScanEvent::Analyzing(path));

        match self.prober.probe(path) {
            Ok(info) => {
                let verdict = classify(&info);
                debug!(
                    "Classified {:?}: compatible={} ({})",
                    path, verdict.compatible, verdict.reason
                );
                FileOutcome::Classified(verdict)
            }
            Err(error) => {
                debug!("{} failed on {:?}: {}", self.prober.name(), path, error);
                self.emit(&ScanEvent::ProbeFailed { path, error: &error });
                FileOutcome::Unprocessed
            }
        }
    }

    fn emit(&self, event: &ScanEvent<'_>) {
        if let Some(callback) = &self.progress {
            callback(event);
        }
    }
}
