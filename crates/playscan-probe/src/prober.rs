//! The [`Prober`] trait defining the interface for media file probing.

use std::path::Path;

use crate::types::MediaProbeResult;
use crate::Result;

/// A media file prober capable of extracting stream and container metadata.
///
/// Implementations must be safe to share across threads (`Send + Sync`) so a
/// scanner can fan probes out over a worker pool.
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Probe a media file at the given path.
    ///
    /// Returns a [`MediaProbeResult`] on success, or an error if the probe
    /// could not run, failed on the file, or produced unusable output.
    fn probe(&self, path: &Path) -> Result<MediaProbeResult>;
}

