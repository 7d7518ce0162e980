//! Direct play classification for probed media files.
//!
//! The rules are a fixed allow-list of codecs and containers that most
//! modern clients decode natively. Checks run in order and the first one that
//! fails decides the verdict:
//!
//! 1. The probe reported at least one stream.
//! 2. There is a video stream (the first one is used).
//! 3. There is an audio stream (see [`select_audio_stream`]).
//! 4. Video codec is one of [`VIDEO_CODECS`].
//! 5. Audio codec is one of [`AUDIO_CODECS`].
//! 6. Container name contains one of [`CONTAINERS`].
//!
//! A passing file is only *likely* to direct play; the actual decision is
//! made by each client.

use std::fmt;

use playscan_probe::{MediaProbeResult, Stream};
use serde::{Serialize, Serializer};

/// Video codecs (lowercase) accepted for direct play.
pub const VIDEO_CODECS: &[&str] = &["h264", "hevc"];

/// Audio codecs (lowercase) accepted for direct play.
pub const AUDIO_CODECS: &[&str] = &["aac", "ac3"];

/// Substrings of the lowercased container name accepted for direct play.
pub const CONTAINERS: &[&str] = &["mp4", "mkv", "mov"];

/// Why a file was classified the way it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reason {
    NoStreams,
    NoVideoStream,
    NoAudioStream,
    /// Lowercased video codec name.
    UnsupportedVideoCodec(String),
    /// Lowercased audio codec name.
    UnsupportedAudioCodec(String),
    /// Lowercased container name.
    UncommonContainer(String),
    Compatible,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::NoStreams => f.write_str("No valid video info or streams found."),
            Reason::NoVideoStream => f.write_str("No video stream found."),
            Reason::NoAudioStream => f.write_str("No audio stream found."),
            Reason::UnsupportedVideoCodec(codec) => write!(f, "Unsupported video codec: {codec}"),
            Reason::UnsupportedAudioCodec(codec) => write!(f, "Unsupported audio codec: {codec}"),
            Reason::UncommonContainer(name) => write!(f, "Uncommon container: {name}"),
            Reason::Compatible => f.write_str("Likely direct play compatible."),
        }
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of classifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub compatible: bool,
    pub reason: Reason,
}

impl Verdict {
    fn compatible() -> Self {
        Self {
            compatible: true,
            reason: Reason::Compatible,
        }
    }

    fn needs_conversion(reason: Reason) -> Self {
        Self {
            compatible: false,
            reason,
        }
    }
}

/// Classify a probed file.
pub fn classify(info: &MediaProbeResult) -> Verdict {
    if info.streams.is_empty() {
        return Verdict::needs_conversion(Reason::NoStreams);
    }

    let Some(video) = select_video_stream(info) else {
        return Verdict::needs_conversion(Reason::NoVideoStream);
    };
    let Some(audio) = select_audio_stream(info) else {
        return Verdict::needs_conversion(Reason::NoAudioStream);
    };

    let video_codec = video.codec_name.to_lowercase();
    if !VIDEO_CODECS.contains(&video_codec.as_str()) {
        return Verdict::needs_conversion(Reason::UnsupportedVideoCodec(video_codec));
    }

    let audio_codec = audio.codec_name.to_lowercase();
    if !AUDIO_CODECS.contains(&audio_codec.as_str()) {
        return Verdict::needs_conversion(Reason::UnsupportedAudioCodec(audio_codec));
    }

    let container = info.format.format_name.to_lowercase();
    if !CONTAINERS.iter().any(|c| container.contains(c)) {
        return Verdict::needs_conversion(Reason::UncommonContainer(container));
    }

    Verdict::compatible()
}

/// The first video stream, if any.
pub fn select_video_stream(info: &MediaProbeResult) -> Option<&Stream> {
    info.video_streams().next()
}

/// The representative audio stream.
///
/// Starts from the first audio stream. A later stream takes over only when
/// the current pick has an uncommon codec and the later one has a common
/// codec, so among several common-codec streams the first is kept.
pub fn select_audio_stream(info: &MediaProbeResult) -> Option<&Stream> {
    info.audio_streams().fold(None, |selected, stream| match selected {
        None => Some(stream),
        Some(current) if !is_common_audio(current) && is_common_audio(stream) => Some(stream),
        keep => keep,
    })
}

fn is_common_audio(stream: &Stream) -> bool {
    AUDIO_CODECS.contains(&stream.codec_name.to_lowercase().as_str())
}
