//! Core types for media probe results.

use serde::Serialize;

/// Kind of a media stream, as reported in ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecType {
    Video,
    Audio,
    /// Subtitles, data, attachments and anything else.
    Other,
}

impl CodecType {
    /// Map an ffprobe `codec_type` string.
    pub fn from_ffprobe(s: &str) -> Self {
        match s {
            "video" => Self::Video,
            "audio" => Self::Audio,
            _ => Self::Other,
        }
    }
}

/// One stream within a media file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stream {
    pub codec_type: CodecType,
    /// Codec name as reported by the probe. Compare case-insensitively.
    pub codec_name: String,
}

impl Stream {
    pub fn new(codec_type: CodecType, codec_name: impl Into<String>) -> Self {
        Self {
            codec_type,
            codec_name: codec_name.into(),
        }
    }

    /// Shorthand for a video stream.
    pub fn video(codec_name: impl Into<String>) -> Self {
        Self::new(CodecType::Video, codec_name)
    }

    /// Shorthand for an audio stream.
    pub fn audio(codec_name: impl Into<String>) -> Self {
        Self::new(CodecType::Audio, codec_name)
    }

    /// Shorthand for a subtitle/data/attachment stream.
    pub fn other(codec_name: impl Into<String>) -> Self {
        Self::new(CodecType::Other, codec_name)
    }

    pub fn is_video(&self) -> bool {
        self.codec_type == CodecType::Video
    }

    pub fn is_audio(&self) -> bool {
        self.codec_type == CodecType::Audio
    }
}

/// Container-level descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Format {
    /// Container name, possibly a comma-joined alias list (`"mov,mp4,m4a,3gp,3g2,mj2"`).
    pub format_name: String,
}

/// Parsed probe output for one file.
///
/// Streams keep the order the probe reported them in; stream selection
/// depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaProbeResult {
    pub streams: Vec<Stream>,
    pub format: Format,
}

impl MediaProbeResult {
    pub fn new(streams: Vec<Stream>, format_name: impl Into<String>) -> Self {
        Self {
            streams,
            format: Format {
                format_name: format_name.into(),
            },
        }
    }

    /// Iterate over the video streams in probe order.
    pub fn video_streams(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(|s| s.is_video())
    }

    /// Iterate over the audio streams in probe order.
    pub fn audio_streams(&self) -> impl Iterator<Item = &Stream> {
        self.streams.iter().filter(|s| s.is_audio())
    }
}
