use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a rendition can fill in a combined download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    Video,
    Audio,
}

impl FormatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FormatKind::Video => "video",
            FormatKind::Audio => "audio",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendition of the source media, as listed by the resolver.
///
/// Wire field names follow the resolver's `/formats` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub url: String,
    /// Human-readable format line; the kind derivation inspects it.
    #[serde(rename = "format", default)]
    pub descriptor: String,
    #[serde(default)]
    pub codec: Option<String>,
    #[serde(default)]
    pub extension: String,
    /// Byte count if known; the resolver sends `0` for unknown.
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub bitrate: Option<f64>,
    #[serde(rename = "sampleRate", default)]
    pub sample_rate: Option<f64>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl Format {
    /// Anything the descriptor does not identify as audio is treated as
    /// video.
    pub fn kind(&self) -> FormatKind {
        if self.descriptor.contains("audio") {
            FormatKind::Audio
        } else {
            FormatKind::Video
        }
    }

    /// False for container-only renditions (`codec` absent or `"none"`).
    pub fn has_codec(&self) -> bool {
        self.codec.as_deref().is_some_and(|codec| codec != "none")
    }

    /// Client-side size estimate for the transfer; a zero filesize means the
    /// resolver did not know it.
    pub fn size_hint(&self) -> Option<u64> {
        self.filesize.filter(|&size| size > 0)
    }
}

/// Resolver response envelope: title, thumbnail and the rendition list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_with(descriptor: &str) -> Format {
        Format {
            url: "https://cdn.example/stream".to_string(),
            descriptor: descriptor.to_string(),
            codec: None,
            extension: "mp4".to_string(),
            filesize: None,
            bitrate: None,
            sample_rate: None,
            resolution: None,
        }
    }

    #[test]
    fn audio_descriptor_yields_audio_kind() {
        assert_eq!(format_with("251 - audio only (medium)").kind(), FormatKind::Audio);
    }

    #[test]
    fn anything_else_is_video() {
        assert_eq!(format_with("137 - 1920x1080 (1080p)").kind(), FormatKind::Video);
        assert_eq!(format_with("").kind(), FormatKind::Video);
    }

    #[test]
    fn zero_filesize_is_an_unknown_size() {
        let mut format = format_with("18 - 640x360 (360p)");
        format.filesize = Some(0);
        assert_eq!(format.size_hint(), None);

        format.filesize = Some(2_000_000);
        assert_eq!(format.size_hint(), Some(2_000_000));

        format.filesize = None;
        assert_eq!(format.size_hint(), None);
    }

    #[test]
    fn none_codec_sentinel_counts_as_no_codec() {
        let mut format = format_with("sb0 - storyboard");
        assert!(!format.has_codec());

        format.codec = Some("none".to_string());
        assert!(!format.has_codec());

        format.codec = Some("mp4a.40.2".to_string());
        assert!(format.has_codec());
    }
}
