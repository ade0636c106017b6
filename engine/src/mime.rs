/// Resolves the content type used when saving an artifact, from the
/// extension of its file name. Unknown extensions fall back to a generic
/// binary type.
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or_default();

    match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "3gp" => "video/3gpp",
        "m4a" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "opus" | "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        "aac" => "audio/aac",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions() {
        assert_eq!(content_type_for("clip.mp4"), "video/mp4");
        assert_eq!(content_type_for("track.m4a"), "audio/mp4");
        assert_eq!(content_type_for("clip.webm"), "video/webm");
        assert_eq!(content_type_for("track.mp3"), "audio/mpeg");
    }

    #[test]
    fn extension_is_case_insensitive() {
        assert_eq!(content_type_for("CLIP.MP4"), "video/mp4");
    }

    #[test]
    fn unknown_or_missing_extension_falls_back_to_binary() {
        assert_eq!(content_type_for("artifact.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("artifact"), "application/octet-stream");
        assert_eq!(content_type_for(""), "application/octet-stream");
    }

    #[test]
    fn last_extension_wins() {
        assert_eq!(content_type_for("show.s01e01.mkv"), "video/x-matroska");
    }
}
