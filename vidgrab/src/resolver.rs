use anyhow::{Context, Result};
use serde_json::json;
use vidgrab_engine::MediaInfo;

/// One-shot metadata client for the helper server's `/formats` endpoint.
pub struct Resolver {
    http: reqwest::Client,
    base: String,
}

impl Resolver {
    pub fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub async fn resolve(&self, url: &str) -> Result<MediaInfo> {
        let endpoint = format!("{}/formats", self.base);
        tracing::debug!(%endpoint, "resolving formats");

        let response = self
            .http
            .post(&endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!("format resolution failed: HTTP {}", response.status());
        }

        let info: MediaInfo = response
            .json()
            .await
            .context("malformed formats response")?;
        tracing::info!(formats = info.formats.len(), "resolved media info");
        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use vidgrab_engine::{FormatKind, MediaInfo};

    // Shape of a real `/formats` response from the helper server.
    const SAMPLE: &str = r#"{
        "title": "My Video",
        "thumbnail": "https://i.example/thumb.jpg",
        "formats": [
            {
                "codec": "mp4a.40.2",
                "format": "140 - audio only (medium)",
                "sampleRate": 44100,
                "bitrate": 129.478,
                "extension": "m4a",
                "filesize": 500000,
                "url": "https://cdn.example/a"
            },
            {
                "codec": "avc1.640028",
                "format": "137 - 1920x1080 (1080p)",
                "sampleRate": null,
                "bitrate": null,
                "extension": "mp4",
                "filesize": 0,
                "url": "https://cdn.example/v"
            }
        ]
    }"#;

    #[test]
    fn parses_a_formats_payload() {
        let info: MediaInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.title.as_deref(), Some("My Video"));
        assert_eq!(info.formats.len(), 2);

        let audio = &info.formats[0];
        assert_eq!(audio.kind(), FormatKind::Audio);
        assert_eq!(audio.size_hint(), Some(500_000));
        assert_eq!(audio.sample_rate, Some(44_100.0));

        let video = &info.formats[1];
        assert_eq!(video.kind(), FormatKind::Video);
        assert_eq!(video.size_hint(), None);
        assert_eq!(video.extension, "mp4");
    }
}
