use bytes::Bytes;
use serde::Serialize;

use crate::mime;

/// Wire body for a transfer request. Field names are fixed by the helper
/// server's API.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TransferBody {
    Single {
        url: String,
        original: String,
        filename: String,
    },
    Combine {
        #[serde(rename = "videoURL")]
        video_url: String,
        #[serde(rename = "audioURL")]
        audio_url: String,
        original: String,
        filename: String,
    },
}

/// Everything the engine needs for one transfer.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    pub endpoint: String,
    pub body: TransferBody,
    /// Desired artifact name; sanitized at assembly time.
    pub file_name: String,
    /// Client-side size estimate, used only when the response carries no
    /// length of its own.
    pub size_hint: Option<u64>,
}

/// The assembled result of a completed transfer.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub data: Vec<u8>,
    /// Safe for a save operation; hostile characters already replaced.
    pub file_name: String,
    pub content_type: &'static str,
}

impl Artifact {
    pub(crate) fn assemble(chunks: &[Bytes], file_name: &str) -> Self {
        let mut data = Vec::with_capacity(chunks.iter().map(Bytes::len).sum());
        for chunk in chunks {
            data.extend_from_slice(chunk);
        }
        let file_name = sanitize_file_name(file_name);
        let content_type = mime::content_type_for(&file_name);
        Self {
            data,
            file_name,
            content_type,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Replaces path separators and other filesystem-hostile characters so the
/// name is safe to save under.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Exactly one outcome is produced per engine invocation.
#[derive(Debug)]
pub enum TransferOutcome {
    Completed(Artifact),
    Cancelled,
    Failed(TransferFailure),
}

impl TransferOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransferOutcome::Completed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TransferOutcome::Cancelled)
    }
}

/// Terminal failure classification. Classified once, where the condition is
/// detected, and carried inside the outcome; never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferFailure {
    #[error("server rejected the transfer with HTTP status {0}")]
    HttpStatus(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to save artifact: {0}")]
    Save(String),
}
