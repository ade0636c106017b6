use std::io;
use std::path::PathBuf;

use crate::cancel::CancelToken;
use crate::engine::{ProgressSender, TransferEngine};
use crate::error::{Error, Result};
use crate::session::Session;
use crate::types::{
    Artifact, Format, TransferBody, TransferFailure, TransferOutcome, TransferRequest,
};

/// Container the combine service muxes into.
pub const COMBINED_EXTENSION: &str = "mp4";

/// Where finished artifacts go. The host decides what "saving" means; the
/// CLI writes into a directory, tests collect in memory.
pub trait ArtifactSink {
    fn deliver(&self, artifact: &Artifact) -> io::Result<PathBuf>;
}

/// Helper-server targets for the two transfer shapes.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub proxy: String,
    pub combine: String,
}

impl Endpoints {
    pub fn from_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            proxy: format!("{base}/proxy"),
            combine: format!("{base}/combine"),
        }
    }
}

/// Thin call sites over the engine: validate preconditions, build the wire
/// request, react to the outcome. Re-entrancy is prevented solely by the
/// session's single-flight guard.
pub struct Orchestrator<S> {
    engine: TransferEngine,
    endpoints: Endpoints,
    sink: S,
}

impl<S: ArtifactSink> Orchestrator<S> {
    pub fn new(engine: TransferEngine, endpoints: Endpoints, sink: S) -> Self {
        Self {
            engine,
            endpoints,
            sink,
        }
    }

    /// Downloads one rendition through the proxy endpoint. The format and
    /// artifact name are supplied directly; the session contributes only the
    /// original input and the guard.
    pub async fn start_single(
        &self,
        session: &Session,
        format: &Format,
        file_name: &str,
        cancel: CancelToken,
        progress: ProgressSender,
    ) -> Result<TransferOutcome> {
        session.try_begin_transfer()?;
        let request = TransferRequest {
            endpoint: self.endpoints.proxy.clone(),
            body: TransferBody::Single {
                url: format.url.clone(),
                original: session.original_input().to_string(),
                filename: file_name.to_string(),
            },
            file_name: file_name.to_string(),
            size_hint: format.size_hint(),
        };

        let outcome = self.engine.run(request, cancel, progress).await;
        let outcome = self.deliver_if_completed(outcome);
        session.end_transfer();
        Ok(outcome)
    }

    /// Downloads the selected video+audio pair muxed by the combine
    /// endpoint. Fails before any request unless both slots are filled.
    pub async fn start_combine(
        &self,
        session: &Session,
        base_name: Option<&str>,
        cancel: CancelToken,
        progress: ProgressSender,
    ) -> Result<TransferOutcome> {
        let (Some(video), Some(audio)) = (session.video(), session.audio()) else {
            return Err(Error::MissingPair);
        };
        session.try_begin_transfer()?;

        let base_name = base_name.unwrap_or_else(|| session.title());
        let request = TransferRequest {
            endpoint: self.endpoints.combine.clone(),
            body: TransferBody::Combine {
                video_url: video.url.clone(),
                audio_url: audio.url.clone(),
                original: session.original_input().to_string(),
                filename: base_name.to_string(),
            },
            file_name: format!("{base_name}.{COMBINED_EXTENSION}"),
            // The muxed size is not predictable client-side; only a length
            // on the response itself can make this transfer determinate.
            size_hint: None,
        };

        let outcome = self.engine.run(request, cancel, progress).await;
        let outcome = self.deliver_if_completed(outcome);
        session.end_transfer();
        Ok(outcome)
    }

    fn deliver_if_completed(&self, outcome: TransferOutcome) -> TransferOutcome {
        match outcome {
            TransferOutcome::Completed(artifact) => match self.sink.deliver(&artifact) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "artifact saved");
                    TransferOutcome::Completed(artifact)
                }
                Err(e) => {
                    tracing::error!("failed to save artifact: {e}");
                    TransferOutcome::Failed(TransferFailure::Save(e.to_string()))
                }
            },
            other => other,
        }
    }
}
