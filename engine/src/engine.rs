use std::time::Instant;

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::cancel::CancelToken;
use crate::types::{Artifact, ProgressSnapshot, TransferFailure, TransferOutcome, TransferRequest};

/// Side channel for progress snapshots. A dropped receiver never fails the
/// transfer; it just means nobody is watching.
pub type ProgressSender = mpsc::UnboundedSender<ProgressSnapshot>;

/// Performs one chunked transfer end to end: request, incremental body read,
/// progress emission, cooperative cancellation, artifact assembly.
///
/// The engine never persists anything itself. Delivering the finished
/// artifact is the caller's job, which keeps one engine reusable for both
/// single-rendition and combined transfers.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    http: reqwest::Client,
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferEngine {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Runs the transfer to one of exactly three terminal outcomes. The
    /// cancellation flag is observed at chunk boundaries only; an in-flight
    /// read is never interrupted, the loop just refuses to continue after it
    /// returns.
    pub async fn run(
        &self,
        request: TransferRequest,
        cancel: CancelToken,
        progress: ProgressSender,
    ) -> TransferOutcome {
        let started = Instant::now();
        tracing::info!(endpoint = %request.endpoint, file = %request.file_name, "starting transfer");

        let response = self
            .http
            .post(&request.endpoint)
            .json(&request.body)
            .send()
            .await;
        let mut response = match response {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("transfer request failed: {e}");
                return TransferOutcome::Failed(TransferFailure::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "server rejected transfer");
            return TransferOutcome::Failed(TransferFailure::HttpStatus(status.as_u16()));
        }

        // A length communicated by the response wins over the client-side
        // estimate carried in the request.
        let total_bytes = response.content_length().or(request.size_hint);
        tracing::debug!(?total_bytes, "transfer accepted");

        let mut chunks: Vec<Bytes> = Vec::new();
        let mut bytes_received: u64 = 0;
        emit(&progress, bytes_received, total_bytes, started);

        loop {
            if cancel.is_cancelled() {
                tracing::info!(bytes_received, "transfer cancelled");
                return TransferOutcome::Cancelled;
            }
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    bytes_received += chunk.len() as u64;
                    chunks.push(chunk);
                    emit(&progress, bytes_received, total_bytes, started);
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(bytes_received, "transfer read failed: {e}");
                    return TransferOutcome::Failed(TransferFailure::Transport(e.to_string()));
                }
            }
        }

        let artifact = Artifact::assemble(&chunks, &request.file_name);
        tracing::info!(
            bytes = artifact.len(),
            file = %artifact.file_name,
            "transfer completed"
        );
        TransferOutcome::Completed(artifact)
    }
}

fn emit(progress: &ProgressSender, bytes_received: u64, total_bytes: Option<u64>, started: Instant) {
    let _ = progress.send(ProgressSnapshot {
        bytes_received,
        total_bytes,
        elapsed: started.elapsed(),
    });
}
