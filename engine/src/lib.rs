//! Streaming transfer client for a vidgrab helper server.
//!
//! This library holds the transfer core: it issues one long-running request
//! against the helper server's proxy or combine endpoint, consumes the
//! response body chunk by chunk, tracks received bytes against a
//! known-or-unknown total, supports cooperative cancellation, and assembles
//! the bytes into a deliverable artifact. Every run terminates in exactly
//! one of completed, cancelled or failed, and the session's single-transfer
//! guard is released on every exit path.
//!
//! # Example
//!
//! ```no_run
//! use tokio::sync::mpsc;
//! use vidgrab_engine::{CancelToken, ProgressSnapshot, TransferBody, TransferEngine, TransferRequest};
//!
//! #[tokio::main]
//! async fn main() {
//!     let engine = TransferEngine::new();
//!     let (progress, mut snapshots) = mpsc::unbounded_channel::<ProgressSnapshot>();
//!
//!     tokio::spawn(async move {
//!         while let Some(snapshot) = snapshots.recv().await {
//!             println!("{}", snapshot.report().status_text);
//!         }
//!     });
//!
//!     let request = TransferRequest {
//!         endpoint: "http://localhost:14032/proxy".to_string(),
//!         body: TransferBody::Single {
//!             url: "https://cdn.example/video.mp4".to_string(),
//!             original: "https://example.com/watch?v=abc".to_string(),
//!             filename: "video.mp4".to_string(),
//!         },
//!         file_name: "video.mp4".to_string(),
//!         size_hint: None,
//!     };
//!     let outcome = engine.run(request, CancelToken::new(), progress).await;
//!     println!("{outcome:?}");
//! }
//! ```

mod cancel;
mod engine;
mod mime;
mod orchestrator;
mod session;
pub mod error;
pub mod types;

pub use cancel::CancelToken;
pub use engine::{ProgressSender, TransferEngine};
pub use error::{Error, Result};
pub use mime::content_type_for;
pub use orchestrator::{ArtifactSink, COMBINED_EXTENSION, Endpoints, Orchestrator};
pub use session::Session;
pub use types::{
    Artifact, Format, FormatKind, MediaInfo, ProgressReport, ProgressSnapshot, TransferBody,
    TransferFailure, TransferOutcome, TransferRequest, format_bytes, format_rate,
    sanitize_file_name,
};
