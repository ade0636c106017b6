mod format;
mod progress;
mod transfer;

pub use format::{Format, FormatKind, MediaInfo};
pub use progress::{ProgressReport, ProgressSnapshot, format_bytes, format_rate};
pub use transfer::{
    Artifact, TransferBody, TransferFailure, TransferOutcome, TransferRequest, sanitize_file_name,
};
