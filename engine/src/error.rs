use crate::types::FormatKind;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("slot requires a {expected} format, got {actual}")]
    InvalidSelection {
        expected: FormatKind,
        actual: FormatKind,
    },

    #[error("another transfer is already in progress")]
    TransferInProgress,

    #[error("combining requires both a video and an audio format")]
    MissingPair,
}

pub type Result<T> = std::result::Result<T, Error>;
