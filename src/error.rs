use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable for key `{key}`: {source}")]
    Unavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write key `{key}`: {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("stored data under key `{key}` is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode journal: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("journal already contains an entry with id `{0}`")]
    DuplicateEntry(String),
}

impl StorageError {
    pub fn code(&self) -> WildwatchErrorCode {
        match self {
            Self::Unavailable { .. } => WildwatchErrorCode::E001StorageUnavailable,
            Self::Corrupt { .. } => WildwatchErrorCode::E002StorageCorrupt,
            Self::WriteFailed { .. } | Self::Encode(_) | Self::DuplicateEntry(_) => {
                WildwatchErrorCode::E003WriteFailed
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported media file: {0}")]
    UnsupportedMedia(String),
    #[error("failed to read media file {path}: {source}")]
    UnreadableMedia {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("classifier request failed: {0}")]
    Transport(String),
    #[error("classifier returned status {0}")]
    Status(u16),
    #[error("classifier response malformed: {0}")]
    MalformedResponse(String),
}

impl IngestError {
    pub fn code(&self) -> WildwatchErrorCode {
        match self {
            Self::UnsupportedMedia(_) | Self::UnreadableMedia { .. } => {
                WildwatchErrorCode::E006UnsupportedMedia
            }
            Self::Transport(_) | Self::Status(_) => WildwatchErrorCode::E004ClassifierUnreachable,
            Self::MalformedResponse(_) => WildwatchErrorCode::E005MalformedResponse,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WildwatchErrorCode {
    E001StorageUnavailable,
    E002StorageCorrupt,
    E003WriteFailed,
    E004ClassifierUnreachable,
    E005MalformedResponse,
    E006UnsupportedMedia,
}

impl WildwatchErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::E001StorageUnavailable => "E001_STORAGE_UNAVAILABLE",
            Self::E002StorageCorrupt => "E002_STORAGE_CORRUPT",
            Self::E003WriteFailed => "E003_WRITE_FAILED",
            Self::E004ClassifierUnreachable => "E004_CLASSIFIER_UNREACHABLE",
            Self::E005MalformedResponse => "E005_MALFORMED_RESPONSE",
            Self::E006UnsupportedMedia => "E006_UNSUPPORTED_MEDIA",
        }
    }
}
