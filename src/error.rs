//! Error types for Decision Mail.

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Outbound email errors.
///
/// Display is the underlying service text only; the handler adds its own prefix.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    /// The request could not be built (e.g. an empty subject).
    #[error("{0}")]
    InvalidRequest(String),

    /// The email service answered with an error.
    #[error("{0}")]
    Rejected(String),
}

/// Object storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to fetch s3://{bucket}/{key}: {reason}")]
    Fetch {
        bucket: String,
        key: String,
        reason: String,
    },

    #[error("failed to read body of s3://{bucket}/{key}: {reason}")]
    Read {
        bucket: String,
        key: String,
        reason: String,
    },
}

/// Email parsing errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("not a parseable email message ({len} bytes)")]
    Malformed { len: usize },

    #[error("email has no text/plain or text/html body")]
    NoBody,
}

/// Reply classification errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error("No S3 records found in event.")]
    NoRecords,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ClassifyError {
    /// HTTP-style status code reported back to the invoker.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoRecords => 400,
            Self::Storage(_) | Self::Parse(_) => 500,
        }
    }
}
