use thiserror::Error;

#[derive(Debug, Error)]
pub enum CurlError {
    #[error("{0:?}: not a valid cURL command")]
    InvalidCommand(String),

    #[error(transparent)]
    Tokenize(#[from] SplitError),

    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed shell quoting, reported by a [`WordSplitter`](crate::curl::words::WordSplitter).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid command line string at byte {offset}: {reason}")]
pub struct SplitError {
    pub offset: usize,
    pub reason: String,
}

pub type Result<T> = std::result::Result<T, CurlError>;
