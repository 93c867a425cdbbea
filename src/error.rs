use thiserror::Error;

/// Flatscript's crate-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Flatscript's crate-wide error type.
///
/// This is intentionally decoupled from `anyhow` so downstream libraries aren't forced to
/// adopt `anyhow` in their own public APIs.
#[derive(Debug, Error)]
pub enum Error {
    /// A flat-stream header carried a level outside the known tree shape (0, 1, 2).
    #[error("invalid header level: {0}")]
    InvalidHeaderLevel(u8),

    /// Quantization was invoked on a block list with no non-empty blocks, so
    /// there is no first bucket to anchor the merge runs.
    #[error("no non-empty blocks to quantize")]
    EmptyInput,

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl Error {
    pub(crate) fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}
