use thiserror::Error;

/// Errors raised while reading, parsing, or delivering records.
#[derive(Debug, Error)]
pub enum RatlogError {
    /// The underlying source failed for a reason other than end of input.
    #[error("failed to read input: {0}")]
    Read(#[from] std::io::Error),

    /// A sink rejected a record.
    #[error("sink rejected record: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// No records are left to read.
    #[error("end of data")]
    EndOfData,

    /// The buffer was never populated, or has been drained.
    #[error("empty buffer")]
    EmptyBuffer,
}

impl RatlogError {
    /// Wraps an arbitrary error raised by a sink.
    pub fn sink<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Sink(err.into())
    }
}

pub type Result<T, E = RatlogError> = std::result::Result<T, E>;
