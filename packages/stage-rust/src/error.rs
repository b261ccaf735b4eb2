//! Failure taxonomy for invocations and stage configuration.

/// Errors returned by [`Invocation::invoke`](crate::invocation::Invocation::invoke).
#[derive(Debug, thiserror::Error)]
pub enum InvocationError {
    /// The capability object failed. Carried through unchanged so callers can
    /// downcast to the adapter's own error type.
    #[error(transparent)]
    Cache(#[from] anyhow::Error),
    /// Copying bytes through a stream failed. The transfer is abandoned and
    /// not resumable.
    #[error("stream transfer failed: {0}")]
    Stream(#[source] std::io::Error),
}

impl InvocationError {
    /// Whether this failure came from a streaming copy loop.
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }
}

/// Errors from validating a [`StageConfig`](crate::config::StageConfig).
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("transfer buffer size must be greater than zero")]
    ZeroTransferBuffer,
}
