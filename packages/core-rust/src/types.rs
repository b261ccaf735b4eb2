use serde::{Deserialize, Serialize};

/// Execution strategy for multi-key operations.
///
/// Chosen by the caller and never inferred from the outcome. Each mode is
/// recorded under its own statistic bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BulkMode {
    /// The product's own bulk API, one request for the whole batch.
    #[default]
    Native,
    /// Concurrent single-key requests issued by the adapter and awaited together.
    Async,
}

impl BulkMode {
    /// Maps the conventional `async` flag onto a mode.
    #[must_use]
    pub fn from_async(is_async: bool) -> Self {
        if is_async {
            Self::Async
        } else {
            Self::Native
        }
    }

    /// Whether this is the asynchronous-driven mode.
    #[must_use]
    pub fn is_async(self) -> bool {
        matches!(self, Self::Async)
    }
}
