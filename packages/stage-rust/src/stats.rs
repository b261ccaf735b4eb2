//! Statistics hand-off.
//!
//! Aggregation and reporting belong to the harness. This module only defines
//! the boundary an [`InvocationRunner`](crate::runner::InvocationRunner)
//! feeds, plus two small sinks for tests and smoke runs.

use std::time::Duration;

use dashmap::DashMap;
use gridbench_core::Operation;

/// Receives one record per completed invocation.
///
/// Called concurrently from every worker thread.
pub trait StatisticsSink: Send + Sync {
    fn record(&self, operation: Operation, elapsed: Duration, succeeded: bool);
}

/// Sink that discards every record.
pub struct NullSink;

impl StatisticsSink for NullSink {
    fn record(&self, _operation: Operation, _elapsed: Duration, _succeeded: bool) {}
}

/// Totals accumulated for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub count: u64,
    pub errors: u64,
    pub total_latency: Duration,
}

impl Tally {
    /// Mean latency over all records, or zero when there are none.
    #[must_use]
    pub fn mean_latency(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total_latency.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// In-memory per-bucket counters.
#[derive(Default)]
pub struct TallySink {
    tallies: DashMap<Operation, Tally>,
}

impl TallySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals for `operation`, if anything was recorded under it.
    #[must_use]
    pub fn tally(&self, operation: Operation) -> Option<Tally> {
        self.tallies.get(&operation).map(|entry| *entry)
    }

    /// Buckets with at least one record, ordered by name.
    #[must_use]
    pub fn operations(&self) -> Vec<Operation> {
        let mut operations: Vec<Operation> = self.tallies.iter().map(|entry| *entry.key()).collect();
        operations.sort();
        operations
    }

    /// Records across all buckets.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.tallies.iter().map(|entry| entry.count).sum()
    }
}

impl StatisticsSink for TallySink {
    fn record(&self, operation: Operation, elapsed: Duration, succeeded: bool) {
        let mut tally = self.tallies.entry(operation).or_default();
        tally.count += 1;
        if !succeeded {
            tally.errors += 1;
        }
        tally.total_latency += elapsed;
    }
}
