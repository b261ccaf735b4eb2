//! Times invocations and hands their classification to a statistics sink.
//!
//! Records duration and outcome on a `tracing` span per invocation, then
//! forwards `(operation, elapsed, succeeded)` to the [`StatisticsSink`].

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug_span, field};

use crate::config::StageConfig;
use crate::error::InvocationError;
use crate::invocation::Invocation;
use crate::stats::StatisticsSink;

/// Runs invocations for one worker and reports each one to the sink.
///
/// Cheap to clone; workers usually hold their own copy over a shared sink.
#[derive(Clone)]
pub struct InvocationRunner {
    sink: Arc<dyn StatisticsSink>,
    transactional: bool,
}

impl InvocationRunner {
    #[must_use]
    pub fn new(sink: Arc<dyn StatisticsSink>, transactional: bool) -> Self {
        Self {
            sink,
            transactional,
        }
    }

    #[must_use]
    pub fn from_config(sink: Arc<dyn StatisticsSink>, config: &StageConfig) -> Self {
        Self::new(sink, config.transactional)
    }

    #[must_use]
    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// Invokes once, classifies the result, and records it.
    ///
    /// The bucket is read after the call so outcome-dependent variants such
    /// as `GET-Null` are reported correctly. Failed invocations are recorded
    /// too, under the bucket they report after failing.
    ///
    /// # Errors
    ///
    /// Returns the invocation's own error unchanged.
    pub fn run<I: Invocation>(&self, mut invocation: I) -> Result<I::Output, InvocationError> {
        let span = debug_span!(
            "invocation",
            operation = field::Empty,
            duration_us = field::Empty,
            outcome = field::Empty,
        );
        let _entered = span.enter();

        let start = Instant::now();
        let result = invocation.invoke();
        let elapsed = start.elapsed();

        let operation = invocation.operation_for(self.transactional);
        let duration_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        let outcome = if result.is_ok() { "ok" } else { "error" };

        span.record("operation", operation.name());
        span.record("duration_us", duration_us);
        span.record("outcome", outcome);

        match &result {
            Ok(_) => tracing::debug!(
                operation = operation.name(),
                duration_us = duration_us,
                "invocation complete"
            ),
            Err(err) => tracing::warn!(
                operation = operation.name(),
                duration_us = duration_us,
                error = %err,
                "invocation failed"
            ),
        }

        self.sink.record(operation, elapsed, result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::{self, Write};
    use std::sync::Mutex;

    use gridbench_core::operations::{basic, bulk, streaming};
    use gridbench_core::{BasicCache, BulkMode};

    use super::*;
    use crate::adapters::MemoryCache;
    use crate::invocation::basic::{GET_NULL, PUT_TX};
    use crate::invocation::test_support::{key, FailingCache};
    use crate::invocation::{Get, GetAll, GetViaStream, Put};
    use crate::stats::{NullSink, TallySink};

    fn tally_runner(transactional: bool) -> (InvocationRunner, Arc<TallySink>) {
        let sink = Arc::new(TallySink::new());
        (InvocationRunner::new(sink.clone(), transactional), sink)
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_outcome_dependent_bucket() {
        let (runner, sink) = tally_runner(false);
        let cache: MemoryCache<String, String> = MemoryCache::new();

        assert_eq!(runner.run(Get::new(&cache, key("k"))).unwrap(), None);
        runner.run(Put::new(&cache, key("k"), key("v"))).unwrap();
        assert_eq!(runner.run(Get::new(&cache, key("k"))).unwrap(), Some(key("v")));

        assert_eq!(sink.tally(*GET_NULL).unwrap().count, 1);
        assert_eq!(sink.tally(*basic::GET).unwrap().count, 1);
        assert_eq!(sink.tally(*basic::PUT).unwrap().count, 1);
        assert_eq!(sink.total_count(), 3);
    }

    #[test]
    fn transactional_runner_uses_tx_buckets() {
        let (runner, sink) = tally_runner(true);
        let cache: MemoryCache<String, String> = MemoryCache::new();
        runner.run(Put::new(&cache, key("k"), key("v"))).unwrap();
        assert_eq!(sink.operations(), vec![*PUT_TX]);
        assert!(runner.is_transactional());
    }

    #[test]
    fn failures_are_recorded_and_returned_unchanged() {
        let (runner, sink) = tally_runner(false);
        let cache = FailingCache;
        let err = runner.run(Get::new(&cache, key("k"))).unwrap_err();
        assert!(matches!(err, InvocationError::Cache(_)));
        let tally = sink.tally(*GET_NULL).unwrap();
        assert_eq!(tally.count, 1);
        assert_eq!(tally.errors, 1);
    }

    #[test]
    fn from_config_follows_mode() {
        let config = StageConfig {
            transactional: true,
            bulk_mode: BulkMode::Async,
            ..StageConfig::default()
        };
        let sink = Arc::new(TallySink::new());
        let runner = InvocationRunner::from_config(sink.clone(), &config);
        let cache: MemoryCache<String, String> = MemoryCache::new();
        let keys: HashSet<String> = [key("a")].into_iter().collect();
        runner
            .run(GetAll::new(&cache, config.bulk_mode, keys))
            .unwrap();
        let recorded = sink.operations();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].parent(), Some(*bulk::GET_ALL_ASYNC));
    }

    #[test]
    fn streaming_through_config_buffer() {
        let config = StageConfig::default();
        let mut buffer = config.transfer_buffer().unwrap();
        let (runner, sink) = tally_runner(false);
        let cache: MemoryCache<String, Vec<u8>> = MemoryCache::new();
        cache.put(&key("blob"), &vec![7u8; 20_000]).unwrap();

        let count = runner
            .run(GetViaStream::new(&cache, key("blob"), &mut buffer))
            .unwrap();
        assert_eq!(count, Some(20_000));
        assert_eq!(sink.tally(*basic::GET).unwrap().count, 1);
        assert!(sink.tally(*streaming::GET).is_none());
    }

    #[test]
    fn emits_span_fields_and_events() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let runner = InvocationRunner::new(Arc::new(NullSink), false);
        let cache: MemoryCache<String, String> = MemoryCache::new();
        let failing = FailingCache;
        tracing::subscriber::with_default(subscriber, || {
            runner.run(Get::new(&cache, key("k"))).unwrap();
            runner.run(Put::new(&failing, key("k"), key("v"))).unwrap_err();
        });

        let output = logs.contents();
        assert!(output.contains("invocation complete"), "{output}");
        assert!(output.contains("GET-Null"), "{output}");
        assert!(output.contains("invocation failed"), "{output}");
        assert!(output.contains("backend unavailable"), "{output}");
    }
}
