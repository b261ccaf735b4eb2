//! `GridBench` Stage: cache invocations, their classification, and the
//! in-memory reference adapter.
//!
//! A worker builds an [`Invocation`](invocation::Invocation) over a
//! capability object, runs it through an [`InvocationRunner`], and the runner
//! forwards the resulting [`Operation`](gridbench_core::Operation) bucket and
//! latency to a [`StatisticsSink`].

pub mod adapters;
pub mod config;
pub mod error;
pub mod invocation;
pub mod runner;
pub mod stats;

pub use config::StageConfig;
pub use error::{ConfigError, InvocationError};
pub use invocation::Invocation;
pub use runner::InvocationRunner;
pub use stats::{NullSink, StatisticsSink, Tally, TallySink};
