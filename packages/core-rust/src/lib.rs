//! `GridBench` Core: operation taxonomy and cache capability contracts.

pub mod clock;
pub mod operation;
pub mod operations;
pub mod traits;
pub mod types;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use operation::{Operation, SUFFIX_SEPARATOR};
pub use traits::{BasicCache, BulkCache, ByteSink, ConditionalCache, StreamingCache, TemporalCache};
pub use types::BulkMode;
